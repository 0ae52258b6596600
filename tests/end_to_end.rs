//! Whole-workflow tests through the facade crate

use chorobin::base::RawValue;
use chorobin::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Right-skewed county rates with a few unreported entities
fn county_sample(n: usize, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Sample::new((0..n).map(|i| {
        let key = format!("{:05}", 1001 + 2 * i);
        if i % 17 == 0 {
            (key, RawValue::from("NA"))
        } else {
            let v: f64 = rng.gen_range(0.0..2.5);
            (key, RawValue::from((v.exp() * 100.0).round() / 100.0))
        }
    }))
}

#[test]
fn every_method_partitions_the_valid_values() {
    init_tracing();
    let sample = county_sample(120, 11);
    let valid = sample.valid_count();

    let mut session = Session::new(SessionConfig::builder().bin_count(6).seed(5).build());
    session.load_sample("unemployment", sample);

    for method in session.registry().iter() {
        let scale = &method.scale;
        assert!(!scale.is_fallback(), "{}", method.id);
        assert!(
            scale.breaks().windows(2).all(|w| w[0] < w[1]),
            "{} breaks {:?}",
            method.id,
            scale.breaks()
        );
        assert_eq!(method.bin_sizes.total(), valid, "{}", method.id);
    }

    let report = session.report();
    assert_eq!(report.len(), valid);
    let modal: usize = report
        .frequencies()
        .values()
        .filter(|&&f| f == report.methods().len())
        .count();
    assert_eq!(modal, report.unanimous_count());
}

#[test]
fn manual_edit_commit_and_recolor() -> anyhow::Result<()> {
    init_tracing();
    let mut session = Session::new(SessionConfig::builder().bin_count(4).seed(9).build());
    session.load_sample("unemployment", county_sample(60, 2));

    let quantile = MethodId::from(Classifier::Quantile);
    session.set_manual_method(&quantile)?;
    assert_eq!(
        session.editor().breakpoints(),
        session.scale_of(&quantile).unwrap().breaks()
    );

    let (min, _) = session.sample().extent().unwrap();
    let last = *session.editor().preset_colors().last().unwrap();
    session.editor_mut().paint_boundary(min + 0.5, last)?;
    session.editor().check_invariants()?;

    let id = session.commit_manual("Wide Top", "top class widened")?;
    let committed = session.method(&id).unwrap();
    assert!(committed.is_user_created);
    assert_eq!(committed.scale.breaks(), session.editor().breakpoints().as_slice());

    // recoloring keeps the committed boundaries
    let before = session.editor().breakpoints();
    session.set_color_scheme(SchemeRef::new("blues"));
    assert_eq!(session.editor().breakpoints(), before);
    assert_eq!(session.scale_of(&id).unwrap().scheme, SchemeRef::new("blues"));
    Ok(())
}

#[test]
fn late_results_never_apply() {
    init_tracing();
    let mut session = Session::new(SessionConfig::default());
    session.load_sample("a", county_sample(30, 1));

    let ticket = session.ticket();
    session.set_manual_method(&MethodId::from(Classifier::CkMeans)).unwrap();
    assert!(matches!(
        session.validate(&ticket),
        Err(Error::StaleAsyncResult { .. })
    ));
    assert_eq!(session.complete(&ticket, |_| 1), None);
    let fresh = session.ticket();
    assert_eq!(session.complete(&fresh, |_| 1), Some(1));
}

#[test]
fn config_round_trips_through_json() -> anyhow::Result<()> {
    let config = SessionConfig::builder()
        .bin_count(7)
        .color_scheme("reds")
        .show_invalid_values(false)
        .seed(42)
        .build();
    let json = config.to_json()?;
    let back = SessionConfig::from_json(&json)?;
    assert_eq!(back, config);

    let partial = SessionConfig::from_json(r#"{"bin_count": 99}"#)?;
    assert_eq!(partial.bin_count, 20);
    assert_eq!(partial.color_scheme, SessionConfig::default().color_scheme);
    Ok(())
}
