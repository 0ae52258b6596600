//! Human-centered families: pretty breaks and manual interval

use chorobin_core::{normalize_breaks, round_to, Error, Result};

/// Round step of about `raw`, from the 1-2-5 series
fn nice_step(raw: f64) -> f64 {
    let exponent = raw.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = raw / magnitude;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Cap on the number of candidate multiples pretty breaks may walk
const MAX_PRETTY_BREAKS: i64 = 10_000;

/// Multiples of a round step strictly inside `(min, max)`
///
/// The class count is approximate; breaks are rounded to the step's
/// precision and kept as-is downstream.
pub fn pretty_breaks(sorted: &[f64], bin_count: usize) -> Result<Vec<f64>> {
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let range = max - min;
    if !range.is_finite() || range <= 0.0 || bin_count < 2 {
        return Ok(Vec::new());
    }
    let step = nice_step(range / bin_count as f64);
    if !step.is_finite() || step <= 0.0 {
        return Ok(Vec::new());
    }
    let decimals = (-step.log10().floor()).max(0.0) as i32;

    let (lo, hi) = ((min / step).floor(), (max / step).ceil());
    if hi - lo > MAX_PRETTY_BREAKS as f64 {
        return Err(Error::Classification(format!(
            "Pretty step {step} yields more than {MAX_PRETTY_BREAKS} breaks"
        )));
    }
    // integer multiples, so the walk ends even where `i + 1.0 == i`
    let first = (lo as i64).saturating_add(1);
    let last = hi as i64;
    Ok((first..=last)
        .map(|i| round_to(i as f64 * step, decimals))
        .filter(|b| *b > min && *b < max)
        .collect())
}

/// Pass-through of user-supplied breaks, sorted and de-duplicated
pub fn manual_interval(breaks: Option<&[f64]>) -> Result<Vec<f64>> {
    let breaks = breaks.ok_or_else(|| {
        Error::InvalidParameter("Manual interval requires user-supplied breaks".to_string())
    })?;
    if breaks.iter().any(|b| !b.is_finite()) {
        return Err(Error::non_finite("manual breaks"));
    }
    Ok(normalize_breaks(breaks.to_vec()))
}
