//! Manual bin sets
//!
//! The data type behind the interactive editor and behind committed user
//! methods. Mutation logic lives in `chorobin-editor`; this module only owns
//! the representation and its invariants.

use crate::color::Color;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One bin of a manual partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualBin {
    /// Lower edge; may be `-inf` for the first bin
    #[serde(with = "edge")]
    pub domain_from: f64,
    /// Upper edge; may be `+inf` for the last bin
    #[serde(with = "edge")]
    pub domain_to: f64,
    pub color: Color,
}

impl ManualBin {
    pub fn new(domain_from: f64, domain_to: f64, color: Color) -> Self {
        Self {
            domain_from,
            domain_to,
            color,
        }
    }

    /// Zero-width bins are collapsible
    pub fn is_zero_width(&self) -> bool {
        self.domain_from == self.domain_to
    }

    pub fn width(&self) -> f64 {
        self.domain_to - self.domain_from
    }
}

/// Ordered, contiguous sequence of manual bins
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualBinSet {
    bins: Vec<ManualBin>,
}

impl ManualBinSet {
    pub fn new(bins: Vec<ManualBin>) -> Self {
        Self { bins }
    }

    /// Single bin covering the whole real line
    pub fn unbounded(color: Color) -> Self {
        Self {
            bins: vec![ManualBin::new(f64::NEG_INFINITY, f64::INFINITY, color)],
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[ManualBin] {
        &self.bins
    }

    pub fn get(&self, index: usize) -> Option<&ManualBin> {
        self.bins.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ManualBin> {
        self.bins.get_mut(index)
    }

    pub fn first(&self) -> Option<&ManualBin> {
        self.bins.first()
    }

    pub fn last(&self) -> Option<&ManualBin> {
        self.bins.last()
    }

    pub fn push(&mut self, bin: ManualBin) {
        self.bins.push(bin);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManualBin> {
        self.bins.iter()
    }

    /// Mutable access to all bins; callers re-check invariants afterwards
    pub fn bins_mut(&mut self) -> &mut [ManualBin] {
        &mut self.bins
    }

    /// Every bin's `domain_from` except the first
    pub fn breakpoints(&self) -> Vec<f64> {
        self.bins.iter().skip(1).map(|b| b.domain_from).collect()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.bins.iter().map(|b| b.color).collect()
    }

    /// Index of the first bin painted with `color`
    pub fn position_of_color(&self, color: Color) -> Option<usize> {
        self.bins.iter().position(|b| b.color == color)
    }

    /// Drop zero-width bins, keeping at least one; returns how many were removed
    pub fn dedup_zero_width(&mut self) -> usize {
        let before = self.bins.len();
        if before == 0 {
            return 0;
        }
        let survivors: Vec<ManualBin> = self
            .bins
            .iter()
            .copied()
            .filter(|b| !b.is_zero_width())
            .collect();

        if survivors.is_empty() {
            // Everything collapsed onto one point; keep a single bin there
            let keep = self.bins[before - 1];
            self.bins = vec![ManualBin::new(self.bins[0].domain_from, keep.domain_to, keep.color)];
        } else {
            self.bins = survivors;
        }
        before - self.bins.len()
    }

    /// Verify contiguity, ordering and `from <= to`
    pub fn check_invariants(&self) -> Result<()> {
        for (i, bin) in self.bins.iter().enumerate() {
            if bin.domain_from.is_nan() || bin.domain_to.is_nan() {
                return Err(Error::InvalidBoundaryEdit {
                    index: i,
                    reason: "boundary is NaN".to_string(),
                });
            }
            if bin.domain_from > bin.domain_to {
                return Err(Error::InvalidBoundaryEdit {
                    index: i,
                    reason: format!("domain_from {} > domain_to {}", bin.domain_from, bin.domain_to),
                });
            }
        }
        for (i, pair) in self.bins.windows(2).enumerate() {
            if pair[0].domain_to != pair[1].domain_from {
                return Err(Error::InvalidBoundaryEdit {
                    index: i + 1,
                    reason: format!(
                        "gap between domain_to {} and domain_from {}",
                        pair[0].domain_to, pair[1].domain_from
                    ),
                });
            }
        }
        Ok(())
    }
}

/// JSON has no infinities; unbounded edges are written as strings
mod edge {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        if *v == f64::INFINITY {
            s.serialize_str("Infinity")
        } else if *v == f64::NEG_INFINITY {
            s.serialize_str("-Infinity")
        } else {
            s.serialize_f64(*v)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Edge {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Edge::deserialize(d)? {
            Edge::Number(v) => Ok(v),
            Edge::Text(t) => match t.as_str() {
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::custom(format!("invalid bin edge '{other}'"))),
            },
        }
    }
}

impl<'a> IntoIterator for &'a ManualBinSet {
    type Item = &'a ManualBin;
    type IntoIter = std::slice::Iter<'a, ManualBin>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::rgb(255, 0, 0)
    }

    fn blue() -> Color {
        Color::rgb(0, 0, 255)
    }

    fn three_bins() -> ManualBinSet {
        ManualBinSet::new(vec![
            ManualBin::new(0.0, 2.0, red()),
            ManualBin::new(2.0, 5.0, Color::WHITE),
            ManualBin::new(5.0, 10.0, blue()),
        ])
    }

    #[test]
    fn test_breakpoints_and_colors() {
        let set = three_bins();
        assert_eq!(set.breakpoints(), vec![2.0, 5.0]);
        assert_eq!(set.colors(), vec![red(), Color::WHITE, blue()]);
        assert_eq!(set.position_of_color(blue()), Some(2));
        assert_eq!(set.position_of_color(Color::BLACK), None);
        assert!(set.check_invariants().is_ok());
    }

    #[test]
    fn test_unbounded() {
        let set = ManualBinSet::unbounded(Color::WHITE);
        assert_eq!(set.len(), 1);
        assert!(set.breakpoints().is_empty());
        assert!(set.check_invariants().is_ok());
    }

    #[test]
    fn test_check_invariants_detects_gap_and_inversion() {
        let gap = ManualBinSet::new(vec![
            ManualBin::new(0.0, 2.0, red()),
            ManualBin::new(3.0, 5.0, blue()),
        ]);
        assert!(matches!(
            gap.check_invariants(),
            Err(Error::InvalidBoundaryEdit { index: 1, .. })
        ));

        let inverted = ManualBinSet::new(vec![ManualBin::new(4.0, 2.0, red())]);
        assert!(matches!(
            inverted.check_invariants(),
            Err(Error::InvalidBoundaryEdit { index: 0, .. })
        ));
    }

    #[test]
    fn test_dedup_zero_width() {
        let mut set = ManualBinSet::new(vec![
            ManualBin::new(0.0, 4.0, red()),
            ManualBin::new(4.0, 4.0, red()),
            ManualBin::new(4.0, 10.0, blue()),
            ManualBin::new(10.0, 10.0, Color::WHITE),
        ]);
        assert_eq!(set.dedup_zero_width(), 2);
        assert_eq!(set.len(), 2);
        assert_eq!(set.breakpoints(), vec![4.0]);
        assert!(set.check_invariants().is_ok());
    }

    #[test]
    fn test_dedup_keeps_one_bin() {
        let mut set = ManualBinSet::new(vec![
            ManualBin::new(3.0, 3.0, red()),
            ManualBin::new(3.0, 3.0, blue()),
        ]);
        assert_eq!(set.dedup_zero_width(), 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.bins()[0].color, blue());
        assert!(set.check_invariants().is_ok());
    }

    #[test]
    fn test_serde_transparent() {
        let set = ManualBinSet::new(vec![ManualBin::new(0.0, 1.0, red())]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r##"[{"domain_from":0.0,"domain_to":1.0,"color":"#ff0000"}]"##);

        let unbounded = ManualBinSet::unbounded(Color::WHITE);
        let json = serde_json::to_string(&unbounded).unwrap();
        assert!(json.contains("\"-Infinity\""));
        let back: ManualBinSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unbounded);
    }
}
