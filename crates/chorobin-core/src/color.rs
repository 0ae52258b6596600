//! Colors and color schemes
//!
//! A scheme can be a set of discrete palettes indexed by class count, a
//! continuous interpolator over `0..=1`, a single categorical list, or a
//! combination. [`ColorScheme::color_at`] picks a color the same way for all
//! of them so the resolver, the editor and the legend agree.

use crate::{Error, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// An opaque 24-bit sRGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    /// Default fill for entities with invalid values
    pub const INVALID: Color = Color::rgb(0x55, 0x55, 0x55);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation in RGB space, `t` clamped to `[0, 1]`
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            "gray" | "grey" => return Ok(Color::GRAY),
            _ => {}
        }

        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidInput(format!("color '{s}' is not a hex string")))?;
        let parse = |h: &str| {
            u8::from_str_radix(h, 16)
                .map_err(|_| Error::InvalidInput(format!("color '{s}' has invalid hex digits")))
        };
        match hex.len() {
            6 => Ok(Color::rgb(parse(&hex[0..2])?, parse(&hex[2..4])?, parse(&hex[4..6])?)),
            3 => {
                let expand = |c: &str| parse(&c.repeat(2));
                Ok(Color::rgb(expand(&hex[0..1])?, expand(&hex[1..2])?, expand(&hex[2..3])?))
            }
            _ => Err(Error::InvalidInput(format!("color '{s}' must be #rgb or #rrggbb"))),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_hex()
    }
}

/// Continuous color ramp over evenly spaced stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpolator {
    stops: Vec<Color>,
}

impl Interpolator {
    /// Create an interpolator; at least one stop is required
    pub fn new(stops: Vec<Color>) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::InvalidParameter(
                "interpolator needs at least one color stop".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    /// Color at `offset` in `[0, 1]`
    pub fn at(&self, offset: f64) -> Color {
        let offset = if offset.is_nan() { 0.0 } else { offset.clamp(0.0, 1.0) };
        match self.stops.len() {
            0 => return Color::GRAY,
            1 => return self.stops[0],
            _ => {}
        }
        let pos = offset * (self.stops.len() - 1) as f64;
        let i = (pos.floor() as usize).min(self.stops.len() - 2);
        self.stops[i].lerp(self.stops[i + 1], pos - i as f64)
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }
}

/// Reference to a color scheme by its code, carried inside a `Scale`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeRef(pub String);

impl SchemeRef {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Scheme used by the neutral fallback scale
    pub fn gray() -> Self {
        Self::new(GRAY_SCHEME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against the built-in catalog
    pub fn builtin(&self) -> Option<&'static ColorScheme> {
        ColorScheme::builtin(&self.0)
    }
}

impl fmt::Display for SchemeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const GRAY_SCHEME: &str = "gray";

/// A named color scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Short identifier, e.g. `viridis`
    pub code: String,
    /// Display name
    pub name: String,
    /// Discrete palettes keyed by class count
    #[serde(default)]
    pub palettes: BTreeMap<usize, Vec<Color>>,
    /// Fixed categorical list, indexed by offset
    #[serde(default)]
    pub categorical: Option<Vec<Color>>,
    /// Continuous ramp
    #[serde(default)]
    pub interpolator: Option<Interpolator>,
}

impl ColorScheme {
    /// Scheme with only a continuous ramp
    pub fn interpolated(code: &str, name: &str, stops: Vec<Color>) -> Result<Self> {
        Ok(Self {
            code: code.to_string(),
            name: name.to_string(),
            palettes: BTreeMap::new(),
            categorical: None,
            interpolator: Some(Interpolator::new(stops)?),
        })
    }

    /// Scheme with only a categorical list
    pub fn categorical(code: &str, name: &str, colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidParameter(format!("scheme '{code}' has no colors")));
        }
        Ok(Self {
            code: code.to_string(),
            name: name.to_string(),
            palettes: BTreeMap::new(),
            categorical: Some(colors),
            interpolator: None,
        })
    }

    /// Add a discrete palette for a given class count
    pub fn with_palette(mut self, colors: Vec<Color>) -> Self {
        self.palettes.insert(colors.len(), colors);
        self
    }

    /// Add a continuous ramp
    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = Some(interpolator);
        self
    }

    pub fn scheme_ref(&self) -> SchemeRef {
        SchemeRef::new(self.code.clone())
    }

    /// Pick a color at `offset` (0..1) for a partition of `bin_count` classes
    ///
    /// A discrete palette matching the class count wins, then the categorical
    /// list, then the interpolator. A scheme with none of these falls back to
    /// a blue/red split.
    pub fn color_at(&self, offset: f64, bin_count: usize) -> Color {
        let offset = if offset.is_nan() { 0.0 } else { offset.clamp(0.0, 1.0) };
        let pick = |colors: &[Color]| colors[(offset * (colors.len() - 1) as f64).floor() as usize];

        if let Some(palette) = self.palettes.get(&bin_count).filter(|p| !p.is_empty()) {
            return pick(palette);
        }
        if let Some(colors) = self.categorical.as_ref().filter(|c| !c.is_empty()) {
            return pick(colors);
        }
        if let Some(interp) = &self.interpolator {
            return interp.at(offset);
        }
        if offset < 0.5 {
            Color::rgb(0, 0, 255)
        } else {
            Color::rgb(255, 0, 0)
        }
    }

    /// Evenly spaced colors for `bin_count` classes, offsets `i / (n - 1)`
    pub fn colors_for(&self, bin_count: usize) -> Vec<Color> {
        (0..bin_count)
            .map(|i| self.color_at(class_offset(i, bin_count), bin_count))
            .collect()
    }

    /// `n` gradient stops for a continuous legend
    pub fn gradient_stops(&self, n: usize, bin_count: usize) -> Vec<(f64, Color)> {
        (0..n)
            .map(|i| {
                let offset = class_offset(i, n);
                (offset, self.color_at(offset, bin_count))
            })
            .collect()
    }

    /// Look up a built-in scheme by code
    pub fn builtin(code: &str) -> Option<&'static ColorScheme> {
        BUILTIN_SCHEMES.iter().find(|s| s.code == code)
    }

    /// All built-in schemes
    pub fn builtins() -> &'static [ColorScheme] {
        &BUILTIN_SCHEMES
    }

    /// The neutral scheme used by fallback scales
    pub fn gray() -> &'static ColorScheme {
        &BUILTIN_SCHEMES[0]
    }
}

/// Offset of class `i` out of `n`; a single class sits at 0
pub fn class_offset(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        i as f64 / (n - 1) as f64
    }
}

fn hex_list(hexes: &[&str]) -> Vec<Color> {
    hexes
        .iter()
        .filter_map(|h| h.parse::<Color>().ok())
        .collect()
}

fn build_builtins() -> Vec<ColorScheme> {
    let gray = ColorScheme {
        code: GRAY_SCHEME.to_string(),
        name: "Gray".to_string(),
        palettes: BTreeMap::new(),
        categorical: Some(vec![Color::GRAY]),
        interpolator: None,
    };

    let viridis_stops = hex_list(&[
        "#440154", "#472d7b", "#3b528b", "#2c728e", "#21918c", "#28ae80", "#5ec962", "#addc30",
        "#fde725",
    ]);
    let viridis = ColorScheme {
        code: "viridis".to_string(),
        name: "Viridis".to_string(),
        palettes: BTreeMap::new(),
        categorical: None,
        interpolator: Some(Interpolator { stops: viridis_stops }),
    };

    let blues_palettes: [&[&str]; 7] = [
        &["#deebf7", "#9ecae1", "#3182bd"],
        &["#eff3ff", "#bdd7e7", "#6baed6", "#2171b5"],
        &["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"],
        &["#eff3ff", "#c6dbef", "#9ecae1", "#6baed6", "#3182bd", "#08519c"],
        &["#eff3ff", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594"],
        &["#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594"],
        &[
            "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
            "#08306b",
        ],
    ];
    let mut blues = ColorScheme {
        code: "blues".to_string(),
        name: "Blues".to_string(),
        palettes: BTreeMap::new(),
        categorical: None,
        interpolator: Some(Interpolator {
            stops: hex_list(blues_palettes[6]),
        }),
    };
    for palette in blues_palettes {
        blues = blues.with_palette(hex_list(palette));
    }

    let category10 = ColorScheme {
        code: "category10".to_string(),
        name: "Category 10".to_string(),
        palettes: BTreeMap::new(),
        categorical: Some(hex_list(&[
            "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
            "#bcbd22", "#17becf",
        ])),
        interpolator: None,
    };

    vec![gray, viridis, blues, category10]
}

lazy_static! {
    static ref BUILTIN_SCHEMES: Vec<ColorScheme> = build_builtins();
}
