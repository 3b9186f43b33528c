//! CSS lengths and grid track expressions.

use std::fmt;
use std::str::FromStr;

use crate::error::{GridError, Result};

/// Pixels per `rem`/`em` when the host does not report a root font size
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// A CSS length with its unit preserved verbatim (`150px`, `8rem`, `20%`)
#[derive(Debug, Clone, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: String,
}

impl Length {
    pub fn new(value: f32, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// A pixel length
    pub fn px(value: f32) -> Self {
        Self::new(value, "px")
    }

    pub fn is_px(&self) -> bool {
        self.unit == "px"
    }

    /// Pixel value, if the unit is absolute enough to convert without a
    /// layout context (`px`, and `rem`/`em` against the default font size)
    pub fn to_px(&self) -> Option<f32> {
        match self.unit.as_str() {
            "px" => Some(self.value),
            "rem" | "em" => Some(self.value * DEFAULT_FONT_SIZE_PX),
            _ => None,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl FromStr for Length {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        parse_length(s)
    }
}

/// Split a width string into its numeric value and unit.
///
/// `"150px"` gives `150` and `"px"`; a bare number is taken as pixels.
///
/// # Errors
/// Returns [`GridError::InvalidLength`] when there is no leading number or the
/// unit contains anything but letters or `%`.
pub fn parse_length(s: &str) -> Result<Length> {
    let s = s.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let value: f32 = number
        .parse()
        .map_err(|_| GridError::InvalidLength(s.to_string()))?;
    if !value.is_finite() || !unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
        return Err(GridError::InvalidLength(s.to_string()));
    }
    let unit = if unit.is_empty() { "px" } else { unit };
    Ok(Length::new(value, unit))
}

/// A single column's entry in a grid template
#[derive(Debug, Clone, PartialEq)]
pub enum TrackSize {
    /// Sized to content
    Auto,
    /// A fixed length
    Fixed(Length),
    /// Flexible: at least `min`, sharing free space with ratio `fr`
    MinMax { min: Length, fr: f32 },
}

impl TrackSize {
    pub fn is_flexible(&self) -> bool {
        matches!(self, TrackSize::MinMax { .. })
    }
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSize::Auto => f.write_str("auto"),
            TrackSize::Fixed(length) => write!(f, "{length}"),
            TrackSize::MinMax { min, fr } => write!(f, "minmax({min}, {fr}fr)"),
        }
    }
}

impl FromStr for TrackSize {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "auto" {
            return Ok(TrackSize::Auto);
        }
        if let Some(inner) = s.strip_prefix("minmax(").and_then(|r| r.strip_suffix(')')) {
            let (min, max) = inner
                .split_once(',')
                .ok_or_else(|| GridError::InvalidLength(s.to_string()))?;
            let fr = max
                .trim()
                .strip_suffix("fr")
                .and_then(|n| n.trim().parse::<f32>().ok())
                .ok_or_else(|| GridError::InvalidLength(s.to_string()))?;
            return Ok(TrackSize::MinMax {
                min: parse_length(min)?,
                fr,
            });
        }
        Ok(TrackSize::Fixed(parse_length(s)?))
    }
}

/// Split a grid template into its tracks, respecting parentheses.
///
/// # Errors
/// Returns [`GridError::InvalidLength`] for any track that does not parse.
pub fn parse_template(template: &str) -> Result<Vec<TrackSize>> {
    let mut tracks = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in template.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(begin) = start.take() {
                    tracks.push(template.get(begin..i).unwrap_or_default().parse()?);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(begin) = start {
        tracks.push(template.get(begin..).unwrap_or_default().parse()?);
    }
    Ok(tracks)
}

/// Render tracks as a single `grid-template-columns` value
pub fn format_template(tracks: &[TrackSize]) -> String {
    tracks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("150px", 150.0, "px" ; "pixels")]
    #[test_case("150rem", 150.0, "rem" ; "rem")]
    #[test_case("12.5%", 12.5, "%" ; "percent")]
    #[test_case(" 80 ", 80.0, "px" ; "bare number")]
    fn test_parse_length(input: &str, value: f32, unit: &str) {
        let length = parse_length(input).unwrap();
        assert_eq!(length.value, value);
        assert_eq!(length.unit, unit);
    }

    #[test]
    fn test_parse_length_rejects_garbage() {
        assert!(parse_length("wide").is_err());
        assert!(parse_length("10p x").is_err());
        assert!(parse_length("").is_err());
    }

    #[test]
    fn test_track_display() {
        assert_eq!(TrackSize::Auto.to_string(), "auto");
        assert_eq!(TrackSize::Fixed(Length::px(150.0)).to_string(), "150px");
        assert_eq!(
            TrackSize::MinMax {
                min: Length::px(150.0),
                fr: 1.67
            }
            .to_string(),
            "minmax(150px, 1.67fr)"
        );
    }

    #[test]
    fn test_parse_template_keeps_minmax_intact() {
        let tracks = parse_template("auto  minmax(150px, 3.33fr) 8rem").unwrap();
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0], TrackSize::Auto);
        assert_eq!(
            tracks[1],
            TrackSize::MinMax {
                min: Length::px(150.0),
                fr: 3.33
            }
        );
        assert_eq!(tracks[2], TrackSize::Fixed(Length::new(8.0, "rem")));
        assert_eq!(format_template(&tracks), "auto minmax(150px, 3.33fr) 8rem");
    }

    #[test]
    fn test_non_pixel_conversion() {
        assert_eq!(Length::new(10.0, "rem").to_px(), Some(160.0));
        assert_eq!(Length::new(10.0, "%").to_px(), None);
    }
}
