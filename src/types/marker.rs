//! Marker types: named, colored date ranges that recolor the days they cover.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::error::KernelError;
use super::date::CalendarDate;

/// Display name used for markers submitted with an empty name.
pub const UNNAMED_MARKER: &str = "unnamed";

/// Unique identifier for a marker.
///
/// Wraps a UUID; stable for the lifetime of the marker, including replacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerId(Uuid);

impl MarkerId {
    /// Create a MarkerId from a UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a MarkerId from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for MarkerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("static color pattern")
    })
}

/// An RGB color in `#RRGGBB` form.
///
/// Accepts `#RGB` shorthand on input and stores the expanded, lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MarkerColor {
    hex: String,
    rgb: [u8; 3],
}

impl MarkerColor {
    /// Parse `#RGB` or `#RRGGBB`.
    pub fn parse(input: &str) -> Result<Self, KernelError> {
        let trimmed = input.trim();
        if !color_pattern().is_match(trimmed) {
            return Err(KernelError::InvalidMarker(format!(
                "color '{input}' is not a #RGB or #RRGGBB hex color"
            )));
        }
        let digits = &trimmed[1..];
        let mut expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        expanded.make_ascii_lowercase();

        let mut rgb = [0u8; 3];
        hex::decode_to_slice(&expanded, &mut rgb)
            .map_err(|e| KernelError::InvalidMarker(format!("color '{input}': {e}")))?;

        Ok(Self {
            hex: format!("#{expanded}"),
            rgb,
        })
    }

    /// The normalized `#rrggbb` string.
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl TryFrom<String> for MarkerColor {
    type Error = KernelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MarkerColor> for String {
    fn from(color: MarkerColor) -> Self {
        color.hex
    }
}

/// Unvalidated marker fields as they arrive from the input layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDraft {
    /// Marker name; may be empty.
    pub name: String,
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// Optional end date, `YYYY-MM-DD`. Empty strings count as absent.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Hex color.
    pub color: String,
}

impl MarkerDraft {
    /// Create a single-day draft.
    pub fn new(name: impl Into<String>, start_date: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_date: start_date.into(),
            end_date: None,
            color: color.into(),
        }
    }

    /// Set the end date.
    pub fn ending(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }
}

/// Limits applied when validating a draft.
#[derive(Debug, Clone, Copy)]
pub struct MarkerRules {
    /// Dates after this day are rejected.
    pub today: CalendarDate,
    /// Maximum name length in characters.
    pub max_name_chars: usize,
}

/// A validated life-event marker.
///
/// Never mutated in place; edits produce a new `Marker` with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    /// Unique marker identifier.
    pub id: MarkerId,
    /// Name as submitted (possibly empty).
    pub name: String,
    /// First covered day.
    pub start_date: CalendarDate,
    /// Last covered day; `None` covers only `start_date`.
    pub end_date: Option<CalendarDate>,
    /// Fill color.
    pub color: MarkerColor,
}

impl Marker {
    /// Validate a draft and assign it `id`.
    ///
    /// # Errors
    /// - `InvalidDate` for unparseable dates.
    /// - `InvalidMarkerRange` when the end precedes the start.
    /// - `InvalidMarker` for an over-long name, a bad color, or a date after `rules.today`.
    pub fn from_draft(id: MarkerId, draft: MarkerDraft, rules: MarkerRules) -> Result<Self, KernelError> {
        let name = draft.name.trim().to_string();
        if name.chars().count() > rules.max_name_chars {
            return Err(KernelError::InvalidMarker(format!(
                "name is longer than {} characters",
                rules.max_name_chars
            )));
        }

        let start_date = CalendarDate::parse(&draft.start_date)?;
        let end_date = match draft.end_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(CalendarDate::parse(raw)?),
        };

        if let Some(end) = end_date {
            if end < start_date {
                return Err(KernelError::InvalidMarkerRange { start: start_date, end });
            }
        }

        let latest = end_date.unwrap_or(start_date);
        if latest > rules.today {
            return Err(KernelError::InvalidMarker(format!(
                "date {latest} is in the future"
            )));
        }

        let color = MarkerColor::parse(&draft.color)?;

        Ok(Self {
            id,
            name,
            start_date,
            end_date,
            color,
        })
    }

    /// Name for display, falling back to [`UNNAMED_MARKER`].
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_MARKER
        } else {
            &self.name
        }
    }

    /// Last covered day.
    pub fn last_day(&self) -> CalendarDate {
        self.end_date.unwrap_or(self.start_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> MarkerRules {
        MarkerRules {
            today: CalendarDate::parse("2024-01-01").unwrap(),
            max_name_chars: 50,
        }
    }

    fn id() -> MarkerId {
        MarkerId::new(Uuid::from_u128(1))
    }

    #[test]
    fn test_color_parse_full_and_short() {
        let full = MarkerColor::parse("#FF8800").unwrap();
        assert_eq!(full.as_str(), "#ff8800");
        assert_eq!(full.rgb(), [0xff, 0x88, 0x00]);

        let short = MarkerColor::parse("#f80").unwrap();
        assert_eq!(short, full);
    }

    #[test]
    fn test_color_parse_rejects() {
        for bad in ["", "#", "ff8800", "#ff880", "#gg0000", "#ff8800aa", "red"] {
            assert!(
                matches!(MarkerColor::parse(bad), Err(KernelError::InvalidMarker(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_color_serde_round_trip_validates() {
        let color: MarkerColor = serde_json::from_str("\"#ABC\"").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#aabbcc\"");
        assert!(serde_json::from_str::<MarkerColor>("\"blue\"").is_err());
    }

    #[test]
    fn test_from_draft_single_day() {
        let marker = Marker::from_draft(id(), MarkerDraft::new("Graduation", "2010-06-01", "#00ff00"), rules()).unwrap();
        assert_eq!(marker.end_date, None);
        assert_eq!(marker.last_day(), marker.start_date);
    }

    #[test]
    fn test_from_draft_empty_end_is_absent() {
        let draft = MarkerDraft::new("Trip", "2010-06-01", "#00ff00").ending("  ");
        let marker = Marker::from_draft(id(), draft, rules()).unwrap();
        assert_eq!(marker.end_date, None);
    }

    #[test]
    fn test_from_draft_end_before_start() {
        let draft = MarkerDraft::new("Backwards", "2010-06-01", "#00ff00").ending("2010-05-31");
        assert!(matches!(
            Marker::from_draft(id(), draft, rules()),
            Err(KernelError::InvalidMarkerRange { .. })
        ));
    }

    #[test]
    fn test_from_draft_same_day_range_ok() {
        let draft = MarkerDraft::new("Day", "2010-06-01", "#00ff00").ending("2010-06-01");
        assert!(Marker::from_draft(id(), draft, rules()).is_ok());
    }

    #[test]
    fn test_from_draft_future_dates_rejected() {
        let draft = MarkerDraft::new("Later", "2023-12-01", "#00ff00").ending("2024-02-01");
        assert!(matches!(
            Marker::from_draft(id(), draft, rules()),
            Err(KernelError::InvalidMarker(_))
        ));
    }

    #[test]
    fn test_from_draft_name_limit() {
        let long = "x".repeat(51);
        let draft = MarkerDraft::new(long, "2010-06-01", "#00ff00");
        assert!(Marker::from_draft(id(), draft, rules()).is_err());

        let ok = "ñ".repeat(50);
        let draft = MarkerDraft::new(ok, "2010-06-01", "#00ff00");
        assert!(Marker::from_draft(id(), draft, rules()).is_ok());
    }

    #[test]
    fn test_from_draft_bad_date() {
        let draft = MarkerDraft::new("Bad", "2010-02-30", "#00ff00");
        assert!(matches!(
            Marker::from_draft(id(), draft, rules()),
            Err(KernelError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_display_name_default() {
        let marker = Marker::from_draft(id(), MarkerDraft::new("", "2010-06-01", "#000"), rules()).unwrap();
        assert_eq!(marker.display_name(), UNNAMED_MARKER);
    }
}
