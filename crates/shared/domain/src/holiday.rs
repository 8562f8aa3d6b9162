//! Holiday domain entity as produced by the calendar manager.

use crate::locale::LocalizedText;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classifies how a holiday's date is determined.
///
/// Wire form is SCREAMING_SNAKE_CASE (`FIXED`, `MOVABLE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayType {
    /// Recurs on the same month/day every year.
    #[default]
    Fixed,
    /// Date differs per year; only expressible as explicit dated entries.
    Movable,
}

impl HolidayType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::Movable => "MOVABLE",
        }
    }
}

impl std::fmt::Display for HolidayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single holiday occurrence.
///
/// The `properties_key` is the stable identity of the holiday's definition
/// and the hashing input for content-derived ids; the date is the concrete
/// occurrence within some queried year or range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub holiday_type: HolidayType,
    pub properties_key: String,
    pub description: LocalizedText,
}

impl Holiday {
    /// Locale-resolved description; see [`LocalizedText::resolve`].
    #[must_use]
    pub fn description_for(&self, locale: &str) -> &str {
        self.description.resolve(locale)
    }
}
