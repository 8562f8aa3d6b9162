//! Calendar definition files.
//!
//! A calendar is described by a TOML file `<data_dir>/<id>.toml` carrying the
//! calendar's localized description, its holiday entries, and an optional
//! tree of sub-regions (hierarchy only; holiday queries serve the root
//! calendar's entries):
//!
//! ```toml
//! id = "de"
//! description = "Germany"
//!
//! [descriptions]
//! de = "Deutschland"
//!
//! [[holidays]]
//! key = "CHRISTMAS"
//! month = 12
//! day = 25
//! description = "Christmas"
//!
//! [[regions]]
//! id = "by"
//! description = "Bavaria"
//! ```
//!
//! Recurring entries use `month`/`day`; one-off entries use an ISO `date`
//! string (the only way to express `type = "MOVABLE"` holidays, since rule
//! evaluation is out of scope).

use crate::error::CalendarError;
use chrono::{Datelike, NaiveDate};
use hhub_domain::hierarchy::CalendarHierarchy;
use hhub_domain::holiday::HolidayType;
use hhub_domain::locale::LocalizedText;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CalendarDefinition {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    #[serde(default)]
    pub holidays: Vec<HolidayEntry>,
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct HolidayEntry {
    /// Stable properties key; hashing input for the content-derived id.
    pub key: String,
    #[serde(default, rename = "type")]
    pub holiday_type: HolidayType,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// One-off occurrence, ISO format (`"2024-03-31"`).
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RegionEntry {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

/// When a holiday entry occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Occurrence {
    /// Same month/day every year.
    Recurring { month: u32, day: u32 },
    /// A single explicit date.
    Dated(NaiveDate),
}

/// A validated holiday entry, ready for per-year materialization.
#[derive(Debug, Clone)]
pub(crate) struct HolidayRule {
    pub properties_key: String,
    pub holiday_type: HolidayType,
    pub occurrence: Occurrence,
    pub description: LocalizedText,
}

impl HolidayRule {
    /// The rule's concrete date within `year`, if any.
    ///
    /// A Feb 29 recurring rule yields nothing in non-leap years; a dated
    /// rule yields its date only in its own year.
    pub(crate) fn occurrence_in_year(&self, year: i32) -> Option<NaiveDate> {
        match self.occurrence {
            Occurrence::Recurring { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            Occurrence::Dated(date) => (date.year() == year).then_some(date),
        }
    }
}

/// A fully validated calendar: holiday rules plus the hierarchy tree.
#[derive(Debug, Clone)]
pub(crate) struct CalendarData {
    pub rules: Vec<HolidayRule>,
    pub hierarchy: CalendarHierarchy,
}

impl CalendarDefinition {
    /// Parses a definition from TOML text.
    pub(crate) fn parse(text: &str, path: &str) -> Result<Self, CalendarError> {
        toml::from_str(text).map_err(|e| CalendarError::DefinitionParse {
            path: path.to_owned(),
            detail: e.to_string(),
        })
    }

    /// Validates the definition and compiles it into [`CalendarData`].
    ///
    /// `expected_id` is the file stem; a mismatching `id` field, an invalid
    /// month/day pair, a dual or absent occurrence, or duplicate sibling
    /// region ids are all rejected.
    pub(crate) fn compile(self, expected_id: &str, path: &str) -> Result<CalendarData, CalendarError> {
        let invalid = |detail: String| CalendarError::DefinitionInvalid {
            path: path.to_owned(),
            detail,
        };

        if self.id != expected_id {
            return Err(invalid(format!(
                "id '{}' does not match file name '{expected_id}'",
                self.id
            )));
        }

        let mut rules = Vec::with_capacity(self.holidays.len());
        for entry in self.holidays {
            if entry.key.trim().is_empty() {
                return Err(invalid("holiday entry with empty key".to_owned()));
            }
            let occurrence = match (entry.month, entry.day, entry.date) {
                (Some(month), Some(day), None) => {
                    // Validated against a leap year so Feb 29 is accepted.
                    if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
                        return Err(invalid(format!(
                            "holiday '{}': invalid month/day {month}/{day}",
                            entry.key
                        )));
                    }
                    Occurrence::Recurring { month, day }
                },
                (None, None, Some(date)) => Occurrence::Dated(date),
                _ => {
                    return Err(invalid(format!(
                        "holiday '{}': exactly one of month+day or date required",
                        entry.key
                    )));
                },
            };

            let default_text = entry.description.unwrap_or_else(|| entry.key.clone());
            let description = entry
                .descriptions
                .iter()
                .fold(LocalizedText::new(default_text), |text, (tag, t)| text.with(tag, t));

            rules.push(HolidayRule {
                properties_key: entry.key,
                holiday_type: entry.holiday_type,
                occurrence,
                description,
            });
        }

        let mut hierarchy = CalendarHierarchy::new(
            &self.id,
            localized(&self.description, &self.descriptions),
        );
        hierarchy.children = compile_regions(self.regions, &invalid)?;

        Ok(CalendarData { rules, hierarchy })
    }
}

fn compile_regions(
    regions: Vec<RegionEntry>,
    invalid: &impl Fn(String) -> CalendarError,
) -> Result<BTreeMap<String, CalendarHierarchy>, CalendarError> {
    let mut children = BTreeMap::new();
    for region in regions {
        if region.id.trim().is_empty() {
            return Err(invalid("region with empty id".to_owned()));
        }
        let mut node =
            CalendarHierarchy::new(&region.id, localized(&region.description, &region.descriptions));
        node.children = compile_regions(region.regions, invalid)?;
        if children.insert(region.id.clone(), node).is_some() {
            return Err(invalid(format!("duplicate region id '{}'", region.id)));
        }
    }
    Ok(children)
}

fn localized(default: &str, translations: &BTreeMap<String, String>) -> LocalizedText {
    translations
        .iter()
        .fold(LocalizedText::new(default), |text, (tag, t)| text.with(tag, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DE: &str = r#"
id = "de"
description = "Germany"

[descriptions]
de = "Deutschland"

[[holidays]]
key = "CHRISTMAS"
month = 12
day = 25
description = "Christmas"

[holidays.descriptions]
de = "Weihnachten"

[[holidays]]
key = "EASTER"
type = "MOVABLE"
date = "2024-03-31"

[[regions]]
id = "by"
description = "Bavaria"

[[regions]]
id = "bw"
description = "Baden-Wuerttemberg"
"#;

    #[test]
    fn compiles_a_complete_definition() {
        let data =
            CalendarDefinition::parse(DE, "de.toml").unwrap().compile("de", "de.toml").unwrap();
        assert_eq!(data.rules.len(), 2);
        assert_eq!(data.hierarchy.id, "de");
        assert_eq!(data.hierarchy.description_for("de"), "Deutschland");
        let child_ids: Vec<&str> = data.hierarchy.children.keys().map(String::as_str).collect();
        assert_eq!(child_ids, ["bw", "by"]);

        let christmas = &data.rules[0];
        assert_eq!(christmas.properties_key, "CHRISTMAS");
        assert_eq!(christmas.description.resolve("de-AT"), "Weihnachten");
        assert_eq!(
            christmas.occurrence_in_year(2024),
            NaiveDate::from_ymd_opt(2024, 12, 25)
        );
    }

    #[test]
    fn dated_rule_only_occurs_in_its_year() {
        let data =
            CalendarDefinition::parse(DE, "de.toml").unwrap().compile("de", "de.toml").unwrap();
        let easter = &data.rules[1];
        assert_eq!(easter.occurrence_in_year(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(easter.occurrence_in_year(2025), None);
    }

    #[test]
    fn leap_day_rule_skips_common_years() {
        let rule = HolidayRule {
            properties_key: "LEAP".to_owned(),
            holiday_type: HolidayType::Fixed,
            occurrence: Occurrence::Recurring { month: 2, day: 29 },
            description: LocalizedText::new("Leap day"),
        };
        assert!(rule.occurrence_in_year(2023).is_none());
        assert_eq!(rule.occurrence_in_year(2024), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn rejects_id_mismatch() {
        let err = CalendarDefinition::parse(DE, "p").unwrap().compile("at", "p").unwrap_err();
        assert!(matches!(err, CalendarError::DefinitionInvalid { .. }));
    }

    #[test]
    fn rejects_dual_occurrence() {
        let raw = r#"
id = "x"
description = "X"

[[holidays]]
key = "K"
month = 1
day = 1
date = "2024-01-01"
"#;
        let err = CalendarDefinition::parse(raw, "p").unwrap().compile("x", "p").unwrap_err();
        assert!(matches!(err, CalendarError::DefinitionInvalid { .. }));
    }

    #[test]
    fn rejects_invalid_month_day() {
        let raw = r#"
id = "x"
description = "X"

[[holidays]]
key = "K"
month = 13
day = 1
"#;
        let err = CalendarDefinition::parse(raw, "p").unwrap().compile("x", "p").unwrap_err();
        assert!(matches!(err, CalendarError::DefinitionInvalid { .. }));
    }

    #[test]
    fn rejects_duplicate_region_ids() {
        let raw = r#"
id = "x"
description = "X"

[[regions]]
id = "a"
description = "A"

[[regions]]
id = "a"
description = "A again"
"#;
        let err = CalendarDefinition::parse(raw, "p").unwrap().compile("x", "p").unwrap_err();
        assert!(matches!(err, CalendarError::DefinitionInvalid { .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = CalendarDefinition::parse("id = ", "p").unwrap_err();
        assert!(matches!(err, CalendarError::DefinitionParse { .. }));
    }
}
