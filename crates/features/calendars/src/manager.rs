//! Holiday manager registry.
//!
//! Replaces the classic singleton-per-calendar manager with an explicit
//! cache owned by the slice: lookups are keyed by calendar id, construct a
//! [`CalendarManager`] from its definition file on miss, and share the
//! instance across requests. Initialization errors are not cached, so a
//! fixed definition file is picked up on the next request.

use crate::definition::{CalendarData, CalendarDefinition};
use crate::error::CalendarError;
use chrono::{Datelike, NaiveDate};
use hhub_domain::config::CalendarsConfig;
use hhub_domain::hierarchy::CalendarHierarchy;
use hhub_domain::holiday::Holiday;
use moka::sync::Cache;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Read-only query handle for one calendar.
#[derive(Debug)]
pub struct CalendarManager {
    id: String,
    data: CalendarData,
}

impl CalendarManager {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All holidays of `year`, sorted by date then properties key.
    #[must_use]
    pub fn holidays_in_year(&self, year: i32) -> Vec<Holiday> {
        self.collect(|rule| rule.occurrence_in_year(year).into_iter().collect())
    }

    /// All holidays within `[from, until]`, both bounds inclusive, sorted
    /// by date then properties key. A recurring rule contributes one
    /// occurrence per covered year.
    #[must_use]
    pub fn holidays_between(&self, from: NaiveDate, until: NaiveDate) -> Vec<Holiday> {
        self.collect(|rule| {
            (from.year()..=until.year())
                .filter_map(|year| rule.occurrence_in_year(year))
                .filter(|date| (from..=until).contains(date))
                .collect()
        })
    }

    /// The calendar's hierarchy tree (root node is the calendar itself).
    #[must_use]
    pub fn hierarchy(&self) -> &CalendarHierarchy {
        &self.data.hierarchy
    }

    fn collect(
        &self,
        occurrences: impl Fn(&crate::definition::HolidayRule) -> Vec<NaiveDate>,
    ) -> Vec<Holiday> {
        let mut holidays: Vec<Holiday> = self
            .data
            .rules
            .iter()
            .flat_map(|rule| {
                occurrences(rule).into_iter().map(move |date| Holiday {
                    date,
                    holiday_type: rule.holiday_type,
                    properties_key: rule.properties_key.clone(),
                    description: rule.description.clone(),
                })
            })
            .collect();
        holidays.sort_by(|a, b| {
            a.date.cmp(&b.date).then_with(|| a.properties_key.cmp(&b.properties_key))
        });
        holidays
    }
}

/// Registry of calendar managers with construction-on-miss caching.
///
/// Thread-safe and cheap to share; handlers call [`HolidayManager::lookup`]
/// per request.
#[derive(Debug)]
pub struct HolidayManager {
    data_dir: PathBuf,
    cache: Cache<String, Arc<CalendarManager>>,
}

impl HolidayManager {
    #[must_use]
    pub fn new(config: &CalendarsConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            cache: Cache::new(config.cache_capacity),
        }
    }

    /// Resolves the manager for `calendar_id`, loading and caching it on
    /// first use.
    ///
    /// # Errors
    /// [`CalendarError::UnknownCalendar`] if no definition file exists,
    /// [`CalendarError::InvalidCalendarId`] for ids outside
    /// `[A-Za-z0-9._-]`, and definition errors when the file is unreadable
    /// or malformed.
    pub fn lookup(&self, calendar_id: &str) -> Result<Arc<CalendarManager>, CalendarError> {
        validate_calendar_id(calendar_id)?;

        self.cache
            .try_get_with(calendar_id.to_owned(), || self.load(calendar_id))
            .map_err(|shared: Arc<CalendarError>| (*shared).clone())
    }

    fn load(&self, calendar_id: &str) -> Result<Arc<CalendarManager>, CalendarError> {
        let path = self.data_dir.join(format!("{calendar_id}.toml"));
        let display = path.display().to_string();

        if !path.is_file() {
            return Err(CalendarError::UnknownCalendar(calendar_id.to_owned()));
        }

        let text = std::fs::read_to_string(&path).map_err(|e| CalendarError::DefinitionIo {
            path: display.clone(),
            detail: e.to_string(),
        })?;

        let data =
            CalendarDefinition::parse(&text, &display)?.compile(calendar_id, &display)?;

        debug!(calendar = calendar_id, rules = data.rules.len(), "Loaded calendar definition");

        Ok(Arc::new(CalendarManager { id: calendar_id.to_owned(), data }))
    }
}

/// Calendar ids double as file stems; keep them to a safe charset so a
/// request can never address anything outside the data directory.
fn validate_calendar_id(id: &str) -> Result<(), CalendarError> {
    let safe = !id.is_empty()
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        && !id.starts_with('.');
    if safe { Ok(()) } else { Err(CalendarError::InvalidCalendarId(id.to_owned())) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_id_charset_is_enforced() {
        assert!(validate_calendar_id("de").is_ok());
        assert!(validate_calendar_id("de_by-1.x").is_ok());
        assert!(validate_calendar_id("").is_err());
        assert!(validate_calendar_id("../etc/passwd").is_err());
        assert!(validate_calendar_id("de/by").is_err());
        assert!(validate_calendar_id(".hidden").is_err());
    }
}
