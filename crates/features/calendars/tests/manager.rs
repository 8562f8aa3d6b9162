use chrono::NaiveDate;
use hhub_calendars::{CalendarError, HolidayManager};
use hhub_domain::config::CalendarsConfig;
use std::path::Path;
use tempfile::TempDir;

const DE: &str = r#"
id = "de"
description = "Germany"

[[holidays]]
key = "NEW_YEAR"
month = 1
day = 1
description = "New Year's Day"

[[holidays]]
key = "CHRISTMAS"
month = 12
day = 25
description = "Christmas"
"#;

fn manager_for(dir: &Path) -> HolidayManager {
    let config = CalendarsConfig { data_dir: dir.to_path_buf(), ..CalendarsConfig::default() };
    HolidayManager::new(&config)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn lookup_loads_and_caches_the_calendar() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("de.toml"), DE).unwrap();

    let manager = manager_for(dir.path());
    let first = manager.lookup("de").unwrap();
    let second = manager.lookup("de").unwrap();

    assert_eq!(first.id(), "de");
    assert!(std::sync::Arc::ptr_eq(&first, &second), "second lookup must hit the cache");
}

#[test]
fn unknown_calendar_is_reported_by_id() {
    let dir = TempDir::new().unwrap();
    let manager = manager_for(dir.path());

    let err = manager.lookup("xx").unwrap_err();
    assert_eq!(err, CalendarError::UnknownCalendar("xx".to_owned()));
}

#[test]
fn year_query_materializes_recurring_rules() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("de.toml"), DE).unwrap();

    let holidays = manager_for(dir.path()).lookup("de").unwrap().holidays_in_year(2024);
    let dates: Vec<NaiveDate> = holidays.iter().map(|h| h.date).collect();
    assert_eq!(dates, [date(2024, 1, 1), date(2024, 12, 25)]);
}

#[test]
fn range_query_is_inclusive_and_spans_year_boundaries() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("de.toml"), DE).unwrap();

    let manager = manager_for(dir.path());
    let calendar = manager.lookup("de").unwrap();

    // Inclusive on both bounds.
    let exact = calendar.holidays_between(date(2024, 12, 25), date(2024, 12, 25));
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].properties_key, "CHRISTMAS");

    // Across a year boundary the January rule of the next year shows up.
    let span = calendar.holidays_between(date(2023, 12, 26), date(2024, 1, 2));
    let keys: Vec<&str> = span.iter().map(|h| h.properties_key.as_str()).collect();
    assert_eq!(keys, ["NEW_YEAR"]);
    assert_eq!(span[0].date, date(2024, 1, 1));

    // A multi-year range repeats recurring rules per covered year.
    let two_years = calendar.holidays_between(date(2023, 1, 1), date(2024, 12, 31));
    assert_eq!(two_years.len(), 4);
    assert!(two_years.windows(2).all(|w| w[0].date <= w[1].date), "sorted by date");
}

#[test]
fn initialization_errors_are_not_cached() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("de.toml");
    std::fs::write(&path, "id = ").unwrap();

    let manager = manager_for(dir.path());
    assert!(matches!(
        manager.lookup("de").unwrap_err(),
        CalendarError::DefinitionParse { .. }
    ));

    // Fixing the file must take effect on the next lookup.
    std::fs::write(&path, DE).unwrap();
    assert!(manager.lookup("de").is_ok());
}

#[test]
fn traversal_like_ids_never_reach_the_filesystem() {
    let dir = TempDir::new().unwrap();
    let manager = manager_for(dir.path());

    for id in ["..", "../de", "de/by", ""] {
        assert_eq!(
            manager.lookup(id).unwrap_err(),
            CalendarError::InvalidCalendarId(id.to_owned()),
            "id {id:?} must be rejected"
        );
    }
}
