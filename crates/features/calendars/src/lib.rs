//! Calendars feature slice.
//!
//! Exposes holiday calendars over REST: a holiday listing (by year or by
//! inclusive date range) and the calendar hierarchy, both scoped to a
//! `{calendar}` path parameter. The heavy lifting lives in the manager
//! registry; the HTTP layer parses, validates, and serializes.

mod definition;
mod error;
mod locale;
mod manager;
mod routes;

pub use crate::error::CalendarError;
pub use crate::manager::{CalendarManager, HolidayManager};
pub use crate::routes::{HierarchyDto, HolidayDto, router};

use hhub_domain::config::ApiConfig;
use hhub_domain::locale::normalize;
use hhub_kernel::registry::{FeatureSlice, InitializedSlice};
use std::any::Any;

/// Calendars feature state.
#[derive(Debug)]
pub struct Calendars {
    pub manager: HolidayManager,
    /// Locale used when a request negotiates none.
    pub default_locale: String,
}

impl FeatureSlice for Calendars {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the calendars feature.
///
/// # Errors
/// Currently infallible; kept fallible to match slice initialization across
/// the workspace.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, CalendarError> {
    let manager = HolidayManager::new(&config.calendars);

    tracing::info!(
        data_dir = %config.calendars.data_dir.display(),
        "Calendars slice initialized"
    );

    Ok(InitializedSlice::new(Calendars {
        manager,
        default_locale: normalize(&config.calendars.default_locale),
    }))
}
