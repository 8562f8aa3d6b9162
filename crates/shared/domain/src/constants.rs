//! Shared string constants (OpenAPI tags, wire defaults).

/// OpenAPI tag for system endpoints (health, docs).
pub const SYSTEM_TAG: &str = "System";
/// OpenAPI tag for calendar endpoints.
pub const CALENDARS_TAG: &str = "Calendars";

/// Locale used when a request carries no usable `Accept-Language`.
pub const FALLBACK_LOCALE: &str = "en";
