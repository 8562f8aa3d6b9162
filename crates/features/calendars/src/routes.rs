//! HTTP resources for `/calendars/{calendar}`.
//!
//! Thin layer only: parse and validate request parameters, delegate to the
//! calendar manager, map domain values to wire DTOs. All validation happens
//! before the manager is consulted.

use crate::Calendars;
use crate::locale::negotiate;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{Datelike, NaiveDate};
use hhub_domain::constants::CALENDARS_TAG;
use hhub_domain::hierarchy::CalendarHierarchy;
use hhub_domain::holiday::Holiday;
use hhub_kernel::server::{ApiError, ApiQuery, ApiState, ErrorBody};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Textual date format for `from`/`until` query parameters.
const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(get_holidays)).routes(routes!(get_structure))
}

/// Query parameters for the holiday listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct HolidaysQuery {
    /// Year to list holidays for; defaults to the current year.
    /// Ignored when a complete `from`/`until` range is supplied.
    pub year: Option<i32>,
    /// Range start, inclusive, `dd.MM.yyyy`. Requires `until`.
    pub from: Option<String>,
    /// Range end, inclusive, `dd.MM.yyyy`. Requires `from`.
    pub until: Option<String>,
}

impl HolidaysQuery {
    /// Validates the range invariant: both bounds or neither, parseable,
    /// `from <= until`.
    fn resolve_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>, ApiError> {
        match (self.from.as_deref(), self.until.as_deref()) {
            (None, None) => Ok(None),
            (Some(from), Some(until)) => {
                let from = parse_date("from", from)?;
                let until = parse_date("until", until)?;
                if until < from {
                    return Err(ApiError::BadRequest(
                        "'until' must not precede 'from'".to_owned(),
                    ));
                }
                Ok(Some((from, until)))
            },
            _ => Err(ApiError::BadRequest(
                "Both 'from' and 'until' must be supplied together".to_owned(),
            )),
        }
    }
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ApiError::BadRequest(format!("Invalid '{name}' date '{value}', expected dd.MM.yyyy"))
    })
}

/// Content-derived holiday identifier: uppercase-hex SHA-256 of the
/// properties key. Stable across calls and processes.
fn content_id(properties_key: &str) -> String {
    hex::encode_upper(Sha256::digest(properties_key.as_bytes()))
}

/// A holiday occurrence on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDto {
    /// Content-derived identifier (uppercase hex).
    pub id: String,
    /// ISO-8601 date (`YYYY-MM-DD`).
    pub date: String,
    /// Holiday type name (`FIXED`, `MOVABLE`).
    #[serde(rename = "type")]
    pub holiday_type: String,
    /// Locale-resolved description.
    pub description: String,
}

impl HolidayDto {
    fn from_holiday(holiday: &Holiday, locale: &str) -> Self {
        Self {
            id: content_id(&holiday.properties_key),
            date: holiday.date.format("%Y-%m-%d").to_string(),
            holiday_type: holiday.holiday_type.to_string(),
            description: holiday.description_for(locale).to_owned(),
        }
    }
}

/// A calendar hierarchy node on the wire. `children` is omitted for leaves.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyDto {
    pub id: String,
    /// Locale-resolved description.
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub children: Option<Vec<HierarchyDto>>,
}

impl HierarchyDto {
    /// Structural recursion over the tree; children serialize in the
    /// node's native (key) order.
    fn from_node(node: &CalendarHierarchy, locale: &str) -> Self {
        let children = if node.is_leaf() {
            None
        } else {
            Some(node.children.values().map(|child| Self::from_node(child, locale)).collect())
        };
        Self {
            id: node.id.clone(),
            description: node.description_for(locale).to_owned(),
            children,
        }
    }
}

#[utoipa::path(
    get,
    path = "/calendars/{calendar}/holidays",
    params(
        ("calendar" = String, Path, description = "Calendar identifier"),
        HolidaysQuery,
    ),
    responses(
        (status = OK, description = "Holidays of the calendar, sorted by date", body = [HolidayDto]),
        (status = BAD_REQUEST, description = "Malformed date, partial or inverted range", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown calendar", body = ErrorBody),
    ),
    tag = CALENDARS_TAG,
)]
async fn get_holidays(
    State(state): State<ApiState>,
    Path(calendar): Path<String>,
    ApiQuery(query): ApiQuery<HolidaysQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<HolidayDto>>, ApiError> {
    let slice = state.try_get_slice::<Calendars>()?;
    let range = query.resolve_range()?;

    let manager = slice.manager.lookup(&calendar)?;
    let locale = negotiate(&headers, &slice.default_locale);

    let holidays = match range {
        Some((from, until)) => manager.holidays_between(from, until),
        None => {
            let year = query.year.unwrap_or_else(|| chrono::Local::now().year());
            manager.holidays_in_year(year)
        },
    };

    Ok(Json(holidays.iter().map(|h| HolidayDto::from_holiday(h, &locale)).collect()))
}

#[utoipa::path(
    get,
    path = "/calendars/{calendar}/structure",
    params(("calendar" = String, Path, description = "Calendar identifier")),
    responses(
        (status = OK, description = "Calendar hierarchy tree", body = HierarchyDto),
        (status = NOT_FOUND, description = "Unknown calendar", body = ErrorBody),
    ),
    tag = CALENDARS_TAG,
)]
async fn get_structure(
    State(state): State<ApiState>,
    Path(calendar): Path<String>,
    headers: HeaderMap,
) -> Result<Json<HierarchyDto>, ApiError> {
    let slice = state.try_get_slice::<Calendars>()?;
    let manager = slice.manager.lookup(&calendar)?;
    let locale = negotiate(&headers, &slice.default_locale);

    Ok(Json(HierarchyDto::from_node(manager.hierarchy(), &locale)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hhub_domain::hierarchy::CalendarHierarchy;
    use hhub_domain::locale::LocalizedText;

    fn query(year: Option<i32>, from: Option<&str>, until: Option<&str>) -> HolidaysQuery {
        HolidaysQuery {
            year,
            from: from.map(str::to_owned),
            until: until.map(str::to_owned),
        }
    }

    #[test]
    fn content_id_is_deterministic_uppercase_hex() {
        let first = content_id("CHRISTMAS");
        let second = content_id("CHRISTMAS");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_ne!(first, content_id("NEW_YEAR"));
    }

    #[test]
    fn valid_range_resolves_inclusively() {
        let range = query(None, Some("01.01.2024"), Some("31.12.2024"))
            .resolve_range()
            .unwrap()
            .unwrap();
        assert_eq!(range.0, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(range.1, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn equal_bounds_are_a_valid_range() {
        assert!(
            query(None, Some("25.12.2024"), Some("25.12.2024")).resolve_range().unwrap().is_some()
        );
    }

    #[test]
    fn partial_range_is_rejected() {
        assert!(query(None, Some("01.01.2024"), None).resolve_range().is_err());
        assert!(query(None, None, Some("01.01.2024")).resolve_range().is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err =
            query(None, Some("31.12.2024"), Some("01.01.2024")).resolve_range().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn malformed_date_text_is_rejected() {
        assert!(query(None, Some("2024-01-01"), Some("31.12.2024")).resolve_range().is_err());
        assert!(query(None, Some("32.01.2024"), Some("31.12.2024")).resolve_range().is_err());
    }

    #[test]
    fn range_resolution_disregards_year() {
        let range = query(Some(2030), Some("01.12.2024"), Some("31.12.2024"))
            .resolve_range()
            .unwrap()
            .unwrap();
        assert_eq!(range.0, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(range.1, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn absent_range_resolves_to_none() {
        assert!(query(Some(2024), None, None).resolve_range().unwrap().is_none());
    }

    #[test]
    fn hierarchy_dto_omits_children_for_leaves() {
        let mut root = CalendarHierarchy::new("de", LocalizedText::new("Germany"));
        root.children
            .insert("by".to_owned(), CalendarHierarchy::new("by", LocalizedText::new("Bavaria")));

        let dto = HierarchyDto::from_node(&root, "en");
        let children = dto.children.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "by");
        assert!(children[0].children.is_none());
    }
}
