use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Establishment filter value meaning "every establishment".
pub const ALL_ESTABLISHMENTS: &str = "Todos";

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Inclusive calendar-day range. `start <= end` is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// The whole parameter surface of the indicators engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicadoresFilters {
    pub date_range: DateRange,
    #[serde(default)]
    pub establishment_id: Option<String>,
}

impl IndicadoresFilters {
    pub fn new(date_range: DateRange, establishment_id: Option<&str>) -> Self {
        Self {
            date_range,
            establishment_id: establishment_id.map(|s| s.to_string()),
        }
    }

    /// Establishment to narrow by, or `None` when the filter is absent,
    /// empty or the "Todos" sentinel.
    pub fn establishment_scope(&self) -> Option<&str> {
        match self.establishment_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(id) if id == ALL_ESTABLISHMENTS => None,
            Some(id) => Some(id),
        }
    }
}

/// Query string of `GET .../indicadores`.
///
/// Dates stay raw here: the server and the remote client each parse them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicadoresQuery {
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub establishment_id: Option<String>,
}

impl IndicadoresQuery {
    pub fn from_filters(filters: &IndicadoresFilters) -> Self {
        Self {
            start_date: filters.date_range.start.format("%Y-%m-%d").to_string(),
            end_date: filters.date_range.end.format("%Y-%m-%d").to_string(),
            establishment_id: Some(
                filters
                    .establishment_scope()
                    .unwrap_or(ALL_ESTABLISHMENTS)
                    .to_string(),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    #[test]
    fn test_establishment_scope_sentinels() {
        assert_eq!(IndicadoresFilters::new(range(), None).establishment_scope(), None);
        assert_eq!(IndicadoresFilters::new(range(), Some("")).establishment_scope(), None);
        assert_eq!(
            IndicadoresFilters::new(range(), Some("Todos")).establishment_scope(),
            None
        );
        assert_eq!(
            IndicadoresFilters::new(range(), Some("EST-01")).establishment_scope(),
            Some("EST-01")
        );
    }

    #[test]
    fn test_query_from_filters() {
        let query = IndicadoresQuery::from_filters(&IndicadoresFilters::new(range(), None));
        assert_eq!(query.start_date, "2024-03-01");
        assert_eq!(query.end_date, "2024-03-31");
        assert_eq!(query.establishment_id.as_deref(), Some("Todos"));
    }

    #[test]
    fn test_trend_direction_wire_format() {
        assert_eq!(serde_json::to_string(&TrendDirection::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&TrendDirection::Down).unwrap(), "\"down\"");
    }
}
