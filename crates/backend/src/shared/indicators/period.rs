use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use contracts::domain::a001_sale_record::SaleRecord;
use contracts::shared::indicators::DateRange;

use super::metadata::key_or_sin_registro;

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Resolve an already-normalized timestamp to a wall-clock instant.
///
/// Offset timestamps keep the wall-clock time written in the string, so the
/// calendar day of a sale does not depend on the host time zone. Locale
/// formats (`15 de marzo`, `15/03/2024`) are rejected.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Calendar day of an ISO date or datetime query parameter.
pub fn parse_date_param(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date())
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59.999 of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

/// A record that passed the range filter, with its parsed emission instant.
#[derive(Debug, Clone, Copy)]
pub struct FilteredSale<'a> {
    pub record: &'a SaleRecord,
    pub emitted_at: NaiveDateTime,
}

impl FilteredSale<'_> {
    pub fn day(&self) -> NaiveDate {
        self.emitted_at.date()
    }
}

/// Emitted records inside `range` (day granularity, both ends inclusive),
/// optionally narrowed to one establishment. Records with unparseable
/// timestamps are left out.
pub fn filter_by_range<'a>(
    records: &'a [SaleRecord],
    range: &DateRange,
    establishment_id: Option<&str>,
) -> Vec<FilteredSale<'a>> {
    let lower = start_of_day(range.start);
    let upper = end_of_day(range.end);
    let mut unparseable = 0usize;

    let filtered: Vec<FilteredSale<'a>> = records
        .iter()
        .filter(|r| r.is_emitted())
        .filter(|r| {
            establishment_id.map_or(true, |id| key_or_sin_registro(&r.establishment_id) == id)
        })
        .filter_map(|r| match parse_timestamp(&r.emitted_at) {
            Some(ts) => Some(FilteredSale {
                record: r,
                emitted_at: ts,
            }),
            None => {
                unparseable += 1;
                None
            }
        })
        .filter(|s| s.emitted_at >= lower && s.emitted_at <= upper)
        .collect();

    if unparseable > 0 {
        tracing::debug!(
            "Indicators: skipped {} records with unparseable emittedAt",
            unparseable
        );
    }

    filtered
}

// ---------------------------------------------------------------------------
// Period shifter
// ---------------------------------------------------------------------------

/// Number of calendar days in `range`, never less than 1.
pub fn duration_days(range: &DateRange) -> i64 {
    (range.end.signed_duration_since(range.start).num_days() + 1).max(1)
}

/// The window of the same length that ends the day before `range` starts.
pub fn previous_period(range: &DateRange) -> DateRange {
    let days = duration_days(range);
    let previous_end = range
        .start
        .checked_sub_signed(Duration::days(1))
        .unwrap_or(range.start);
    let previous_start = previous_end
        .checked_sub_signed(Duration::days(days - 1))
        .unwrap_or(previous_end);

    DateRange::new(previous_start, previous_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_sale_record::SaleStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(id: &str, emitted_at: &str) -> SaleRecord {
        SaleRecord::emitted(id, emitted_at, "boleta", 10.0)
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = date(2024, 3, 15).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-15T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-15 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-15T10:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-15T10:30:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-15T10:30:00Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-15"),
            Some(date(2024, 3, 15).and_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-03-15T23:59:59.999"),
            Some(date(2024, 3, 15).and_hms_milli_opt(23, 59, 59, 999).unwrap())
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_locale_formats() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("15/03/2024"), None);
        assert_eq!(parse_timestamp("15 de marzo de 2024"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
    }

    #[test]
    fn test_offset_keeps_wall_clock_day() {
        // 23:30 in Lima is already the next day in UTC
        let ts = parse_timestamp("2024-03-15T23:30:00-05:00").unwrap();
        assert_eq!(ts.date(), date(2024, 3, 15));
    }

    #[test]
    fn test_filter_inclusive_day_bounds() {
        let records = vec![
            sale("before", "2024-03-09T23:59:59.999"),
            sale("start", "2024-03-10T00:00:00"),
            sale("end", "2024-03-12T23:59:59.999"),
            sale("after", "2024-03-13T00:00:00.000"),
        ];
        let range = DateRange::new(date(2024, 3, 10), date(2024, 3, 12));

        let ids: Vec<&str> = filter_by_range(&records, &range, None)
            .into_iter()
            .map(|s| s.record.id.as_str())
            .collect();
        assert_eq!(ids, vec!["start", "end"]);
    }

    #[test]
    fn test_filter_excludes_non_emitted_and_bad_dates() {
        let mut voided = sale("voided", "2024-03-10T10:00:00");
        voided.status = SaleStatus::Voided;
        let mut draft = sale("draft", "2024-03-10T10:00:00");
        draft.status = SaleStatus::Draft;
        let records = vec![
            voided,
            draft,
            sale("bad", "10 de marzo"),
            sale("ok", "2024-03-10T10:00:00"),
        ];
        let range = DateRange::day(date(2024, 3, 10));

        let filtered = filter_by_range(&records, &range, None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].record.id, "ok");
    }

    #[test]
    fn test_filter_by_establishment() {
        let mut a = sale("a", "2024-03-10T10:00:00");
        a.establishment_id = "EST-01".into();
        let mut b = sale("b", "2024-03-10T11:00:00");
        b.establishment_id = "EST-02".into();
        let records = vec![a, b];
        let range = DateRange::day(date(2024, 3, 10));

        let filtered = filter_by_range(&records, &range, Some("EST-02"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].record.id, "b");
        assert_eq!(filter_by_range(&records, &range, None).len(), 2);
    }

    #[test]
    fn test_filter_uses_establishment_grouping_key() {
        let mut padded = sale("padded", "2024-03-10T10:00:00");
        padded.establishment_id = " EST-01 ".into();
        let mut exact = sale("exact", "2024-03-10T11:00:00");
        exact.establishment_id = "EST-01".into();
        let unassigned = sale("unassigned", "2024-03-10T12:00:00");
        let records = vec![padded, exact, unassigned];
        let range = DateRange::day(date(2024, 3, 10));

        let ids: Vec<&str> = filter_by_range(&records, &range, Some("EST-01"))
            .into_iter()
            .map(|s| s.record.id.as_str())
            .collect();
        assert_eq!(ids, vec!["padded", "exact"]);

        let ids: Vec<&str> = filter_by_range(&records, &range, Some("Sin registro"))
            .into_iter()
            .map(|s| s.record.id.as_str())
            .collect();
        assert_eq!(ids, vec!["unassigned"]);
    }

    #[test]
    fn test_filter_empty_input() {
        let range = DateRange::day(date(2024, 3, 10));
        assert!(filter_by_range(&[], &range, None).is_empty());
    }

    #[test]
    fn test_previous_period_same_length_no_gap() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31));
        let prev = previous_period(&range);
        assert_eq!(prev, DateRange::new(date(2024, 1, 30), date(2024, 2, 29)));
        assert_eq!(duration_days(&prev), duration_days(&range));
    }

    #[test]
    fn test_previous_period_single_day() {
        let prev = previous_period(&DateRange::day(date(2024, 3, 1)));
        assert_eq!(prev, DateRange::day(date(2024, 2, 29)));
    }

    #[test]
    fn test_previous_period_inverted_range_uses_one_day() {
        let range = DateRange::new(date(2024, 3, 10), date(2024, 3, 5));
        assert_eq!(duration_days(&range), 1);
        assert_eq!(previous_period(&range), DateRange::day(date(2024, 3, 9)));
    }
}
