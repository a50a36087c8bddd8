//! Dashboard Deep-Links
//!
//! Builds links into the status dashboard for each event granularity. Every
//! link covers a lookback window starting three days before the event.
//! Group links use calendar dates; finer links use zulu timestamps and end
//! one hour after the event.

use crate::error::SchemaError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Zulu timestamp format used by events and links
pub const ZULU_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Calendar-date format used by group links
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days of history shown before the event
const LOOKBACK_DAYS: i64 = 3;

/// Hours shown after the event
const LOOKAHEAD_HOURS: i64 = 1;

/// Lookback window for a group link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Lookback window for service, endpoint, and metric links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Parse a zulu timestamp
pub fn parse_timestamp(timestamp: &str) -> Result<NaiveDateTime, SchemaError> {
    NaiveDateTime::parse_from_str(timestamp, ZULU_FORMAT).map_err(|_| invalid(timestamp))
}

fn invalid(timestamp: &str) -> SchemaError {
    SchemaError::InvalidTimestamp {
        field: "ts_monitored",
        value: timestamp.to_string(),
    }
}

fn days_before(dt: NaiveDateTime, timestamp: &str) -> Result<NaiveDateTime, SchemaError> {
    dt.checked_sub_signed(Duration::days(LOOKBACK_DAYS))
        .ok_or_else(|| invalid(timestamp))
}

/// Window from three calendar days before the event to the event's date
pub fn date_window(timestamp: &str) -> Result<DateWindow, SchemaError> {
    let dt = parse_timestamp(timestamp)?;
    Ok(DateWindow {
        start: days_before(dt, timestamp)?.date(),
        end: dt.date(),
    })
}

/// Window from the start of day three days back to one hour past the event
pub fn time_window(timestamp: &str) -> Result<TimeWindow, SchemaError> {
    let dt = parse_timestamp(timestamp)?;
    let start = days_before(dt, timestamp)?.date().and_time(NaiveTime::MIN);
    let end = dt
        .checked_add_signed(Duration::hours(LOOKAHEAD_HOURS))
        .ok_or_else(|| invalid(timestamp))?;
    Ok(TimeWindow { start, end })
}

/// Link to the group timeline page
pub fn group_url(
    ui_endpoint: &str,
    report: &str,
    timestamp: &str,
    group: &str,
) -> Result<String, SchemaError> {
    let window = date_window(timestamp)?;
    Ok(format!(
        "https://{}/lavoisier/status_report-site?site={}&start={}&end={}&report={}&accept=html",
        ui_endpoint,
        group,
        window.start.format(DATE_FORMAT),
        window.end.format(DATE_FORMAT),
        report
    ))
}

/// Link to the service timeline page of a group
pub fn service_url(
    ui_endpoint: &str,
    report: &str,
    timestamp: &str,
    group: &str,
) -> Result<String, SchemaError> {
    let window = time_window(timestamp)?;
    Ok(format!(
        "https://{}/lavoisier/status_report-sf?site={}&start_date={}&end_date={}&report={}&accept=html",
        ui_endpoint,
        group,
        window.start.format(ZULU_FORMAT),
        window.end.format(ZULU_FORMAT),
        report
    ))
}

/// Link to the endpoint timeline page of a service
pub fn endpoint_url(
    ui_endpoint: &str,
    report: &str,
    timestamp: &str,
    group: &str,
    service: &str,
) -> Result<String, SchemaError> {
    let window = time_window(timestamp)?;
    Ok(format!(
        "http://{}/lavoisier/status_report-endpoints?site={}&service={}&start_date={}&end_date={}&report={}&accept=html",
        ui_endpoint,
        group,
        service,
        window.start.format(ZULU_FORMAT),
        window.end.format(ZULU_FORMAT),
        report
    ))
}

/// Link to the metric timeline page of an endpoint
pub fn metric_url(
    ui_endpoint: &str,
    report: &str,
    timestamp: &str,
    group: &str,
    service: &str,
    endpoint: &str,
) -> Result<String, SchemaError> {
    let window = time_window(timestamp)?;
    Ok(format!(
        "http://{}/lavoisier/status_report-metrics?site={}&service={}&endpoint={}&start_date={}&end_date={}&report={}&overview=mod&accept=html",
        ui_endpoint,
        group,
        service,
        endpoint,
        window.start.format(ZULU_FORMAT),
        window.end.format(ZULU_FORMAT),
        report
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TS: &str = "2018-04-24T13:35:33Z";

    #[test]
    fn test_group_url() {
        let url = group_url("ui.example.org", "Critical", TS, "SITE-A").unwrap();
        assert_eq!(
            url,
            "https://ui.example.org/lavoisier/status_report-site?site=SITE-A&start=2018-04-21&end=2018-04-24&report=Critical&accept=html"
        );
    }

    #[test]
    fn test_service_url() {
        let url = service_url("ui.example.org", "Critical", TS, "SITE-A").unwrap();
        assert_eq!(
            url,
            "https://ui.example.org/lavoisier/status_report-sf?site=SITE-A&start_date=2018-04-21T00:00:00Z&end_date=2018-04-24T14:35:33Z&report=Critical&accept=html"
        );
    }

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("ui.example.org", "Critical", TS, "SITE-A", "SRM").unwrap();
        assert_eq!(
            url,
            "http://ui.example.org/lavoisier/status_report-endpoints?site=SITE-A&service=SRM&start_date=2018-04-21T00:00:00Z&end_date=2018-04-24T14:35:33Z&report=Critical&accept=html"
        );
    }

    #[test]
    fn test_metric_url() {
        let url = metric_url(
            "ui.example.org",
            "Critical",
            TS,
            "SITE-A",
            "SRM",
            "se.example.org",
        )
        .unwrap();
        assert_eq!(
            url,
            "http://ui.example.org/lavoisier/status_report-metrics?site=SITE-A&service=SRM&endpoint=se.example.org&start_date=2018-04-21T00:00:00Z&end_date=2018-04-24T14:35:33Z&report=Critical&overview=mod&accept=html"
        );
    }

    #[test]
    fn test_window_crosses_midnight_and_month() {
        let window = time_window("2018-03-01T23:30:00Z").unwrap();
        assert_eq!(window.start.format(ZULU_FORMAT).to_string(), "2018-02-26T00:00:00Z");
        assert_eq!(window.end.format(ZULU_FORMAT).to_string(), "2018-03-02T00:30:00Z");
    }

    #[test]
    fn test_invalid_timestamp() {
        let err = group_url("ui", "r", "24/04/2018", "G").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTimestamp { .. }));
    }

    proptest! {
        #[test]
        fn prop_time_window_bounds(secs in 0i64..4_000_000_000i64) {
            let dt = chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc();
            let ts = dt.format(ZULU_FORMAT).to_string();
            let window = time_window(&ts).unwrap();
            prop_assert_eq!(window.end - dt, Duration::hours(1));
            prop_assert_eq!(window.start.time(), NaiveTime::MIN);
            prop_assert_eq!(dt.date() - window.start.date(), Duration::days(3));

            let dates = date_window(&ts).unwrap();
            prop_assert_eq!(dates.end, dt.date());
            prop_assert_eq!(dates.start, window.start.date());
        }
    }
}
