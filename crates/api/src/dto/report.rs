use chrono::{DateTime, NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tollgate_domain::{Counts, StatsReport};

/// Query string of `GET /report`. Kept as raw strings so that parse errors
/// can be reported with a readable message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
    pub date: Option<String>,
}

impl ReportQuery {
    pub fn parse(&self) -> Result<(i64, NaiveDate), String> {
        let customer_id = self
            .customer_id
            .as_deref()
            .ok_or("Missing parameter: customerId")?
            .trim()
            .parse::<i64>()
            .map_err(|_| "Invalid parameter: customerId".to_string())?;

        let date = self
            .date
            .as_deref()
            .ok_or("Missing parameter: date")?
            .trim();
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| "Invalid parameter: date (expected YYYY-MM-DD)".to_string())?;

        Ok((customer_id, date))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountsResponse {
    pub requests: u64,
    pub invalid: u64,
}

impl From<Counts> for CountsResponse {
    fn from(counts: Counts) -> Self {
        Self {
            requests: counts.accepted,
            invalid: counts.rejected,
        }
    }
}

/// `hourly` is keyed by the ISO-8601 instant of the hour start; the fixed
/// format makes key order chronological.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportResponse {
    pub total: CountsResponse,
    pub hourly: BTreeMap<String, CountsResponse>,
}

impl From<&StatsReport> for ReportResponse {
    fn from(report: &StatsReport) -> Self {
        let hourly = report
            .hourly
            .iter()
            .filter_map(|h| {
                let instant = DateTime::from_timestamp(h.hour, 0)?;
                Some((
                    instant.to_rfc3339_opts(SecondsFormat::Secs, true),
                    h.counts.into(),
                ))
            })
            .collect();

        Self {
            total: report.total.into(),
            hourly,
        }
    }
}
