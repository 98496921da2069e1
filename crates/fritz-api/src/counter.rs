// Online counter (`netCnt`)
//
// The counter page is HTML. Its numbers live in an inline script line of
// the form `const data = {...};`, which is cut out and decoded as JSON.
// Byte counters are split into 32-bit High/Low halves.

use serde::Deserialize;

use crate::error::Error;
use crate::lenient;
use crate::page::names;

const DATA_PREFIX: &str = "const data = ";

const BYTES_PER_MB: u64 = 1_000_000;

/// Counter periods the page reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    LastMonth,
}

impl Period {
    pub const ALL: [Self; 5] = [
        Self::Today,
        Self::Yesterday,
        Self::ThisWeek,
        Self::ThisMonth,
        Self::LastMonth,
    ];

    /// Key of the period in the embedded object.
    pub fn key(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::ThisWeek => "ThisWeek",
            Self::ThisMonth => "ThisMonth",
            Self::LastMonth => "LastMonth",
        }
    }
}

/// Raw byte counters for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CounterPeriod {
    #[serde(default, deserialize_with = "lenient::u64_from_any")]
    pub bytes_sent_high: u64,
    #[serde(default, deserialize_with = "lenient::u64_from_any")]
    pub bytes_sent_low: u64,
    #[serde(default, deserialize_with = "lenient::u64_from_any")]
    pub bytes_received_high: u64,
    #[serde(default, deserialize_with = "lenient::u64_from_any")]
    pub bytes_received_low: u64,
}

impl CounterPeriod {
    /// Derived megabyte totals for this period.
    pub fn traffic(&self) -> Traffic {
        let outgoing = mb(self.bytes_sent_high, self.bytes_sent_low);
        let incoming = mb(self.bytes_received_high, self.bytes_received_low);
        Traffic {
            total: outgoing + incoming,
            outgoing,
            incoming,
        }
    }
}

/// Decimal megabytes (10^6 bytes) per direction, plus their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Traffic {
    pub total: u64,
    pub outgoing: u64,
    pub incoming: u64,
}

/// The object assigned to `data` on the counter page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CounterData {
    #[serde(default)]
    pub today: Option<CounterPeriod>,
    #[serde(default)]
    pub yesterday: Option<CounterPeriod>,
    #[serde(default)]
    pub this_week: Option<CounterPeriod>,
    #[serde(default)]
    pub this_month: Option<CounterPeriod>,
    #[serde(default)]
    pub last_month: Option<CounterPeriod>,
}

impl CounterData {
    pub fn period(&self, period: Period) -> Option<&CounterPeriod> {
        match period {
            Period::Today => self.today.as_ref(),
            Period::Yesterday => self.yesterday.as_ref(),
            Period::ThisWeek => self.this_week.as_ref(),
            Period::ThisMonth => self.this_month.as_ref(),
            Period::LastMonth => self.last_month.as_ref(),
        }
    }
}

/// Rebuild a 64-bit byte count from its halves and round it to decimal MB.
pub fn mb(high: u64, low: u64) -> u64 {
    let bytes = u128::from(high) * (1u128 << 32) + u128::from(low);
    let rounded = (bytes + u128::from(BYTES_PER_MB / 2)) / u128::from(BYTES_PER_MB);
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

/// Cut the `const data = …;` literal out of the counter page.
///
/// Only the first line starting with the prefix counts.
pub fn extract_data_literal(html: &str) -> Result<&str, Error> {
    let literal = html
        .lines()
        .find_map(|line| line.strip_prefix(DATA_PREFIX))
        .ok_or_else(|| page_format(format!("no line starting with `{DATA_PREFIX}`")))?
        .trim_end();
    Ok(literal.strip_suffix(';').unwrap_or(literal))
}

/// Parse the counter page into its per-period counters.
pub fn parse_counter_page(html: &str) -> Result<CounterData, Error> {
    let literal = extract_data_literal(html)?;
    serde_json::from_str(literal).map_err(|e| page_format(format!("invalid data literal: {e}")))
}

fn page_format(reason: String) -> Error {
    Error::PageFormat {
        page: names::NET_COUNTER.into(),
        reason,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE: &str = "<!DOCTYPE html>\n<html><body>\n<script>\nconst data = {\"Today\":{\"BytesSentHigh\":\"0\",\"BytesSentLow\":\"1000000\"}};\nconst data = {\"Today\":{\"BytesSentHigh\":\"9\"}};\n</script>\n</body></html>\n";

    #[test]
    fn mb_rebuilds_high_and_low_halves() {
        assert_eq!(mb(1, 0), 4295);
        assert_eq!(mb(0, 0), 0);
        assert_eq!(mb(0, 1_000_000), 1);
        assert_eq!(mb(0, 1_499_999), 1);
        assert_eq!(mb(0, 1_500_000), 2);
    }

    #[test]
    fn absent_fields_count_as_zero() {
        assert_eq!(CounterPeriod::default().traffic(), Traffic::default());
    }

    #[test]
    fn parses_first_data_line() {
        let data = parse_counter_page(PAGE).unwrap();
        let today = data.period(Period::Today).unwrap();
        assert_eq!(
            today,
            &CounterPeriod {
                bytes_sent_high: 0,
                bytes_sent_low: 1_000_000,
                ..CounterPeriod::default()
            }
        );
        assert_eq!(
            today.traffic(),
            Traffic {
                total: 1,
                outgoing: 1,
                incoming: 0
            }
        );
        assert!(data.period(Period::Yesterday).is_none());
    }

    #[test]
    fn tolerates_crlf_and_numbers() {
        let page = "x\r\nconst data = {\"Yesterday\":{\"BytesReceivedHigh\":1,\"BytesReceivedLow\":0}};\r\n";
        let data = parse_counter_page(page).unwrap();
        assert_eq!(data.period(Period::Yesterday).unwrap().traffic().incoming, 4295);
    }

    #[test]
    fn missing_line_is_a_page_format_error() {
        let err = parse_counter_page("<html>  const data = {};</html>").unwrap_err();
        assert!(matches!(err, Error::PageFormat { ref page, .. } if page == "netCnt"));
    }

    #[test]
    fn malformed_literal_is_a_page_format_error() {
        let err = parse_counter_page("const data = {Today: oops};").unwrap_err();
        assert!(matches!(err, Error::PageFormat { .. }));
    }

    #[test]
    fn period_keys_match_page() {
        let keys: Vec<_> = Period::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(keys, ["Today", "Yesterday", "ThisWeek", "ThisMonth", "LastMonth"]);
    }
}
