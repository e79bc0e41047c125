// src/models.rs

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::QuoteError;

// Custom function to convert a JSON string to f64
fn string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<f64>().map_err(serde::de::Error::custom)
}

// Optional bar fields never fail the payload: missing or unusable text is None
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match &value {
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    if parsed.is_none() && value.is_some() {
        debug!("Ignoring unusable bar value {value:?}");
    }
    Ok(parsed.filter(|v| v.is_finite()))
}

fn opt_string_to_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_number(deserializer)
}

// Volumes sometimes come through as "1200.0"
fn opt_string_to_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .filter(|v| v.fract() == 0.0 && *v >= i64::MIN as f64 && *v <= i64::MAX as f64)
        .map(|v| v as i64))
}

// Numbers go back out as strings so a payload re-parses the same way
fn f64_to_string<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.to_string())
}

fn opt_to_string<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: serde::Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_none(),
    }
}

// Date-keyed JSON object -> map ordered by date
fn date_keyed_series<'de, D>(deserializer: D) -> Result<BTreeMap<NaiveDate, DailyBar>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, DailyBar>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, bar)| {
            NaiveDate::parse_from_str(&key, DATE_FORMAT)
                .map(|date| (date, bar))
                .map_err(|e| <D::Error as serde::de::Error>::custom(format!("invalid date key {key:?}: {e}")))
        })
        .collect()
}

fn serialize_date_keyed<S>(series: &BTreeMap<NaiveDate, DailyBar>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    // Newest first, the way the quote service sends it
    let mut map = serializer.serialize_map(Some(series.len()))?;
    for (date, bar) in series.iter().rev() {
        map.serialize_entry(&date.format(DATE_FORMAT).to_string(), bar)?;
    }
    map.end()
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a quote field that may carry a trailing percent sign ("-1.23%").
pub fn parse_quote_number(field: &'static str, raw: &str) -> Result<f64, QuoteError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    number.trim().parse::<f64>().map_err(|_| QuoteError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Snapshot of a security's latest trading statistics.
///
/// Every value is kept exactly as the quote service sent it; numeric views are
/// parsed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDetail {
    #[serde(rename = "01. symbol")]
    pub symbol: String,

    #[serde(rename = "02. open")]
    pub open: String,

    #[serde(rename = "03. high")]
    pub high: String,

    #[serde(rename = "04. low")]
    pub low: String,

    #[serde(rename = "05. price")]
    pub price: String,

    #[serde(rename = "06. volume")]
    pub volume: String,

    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: String,

    #[serde(rename = "08. previous close")]
    pub previous_close: String,

    #[serde(rename = "09. change")]
    pub change: String,

    #[serde(rename = "10. change percent")]
    pub change_percent: String,
}

impl QuoteDetail {
    pub fn price_value(&self) -> Result<f64, QuoteError> {
        parse_quote_number("05. price", &self.price)
    }

    pub fn change_percent_value(&self) -> Result<f64, QuoteError> {
        parse_quote_number("10. change percent", &self.change_percent)
    }
}

// Struct for the stock prices for each date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open", default, deserialize_with = "opt_string_to_f64", serialize_with = "opt_to_string", skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,

    #[serde(rename = "2. high", default, deserialize_with = "opt_string_to_f64", serialize_with = "opt_to_string", skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,

    #[serde(rename = "3. low", default, deserialize_with = "opt_string_to_f64", serialize_with = "opt_to_string", skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,

    #[serde(rename = "4. close", deserialize_with = "string_to_f64", serialize_with = "f64_to_string")]
    pub close: f64,

    #[serde(rename = "5. volume", default, deserialize_with = "opt_string_to_i64", serialize_with = "opt_to_string", skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,
}

/// Daily bars keyed by trading day, held in ascending date order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    bars: BTreeMap<NaiveDate, DailyBar>,
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        date_keyed_series(deserializer).map(|bars| TimeSeries { bars })
    }
}

impl Serialize for TimeSeries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_date_keyed(&self.bars, serializer)
    }
}

impl TimeSeries {
    pub fn from_bars<I>(bars: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, DailyBar)>,
    {
        TimeSeries { bars: bars.into_iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars oldest first.
    pub fn ascending(&self) -> impl Iterator<Item = (&NaiveDate, &DailyBar)> {
        self.bars.iter()
    }

    /// Closing prices oldest first, labelled with their trading day.
    pub fn closes(&self) -> Vec<(String, f64)> {
        self.bars
            .iter()
            .map(|(date, bar)| (date.format(DATE_FORMAT).to_string(), bar.close))
            .collect()
    }

    /// Lowest and highest close in the series, `None` when empty.
    pub fn close_range(&self) -> Option<(f64, f64)> {
        self.bars.values().map(|bar| bar.close).fold(None, |acc, close| match acc {
            None => Some((close, close)),
            Some((lo, hi)) => Some((lo.min(close), hi.max(close))),
        })
    }
}

// Struct for the overall response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    pub global_quote: QuoteDetail,
    pub time_series_daily: TimeSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"
    {
        "globalQuote": {
            "01. symbol": "AAPL",
            "02. open": "150.0000",
            "03. high": "152.3000",
            "04. low": "149.1000",
            "05. price": "150.5",
            "06. volume": "48332843",
            "07. latest trading day": "2024-01-03",
            "08. previous close": "151.9000",
            "09. change": "-1.4000",
            "10. change percent": "-0.9217%"
        },
        "timeSeriesDaily": {
            "2024-01-03": { "1. open": "150.0", "2. high": "152.3", "3. low": "149.1", "4. close": "150.5", "5. volume": "100" },
            "2024-01-02": { "4. close": "151.9" },
            "2024-01-01": { "4. close": "148.2" }
        }
    }"#;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_payload_parses_quote_fields_verbatim() {
        let payload: QuotePayload = serde_json::from_str(PAYLOAD).unwrap();

        assert_eq!(payload.global_quote.symbol, "AAPL");
        assert_eq!(payload.global_quote.price, "150.5");
        assert_eq!(payload.global_quote.volume, "48332843");
        assert_eq!(payload.global_quote.change_percent, "-0.9217%");
        assert_eq!(payload.time_series_daily.len(), 3);
    }

    #[test]
    fn test_series_is_ascending_by_date() {
        let payload: QuotePayload = serde_json::from_str(PAYLOAD).unwrap();
        let labels: Vec<String> = payload
            .time_series_daily
            .closes()
            .into_iter()
            .map(|(label, _)| label)
            .collect();

        assert_eq!(labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_optional_bar_fields() {
        let payload: QuotePayload = serde_json::from_str(PAYLOAD).unwrap();
        let bars: Vec<_> = payload.time_series_daily.ascending().collect();

        assert_eq!(bars[0].1.open, None);
        assert_eq!(bars[0].1.close, 148.2);
        assert_eq!(bars[2].1.high, Some(152.3));
        assert_eq!(bars[2].1.volume, Some(100));
    }

    #[test]
    fn test_close_range() {
        let series = TimeSeries::from_bars(vec![
            (date("2024-01-01"), DailyBar { open: None, high: None, low: None, close: 3.0, volume: None }),
            (date("2024-01-02"), DailyBar { open: None, high: None, low: None, close: 1.0, volume: None }),
            (date("2024-01-03"), DailyBar { open: None, high: None, low: None, close: 2.0, volume: None }),
        ]);

        assert_eq!(series.close_range(), Some((1.0, 3.0)));
        assert_eq!(TimeSeries::default().close_range(), None);
    }

    #[test]
    fn test_bad_date_key_is_rejected() {
        let body = r#"{ "not-a-date": { "4. close": "1.0" } }"#;
        assert!(serde_json::from_str::<TimeSeries>(body).is_err());
    }

    #[test]
    fn test_unusable_optional_fields_are_dropped() {
        let body = r#"{
            "2024-01-01": { "4. close": "1.0", "5. volume": "1200.0" },
            "2024-01-02": { "1. open": "", "2. high": "n/a", "3. low": "0.9", "4. close": "1.1", "5. volume": "12.5" }
        }"#;
        let series: TimeSeries = serde_json::from_str(body).unwrap();
        let bars: Vec<_> = series.ascending().map(|(_, bar)| bar.clone()).collect();

        assert_eq!(bars[0].close, 1.0);
        assert_eq!(bars[0].volume, Some(1200));
        assert_eq!(bars[1].open, None);
        assert_eq!(bars[1].high, None);
        assert_eq!(bars[1].low, Some(0.9));
        assert_eq!(bars[1].volume, None);
        assert_eq!(series.closes().len(), 2);
    }

    #[test]
    fn test_bad_close_is_rejected() {
        let body = r#"{ "2024-01-01": { "4. close": "abc" } }"#;
        assert!(serde_json::from_str::<TimeSeries>(body).is_err());
    }

    #[test]
    fn test_parse_quote_number() {
        assert_eq!(parse_quote_number("p", "150.5").unwrap(), 150.5);
        assert_eq!(parse_quote_number("p", "-1.23%").unwrap(), -1.23);
        assert_eq!(parse_quote_number("p", "0.00%").unwrap(), 0.0);
        assert!(matches!(
            parse_quote_number("p", "n/a"),
            Err(QuoteError::InvalidNumber { field: "p", .. })
        ));
    }

    #[test]
    fn test_payload_reserializes_identically() {
        let payload: QuotePayload = serde_json::from_str(PAYLOAD).unwrap();
        let json = serde_json::to_string(&payload).unwrap();
        let again: QuotePayload = serde_json::from_str(&json).unwrap();

        assert_eq!(payload, again);
    }
}
