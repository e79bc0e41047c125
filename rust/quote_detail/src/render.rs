// src/render.rs

use log::warn;
use std::fmt;

use crate::catalog::Catalog;
use crate::models::QuotePayload;

pub const HEADER_TITLE: &str = "Details";
pub const SEARCH_PLACEHOLDER: &str = "Search stocks";

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStyle {
    Positive,
    Negative,
}

impl ChangeStyle {
    // Unparseable input is treated as a loss, the same as a NaN comparison would
    pub fn for_percent(value: Option<f64>) -> Self {
        match value {
            Some(v) if v >= 0.0 => ChangeStyle::Positive,
            _ => ChangeStyle::Negative,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Detail(Box<DetailScreen>),
}

impl Screen {
    pub fn is_loading(&self) -> bool {
        matches!(self, Screen::Loading)
    }

    pub fn detail(&self) -> Option<&DetailScreen> {
        match self {
            Screen::Detail(detail) => Some(&**detail),
            Screen::Loading => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailScreen {
    pub header: Header,
    pub summary: Summary,
    pub chart: Chart,
    pub about: About,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: &'static str,
    pub search_text: String,
    pub search_placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub logo: Option<String>,
    pub symbol: String,
    /// Price with exactly two decimals, no currency sign.
    pub price: String,
    pub change_percent: String,
    pub change_style: ChangeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub labels: Vec<String>,
    pub closes: Vec<f64>,
    pub range: Option<(f64, f64)>,
}

impl Chart {
    /// One block glyph per close, scaled between the lowest and highest close.
    pub fn sparkline(&self) -> String {
        let Some((lo, hi)) = self.range else {
            return String::new();
        };
        let span = hi - lo;
        let top = (SPARK_GLYPHS.len() - 1) as f64;
        self.closes
            .iter()
            .map(|close| {
                if span <= 0.0 || !span.is_finite() {
                    return SPARK_GLYPHS[0];
                }
                let idx = (((close - lo) / span) * top).round().clamp(0.0, top) as usize;
                SPARK_GLYPHS[idx]
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct About {
    pub title: String,
    pub description: String,
    pub industry: String,
    pub sector: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// Formats a price the way the summary shows it: two decimals, raw text when
/// the service sent something that is not a number.
pub fn format_price(raw: &str, parsed: Option<f64>) -> String {
    match parsed {
        Some(value) => format!("{value:.2}"),
        None => {
            warn!("Price {raw:?} is not numeric, showing it verbatim");
            raw.to_string()
        }
    }
}

/// Builds the detail screen for `symbol` out of a resolved payload.
///
/// `symbol` drives the catalog lookups; the summary title comes from the quote
/// itself.
pub fn detail_screen(symbol: &str, search_text: &str, payload: &QuotePayload, catalog: &Catalog) -> DetailScreen {
    let quote = &payload.global_quote;
    let series = &payload.time_series_daily;

    let price = format_price(&quote.price, quote.price_value().ok());
    let change_style = ChangeStyle::for_percent(quote.change_percent_value().ok());

    let (labels, closes): (Vec<String>, Vec<f64>) = series.closes().into_iter().unzip();

    // The 52-week cells carry the quote's daily low/high
    let fields = vec![
        Field { label: "52-Week Low", value: quote.low.clone() },
        Field { label: "Current Price", value: quote.price.clone() },
        Field { label: "52-Week High", value: quote.high.clone() },
        Field { label: "Open", value: quote.open.clone() },
        Field { label: "Volume", value: quote.volume.clone() },
        Field { label: "Latest Trading Day", value: quote.latest_trading_day.clone() },
        Field { label: "Previous Close", value: quote.previous_close.clone() },
        Field { label: "Change", value: quote.change.clone() },
        Field { label: "Change Percent", value: quote.change_percent.clone() },
    ];

    DetailScreen {
        header: Header {
            title: HEADER_TITLE,
            search_text: search_text.to_string(),
            search_placeholder: SEARCH_PLACEHOLDER,
        },
        summary: Summary {
            logo: catalog.logo(symbol).map(str::to_string),
            symbol: quote.symbol.clone(),
            price,
            change_percent: quote.change_percent.clone(),
            change_style,
        },
        chart: Chart {
            labels,
            closes,
            range: series.close_range(),
        },
        about: About {
            title: format!("About {}", quote.symbol),
            description: catalog.description(symbol).to_string(),
            industry: catalog.industry(symbol).to_string(),
            sector: catalog.sector(symbol).to_string(),
        },
        fields,
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Loading => writeln!(f, "Loading..."),
            Screen::Detail(detail) => write!(f, "{detail}"),
        }
    }
}

impl fmt::Display for DetailScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let search = if self.header.search_text.is_empty() {
            self.header.search_placeholder
        } else {
            self.header.search_text.as_str()
        };
        writeln!(f, "< {}    [{}]", self.header.title, search)?;
        writeln!(f)?;

        let marker = match self.summary.change_style {
            ChangeStyle::Positive => '▲',
            ChangeStyle::Negative => '▼',
        };
        match &self.summary.logo {
            Some(logo) => writeln!(f, "[{}] {}", logo, self.summary.symbol)?,
            None => writeln!(f, "{}", self.summary.symbol)?,
        }
        writeln!(f, "${}  {} {}", self.summary.price, marker, self.summary.change_percent)?;
        writeln!(f)?;

        if let (Some(first), Some(last)) = (self.chart.labels.first(), self.chart.labels.last()) {
            writeln!(f, "{}", self.chart.sparkline())?;
            writeln!(f, "{first} .. {last}")?;
            if let Some((lo, hi)) = self.chart.range {
                writeln!(f, "close {lo:.2} - {hi:.2}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", self.about.title)?;
        writeln!(f, "{}", self.about.description)?;
        writeln!(f, "Industry: {}  Sector: {}", self.about.industry, self.about.sector)?;
        writeln!(f)?;

        for field in &self.fields {
            writeln!(f, "{:<20} {}", format!("{}:", field.label), field.value)?;
        }
        Ok(())
    }
}
