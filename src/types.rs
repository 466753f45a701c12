use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

// ---------------------------------------------------------------------------
// MarketRecord
// ---------------------------------------------------------------------------

/// One asset's snapshot as returned by the `/coins/markets` endpoint.
/// Every numeric field may be absent — `None` means "not available", never 0.
/// Records are immutable once received; a fresh fetch replaces the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub image: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<f64>,
    pub total_volume: Option<f64>,
    #[serde(rename = "price_change_percentage_1h_in_currency")]
    pub change_1h: Option<f64>,
    #[serde(rename = "price_change_percentage_24h_in_currency")]
    pub change_24h: Option<f64>,
    #[serde(rename = "price_change_percentage_7d_in_currency")]
    pub change_7d: Option<f64>,
    #[serde(rename = "price_change_percentage_30d_in_currency")]
    pub change_30d: Option<f64>,
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// The five quote currencies the viewer supports. Codes outside this set are
/// rejected at the boundary; inside the program an unknown currency is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Inr,
    Usd,
    Eur,
    Gbp,
    Jpy,
}

pub const CURRENCIES: [Currency; 5] = [
    Currency::Inr,
    Currency::Usd,
    Currency::Eur,
    Currency::Gbp,
    Currency::Jpy,
];

impl Currency {
    /// Lowercase code used in the provider query string.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "inr",
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Gbp => "gbp",
            Currency::Jpy => "jpy",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        CURRENCIES
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| AppError::Config(format!("unsupported currency code: {code}")))
    }

    /// Next currency in selector order, wrapping around.
    pub fn next(self) -> Self {
        let idx = CURRENCIES.iter().position(|&c| c == self).unwrap_or(0);
        CURRENCIES[(idx + 1) % CURRENCIES.len()]
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// TimeWindow
// ---------------------------------------------------------------------------

/// Percentage-change horizon. Resolves to one of the four windowed change
/// fields on `MarketRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    H1,
    H24,
    D7,
    D30,
}

pub const TIME_WINDOWS: [TimeWindow; 4] =
    [TimeWindow::H1, TimeWindow::H24, TimeWindow::D7, TimeWindow::D30];

impl TimeWindow {
    /// The windowed percentage-change value for `record`.
    pub fn change(self, record: &MarketRecord) -> Option<f64> {
        match self {
            TimeWindow::H1 => record.change_1h,
            TimeWindow::H24 => record.change_24h,
            TimeWindow::D7 => record.change_7d,
            TimeWindow::D30 => record.change_30d,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::H1 => "1h",
            TimeWindow::H24 => "24h",
            TimeWindow::D7 => "7d",
            TimeWindow::D30 => "30d",
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        TIME_WINDOWS
            .iter()
            .copied()
            .find(|w| w.label() == label)
            .ok_or_else(|| AppError::Config(format!("unsupported time window: {label}")))
    }

    /// Next window in selector order, wrapping around.
    pub fn next(self) -> Self {
        let idx = TIME_WINDOWS.iter().position(|&w| w == self).unwrap_or(0);
        TIME_WINDOWS[(idx + 1) % TIME_WINDOWS.len()]
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Sort spec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    MarketCapRank,
    Name,
    CurrentPrice,
    /// Windowed percentage change — resolved through the active `TimeWindow`.
    PriceChange,
    MarketCap,
    TotalVolume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Exactly one sort is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::MarketCapRank,
            direction: SortDirection::Ascending,
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortField::MarketCapRank => "rank",
            SortField::Name => "name",
            SortField::CurrentPrice => "price",
            SortField::PriceChange => "change",
            SortField::MarketCap => "market cap",
            SortField::TotalVolume => "volume",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_round_trips_through_code() {
        for c in CURRENCIES {
            assert_eq!(Currency::from_code(c.code()).unwrap(), c);
        }
        assert!(Currency::from_code("aud").is_err());
    }

    #[test]
    fn currency_cycle_visits_all_and_wraps() {
        let mut c = Currency::Inr;
        for expected in [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Jpy, Currency::Inr] {
            c = c.next();
            assert_eq!(c, expected);
        }
    }

    #[test]
    fn window_resolves_matching_field() {
        let record = MarketRecord {
            id: "bitcoin".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            image: String::new(),
            current_price: Some(100.0),
            market_cap: None,
            market_cap_rank: Some(1.0),
            total_volume: None,
            change_1h: Some(0.1),
            change_24h: Some(2.4),
            change_7d: Some(7.0),
            change_30d: None,
        };
        assert_eq!(TimeWindow::H1.change(&record), Some(0.1));
        assert_eq!(TimeWindow::H24.change(&record), Some(2.4));
        assert_eq!(TimeWindow::D7.change(&record), Some(7.0));
        assert_eq!(TimeWindow::D30.change(&record), None);
    }

    #[test]
    fn unknown_window_label_is_rejected() {
        assert!(TimeWindow::from_label("90d").is_err());
        assert_eq!(TimeWindow::from_label("7d").unwrap(), TimeWindow::D7);
    }
}
