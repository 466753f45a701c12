use crate::types::Currency;

// ---------------------------------------------------------------------------
// Currency values
// ---------------------------------------------------------------------------

/// Magnitude-suffixed currency string: `Some(1.23e9)` in USD → `"$1.23B"`,
/// `Some(999.0)` → `"$999.00"`, `None` → `"N/A"`. Rounding is half-up to two
/// decimals applied after scaling.
pub fn format_currency(value: Option<f64>, currency: Currency) -> String {
    let Some(v) = value else {
        return "N/A".to_string();
    };
    let symbol = currency.symbol();
    if v >= 1e9 {
        format!("{symbol}{:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{symbol}{:.2}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{symbol}{:.2}K", v / 1e3)
    } else {
        format!("{symbol}{v:.2}")
    }
}

// ---------------------------------------------------------------------------
// Percentage changes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// Display token for a windowed percentage change. `trend` is `None` only
/// for the neutral "N/A" case; zero counts as up.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeToken {
    pub trend: Option<Trend>,
    pub text: String,
}

impl ChangeToken {
    /// Indicator + text, e.g. `"↑ 5.00%"` or `"N/A"`.
    pub fn label(&self) -> String {
        match self.trend {
            Some(Trend::Up) => format!("↑ {}", self.text),
            Some(Trend::Down) => format!("↓ {}", self.text),
            None => self.text.clone(),
        }
    }
}

pub fn format_percent_change(value: Option<f64>) -> ChangeToken {
    match value {
        None => ChangeToken { trend: None, text: "N/A".to_string() },
        Some(v) => {
            let trend = if v >= 0.0 { Trend::Up } else { Trend::Down };
            ChangeToken {
                trend: Some(trend),
                text: format!("{:.2}%", v.abs()),
            }
        }
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billions_scale_with_suffix() {
        assert_eq!(format_currency(Some(1_234_567_890.0), Currency::Usd), "$1.23B");
    }

    #[test]
    fn millions_and_thousands_scale() {
        assert_eq!(format_currency(Some(2_500_000.0), Currency::Eur), "€2.50M");
        assert_eq!(format_currency(Some(12_345.0), Currency::Inr), "₹12.35K");
    }

    #[test]
    fn small_values_are_raw_two_decimals() {
        assert_eq!(format_currency(Some(999.0), Currency::Usd), "$999.00");
        assert_eq!(format_currency(Some(0.5), Currency::Jpy), "¥0.50");
    }

    #[test]
    fn absent_value_is_na_without_symbol() {
        assert_eq!(format_currency(None, Currency::Usd), "N/A");
    }

    #[test]
    fn negative_values_take_the_raw_branch() {
        assert_eq!(format_currency(Some(-5.0), Currency::Gbp), "£-5.00");
    }

    #[test]
    fn positive_change_is_up_with_absolute_value() {
        let token = format_percent_change(Some(5.0));
        assert_eq!(token.trend, Some(Trend::Up));
        assert_eq!(token.label(), "↑ 5.00%");
    }

    #[test]
    fn zero_change_counts_as_up() {
        let token = format_percent_change(Some(0.0));
        assert_eq!(token.trend, Some(Trend::Up));
        assert_eq!(token.text, "0.00%");
    }

    #[test]
    fn negative_change_is_down_with_absolute_value() {
        let token = format_percent_change(Some(-2.5));
        assert_eq!(token.trend, Some(Trend::Down));
        assert_eq!(token.label(), "↓ 2.50%");
    }

    #[test]
    fn absent_change_is_neutral_na() {
        let token = format_percent_change(None);
        assert_eq!(token.trend, None);
        assert_eq!(token.label(), "N/A");
    }
}
