use crate::selection::SelectionSet;
use crate::types::{Currency, MarketRecord, TimeWindow};

// ---------------------------------------------------------------------------
// Comparison projection — chart input, one row per selected record
// ---------------------------------------------------------------------------

/// Metric labels in the fixed row order.
pub const METRIC_LABELS: [&str; 4] =
    ["Current Price", "% Change", "Market Cap (B)", "Volume (B)"];

/// Numeric dataset for one selected record. `metrics` follow
/// [`METRIC_LABELS`]: current price (raw, currency-denominated), windowed
/// percentage change, market cap in billions, 24h volume in billions.
/// `None` entries mean the provider had no value.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    pub metrics: [Option<f64>; 4],
}

/// Project the selection into chart rows, in selection insertion order.
/// The windowed change falls back to the 24h field when the resolved field
/// is absent on that record.
pub fn project(
    selection: &SelectionSet,
    window: TimeWindow,
    currency: Currency,
) -> Vec<ComparisonRow> {
    selection.iter().map(|r| row(r, window, currency)).collect()
}

fn row(record: &MarketRecord, window: TimeWindow, currency: Currency) -> ComparisonRow {
    let change = window.change(record).or(record.change_24h);
    ComparisonRow {
        id: record.id.clone(),
        name: record.name.clone(),
        currency,
        metrics: [
            record.current_price,
            change,
            record.market_cap.map(|v| v / 1e9),
            record.total_volume.map(|v| v / 1e9),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, price: f64, cap: f64, volume: f64) -> MarketRecord {
        MarketRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            symbol: id.to_string(),
            image: String::new(),
            current_price: Some(price),
            market_cap: Some(cap),
            market_cap_rank: None,
            total_volume: Some(volume),
            change_1h: None,
            change_24h: Some(1.5),
            change_7d: Some(-3.0),
            change_30d: None,
        }
    }

    #[test]
    fn metrics_are_in_fixed_order_and_scaled() {
        let mut selection = SelectionSet::default();
        selection.toggle(&record("btc", 100.0, 5e9, 2e9));

        let rows = project(&selection, TimeWindow::D7, Currency::Usd);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].metrics, [Some(100.0), Some(-3.0), Some(5.0), Some(2.0)]);
    }

    #[test]
    fn rows_follow_selection_order_not_sort_order() {
        let mut selection = SelectionSet::default();
        selection.toggle(&record("zec", 10.0, 1e9, 1e8));
        selection.toggle(&record("ada", 500.0, 9e9, 1e9));

        let rows = project(&selection, TimeWindow::H24, Currency::Inr);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["zec", "ada"]);
    }

    #[test]
    fn absent_window_falls_back_to_24h() {
        let mut r = record("btc", 100.0, 5e9, 2e9);
        r.change_30d = None;
        r.change_24h = Some(1.5);
        let mut selection = SelectionSet::default();
        selection.toggle(&r);

        let rows = project(&selection, TimeWindow::D30, Currency::Usd);
        assert_eq!(rows[0].metrics[1], Some(1.5));
    }

    #[test]
    fn absent_everywhere_stays_none() {
        let mut r = record("btc", 100.0, 5e9, 2e9);
        r.change_30d = None;
        r.change_24h = None;
        let mut selection = SelectionSet::default();
        selection.toggle(&r);

        let rows = project(&selection, TimeWindow::D30, Currency::Usd);
        assert_eq!(rows[0].metrics[1], None);
    }
}
