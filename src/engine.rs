use std::cmp::Ordering;

use crate::types::{MarketRecord, SortDirection, SortField, SortSpec, TimeWindow};

// ---------------------------------------------------------------------------
// Derivation pipeline: raw batch → stable sort → filter
// ---------------------------------------------------------------------------

/// Produce the exact display sequence for one redraw: stable sort by the
/// active spec, then case-insensitive substring filter on name or symbol.
/// Pure over its inputs; recomputed from scratch whenever any input changes.
/// Filtering never reorders — sorting always precedes it.
pub fn derive<'a>(
    batch: &'a [MarketRecord],
    sort: SortSpec,
    window: TimeWindow,
    search_term: &str,
) -> Vec<&'a MarketRecord> {
    let mut records: Vec<&MarketRecord> = batch.iter().collect();
    records.sort_by(|a, b| compare(a, b, sort, window));
    records.retain(|r| matches_search(r, search_term));
    records
}

/// Numeric sort key for `field`. `PriceChange` resolves through the active
/// time window. `Name` has no numeric key and is compared separately.
fn sort_value(record: &MarketRecord, field: SortField, window: TimeWindow) -> Option<f64> {
    match field {
        SortField::MarketCapRank => record.market_cap_rank,
        SortField::CurrentPrice => record.current_price,
        SortField::PriceChange => window.change(record),
        SortField::MarketCap => record.market_cap,
        SortField::TotalVolume => record.total_volume,
        SortField::Name => None,
    }
}

fn compare(a: &MarketRecord, b: &MarketRecord, spec: SortSpec, window: TimeWindow) -> Ordering {
    if spec.field == SortField::Name {
        let ord = a.name.to_lowercase().cmp(&b.name.to_lowercase());
        return apply_direction(ord, spec.direction);
    }

    match (sort_value(a, spec.field, window), sort_value(b, spec.field, window)) {
        (None, None) => Ordering::Equal,
        // A record missing the sort field goes after any record that has it.
        // This is a fixed tie-break, not reversed by direction.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            apply_direction(ord, spec.direction)
        }
    }
}

fn apply_direction(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Case-insensitive substring match against name OR symbol.
/// An empty term matches everything.
fn matches_search(record: &MarketRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record.name.to_lowercase().contains(&needle)
        || record.symbol.to_lowercase().contains(&needle)
}
