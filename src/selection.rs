use crate::config::MAX_SELECTED;
use crate::types::MarketRecord;

// ---------------------------------------------------------------------------
// SelectionSet — bounded, insertion-ordered set of chosen records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The set already holds [`MAX_SELECTED`] records; nothing changed.
    /// The caller surfaces a notice.
    RejectedFull,
}

/// Records chosen for highlighting and comparison. Membership is by `id`;
/// order is selection order. Holds full snapshots so a record that drops out
/// of a later batch (pagination, re-ranking) keeps feeding the comparison.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    records: Vec<MarketRecord>,
}

impl SelectionSet {
    pub fn toggle(&mut self, record: &MarketRecord) -> ToggleOutcome {
        if let Some(pos) = self.records.iter().position(|r| r.id == record.id) {
            self.records.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.records.len() >= MAX_SELECTED {
            return ToggleOutcome::RejectedFull;
        }
        self.records.push(record.clone());
        ToggleOutcome::Added
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &MarketRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> MarketRecord {
        MarketRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            symbol: id.to_string(),
            image: String::new(),
            current_price: Some(1.0),
            market_cap: None,
            market_cap_rank: None,
            total_volume: None,
            change_1h: None,
            change_24h: None,
            change_7d: None,
            change_30d: None,
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = SelectionSet::default();
        assert_eq!(set.toggle(&record("btc")), ToggleOutcome::Added);
        assert!(set.contains("btc"));
        assert_eq!(set.toggle(&record("btc")), ToggleOutcome::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn fifth_record_is_rejected_and_set_untouched() {
        let mut set = SelectionSet::default();
        for id in ["a", "b", "c", "d"] {
            assert_eq!(set.toggle(&record(id)), ToggleOutcome::Added);
        }
        assert_eq!(set.toggle(&record("e")), ToggleOutcome::RejectedFull);
        assert_eq!(set.len(), 4);
        let ids: Vec<&str> = set.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn repeated_toggling_never_exceeds_bound() {
        let mut set = SelectionSet::default();
        for round in 0..3 {
            for id in ["a", "b", "c", "d", "e"] {
                set.toggle(&record(id));
                assert!(set.len() <= 4, "round {round}: size {}", set.len());
            }
        }
    }

    #[test]
    fn insertion_order_survives_removal() {
        let mut set = SelectionSet::default();
        for id in ["a", "b", "c"] {
            set.toggle(&record(id));
        }
        set.toggle(&record("b"));
        set.toggle(&record("d"));
        let ids: Vec<&str> = set.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "d"]);
    }
}
