use crate::config::MIN_COMPARE;
use crate::selection::{SelectionSet, ToggleOutcome};
use crate::types::{Currency, MarketRecord, SortDirection, SortField, SortSpec, TimeWindow};

// ---------------------------------------------------------------------------
// ViewState — everything the user can change, owned by the UI layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    Enabled,
    Disabled,
    /// Fewer than [`MIN_COMPARE`] records selected; mode stays off.
    RejectedTooFew,
}

/// Mutable view parameters. The derivation engine only reads this; all
/// mutation goes through the methods below so the comparison invariant
/// (active only while ≥2 selected) holds after every transition.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub search_term: String,
    pub sort: SortSpec,
    pub currency: Currency,
    pub time_window: TimeWindow,
    pub page: u32,
    pub selection: SelectionSet,
    pub comparison_active: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: SortSpec::default(),
            currency: Currency::Inr,
            time_window: TimeWindow::H24,
            page: 1,
            selection: SelectionSet::default(),
            comparison_active: false,
        }
    }
}

impl ViewState {
    /// Column-header sort trigger: a repeat click on the active ascending
    /// field flips to descending, anything else starts ascending.
    pub fn handle_sort(&mut self, field: SortField) {
        let direction = if self.sort.field == field
            && self.sort.direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort = SortSpec { field, direction };
    }

    pub fn toggle_selection(&mut self, record: &MarketRecord) -> ToggleOutcome {
        let outcome = self.selection.toggle(record);
        if self.selection.len() < MIN_COMPARE {
            self.comparison_active = false;
        }
        outcome
    }

    pub fn set_comparison_active(&mut self, requested: bool) -> CompareOutcome {
        if !requested {
            self.comparison_active = false;
            return CompareOutcome::Disabled;
        }
        if self.selection.len() < MIN_COMPARE {
            self.comparison_active = false;
            return CompareOutcome::RejectedTooFew;
        }
        self.comparison_active = true;
        CompareOutcome::Enabled
    }

    pub fn cycle_currency(&mut self) {
        self.currency = self.currency.next();
    }

    pub fn cycle_time_window(&mut self) {
        self.time_window = self.time_window.next();
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
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
    fn sort_trigger_toggles_direction_on_repeat() {
        let mut view = ViewState::default();
        view.handle_sort(SortField::MarketCap);
        assert_eq!(view.sort.field, SortField::MarketCap);
        assert_eq!(view.sort.direction, SortDirection::Ascending);

        view.handle_sort(SortField::MarketCap);
        assert_eq!(view.sort.direction, SortDirection::Descending);

        // Third click goes back to ascending (was not ascending).
        view.handle_sort(SortField::MarketCap);
        assert_eq!(view.sort.direction, SortDirection::Ascending);

        // Switching fields always starts ascending.
        view.handle_sort(SortField::MarketCap);
        view.handle_sort(SortField::Name);
        assert_eq!(view.sort.field, SortField::Name);
        assert_eq!(view.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn comparison_rejected_with_one_selected() {
        let mut view = ViewState::default();
        view.toggle_selection(&record("a"));
        assert_eq!(view.set_comparison_active(true), CompareOutcome::RejectedTooFew);
        assert!(!view.comparison_active);
    }

    #[test]
    fn comparison_enabled_with_two_selected() {
        let mut view = ViewState::default();
        view.toggle_selection(&record("a"));
        view.toggle_selection(&record("b"));
        assert_eq!(view.set_comparison_active(true), CompareOutcome::Enabled);
        assert!(view.comparison_active);
    }

    #[test]
    fn dropping_below_two_forces_comparison_off() {
        let mut view = ViewState::default();
        view.toggle_selection(&record("a"));
        view.toggle_selection(&record("b"));
        view.set_comparison_active(true);

        view.toggle_selection(&record("b"));
        assert!(!view.comparison_active);
    }

    #[test]
    fn disabling_always_succeeds() {
        let mut view = ViewState::default();
        assert_eq!(view.set_comparison_active(false), CompareOutcome::Disabled);
        assert!(!view.comparison_active);
    }

    #[test]
    fn page_never_goes_below_one() {
        let mut view = ViewState::default();
        view.prev_page();
        assert_eq!(view.page, 1);
        view.next_page();
        view.next_page();
        assert_eq!(view.page, 3);
        view.set_page(0);
        assert_eq!(view.page, 1);
    }
}
