use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::interval;
use tracing::{info, warn};

use crate::config::REFRESH_INTERVAL_SECS;
use crate::error::Result;
use crate::fetcher::fetch_market_data;
use crate::types::{Currency, MarketRecord};

// ---------------------------------------------------------------------------
// Refresher — periodic + on-demand fetches feeding the UI loop
// ---------------------------------------------------------------------------

/// Fetch parameters published by the UI loop. Read at fire time so the timer
/// never acts on a stale capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchParams {
    pub currency: Currency,
    pub page: u32,
}

/// Manual refresh trigger ("refresh now" without a parameter change).
#[derive(Debug)]
pub struct RefreshNow;

/// Events delivered to the UI loop. `Started` drives the loading flag for
/// timer-initiated fetches the loop did not ask for itself.
#[derive(Debug)]
pub enum RefreshEvent {
    Started,
    Finished(FetchOutcome),
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub params: FetchParams,
    pub result: Result<Vec<MarketRecord>>,
}

/// Polls the provider every [`REFRESH_INTERVAL_SECS`] and on demand. Each
/// fetch runs on its own task so a slow response never delays the next
/// trigger; overlapping responses are allowed and the UI loop applies them
/// in arrival order (last write wins). A parameter change fires immediately
/// and resets the cadence.
pub struct Refresher {
    api_url: String,
    client: reqwest::Client,
    params_rx: watch::Receiver<FetchParams>,
    trigger_rx: mpsc::Receiver<RefreshNow>,
    event_tx: mpsc::Sender<RefreshEvent>,
}

impl Refresher {
    pub fn new(
        api_url: String,
        client: reqwest::Client,
        params_rx: watch::Receiver<FetchParams>,
        trigger_rx: mpsc::Receiver<RefreshNow>,
        event_tx: mpsc::Sender<RefreshEvent>,
    ) -> Self {
        Self { api_url, client, params_rx, trigger_rx, event_tx }
    }

    pub async fn run(mut self) {
        let mut ticker = interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
        // The first tick fires immediately and doubles as the bootstrap fetch.

        enum Fired {
            Tick,
            ParamsChanged(bool),
            Trigger(Option<RefreshNow>),
        }

        loop {
            let fired = tokio::select! {
                _ = ticker.tick() => Fired::Tick,
                changed = self.params_rx.changed() => Fired::ParamsChanged(changed.is_ok()),
                trigger = self.trigger_rx.recv() => Fired::Trigger(trigger),
            };

            match fired {
                Fired::Tick => self.spawn_fetch().await,
                Fired::ParamsChanged(true) => {
                    self.spawn_fetch().await;
                    ticker.reset();
                }
                Fired::ParamsChanged(false) | Fired::Trigger(None) => break, // UI loop gone
                Fired::Trigger(Some(RefreshNow)) => self.spawn_fetch().await,
            }
        }
        info!("refresher stopped");
    }

    async fn spawn_fetch(&self) {
        let params = *self.params_rx.borrow();
        if self.event_tx.send(RefreshEvent::Started).await.is_err() {
            return;
        }

        let client = self.client.clone();
        let api_url = self.api_url.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = fetch_market_data(&client, &api_url, params.currency, params.page).await;
            if let Err(e) = &result {
                warn!(currency = %params.currency, page = params.page, "fetch failed: {e}");
            }
            let outcome = FetchOutcome { params, result };
            // Send fails only when the UI loop is already gone.
            let _ = event_tx.send(RefreshEvent::Finished(outcome)).await;
        });
    }
}
