use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{HTTP_TIMEOUT_SECS, PER_PAGE};
use crate::error::{AppError, Result};
use crate::types::{Currency, MarketRecord};

pub fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?)
}

/// Fetch one page of market records from the provider, ordered by descending
/// market cap, with all four windowed change fields requested. Non-success
/// statuses and unparseable bodies come back as errors; the caller collapses
/// both into the single retryable user notice.
pub async fn fetch_market_data(
    client: &reqwest::Client,
    api_url: &str,
    currency: Currency,
    page: u32,
) -> Result<Vec<MarketRecord>> {
    let url = format!(
        "{api_url}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={PER_PAGE}&page={page}&sparkline=false&price_change_percentage=1h,24h,7d,30d",
        currency.code(),
    );

    let resp = client.get(&url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(AppError::Status(status));
    }

    let body = resp.text().await?;
    let records: Vec<MarketRecord> = serde_json::from_str(&body)?;
    debug!(count = records.len(), %currency, page, "market data fetched");

    Ok(validate_records(records))
}

/// Boundary validation: serde has already shaped the records; anything with
/// an empty id is structurally unusable and dropped here so consumers never
/// re-check.
pub fn validate_records(records: Vec<MarketRecord>) -> Vec<MarketRecord> {
    let before = records.len();
    let records: Vec<MarketRecord> = records.into_iter().filter(|r| !r.id.is_empty()).collect();
    let dropped = before - records.len();
    if dropped > 0 {
        warn!(dropped, "dropped records with empty id");
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 5098972,
            "market_cap": 100604808698995,
            "market_cap_rank": 1,
            "total_volume": 2623908353747,
            "price_change_percentage_1h_in_currency": 0.074,
            "price_change_percentage_24h_in_currency": 1.39,
            "price_change_percentage_7d_in_currency": -2.16,
            "price_change_percentage_30d_in_currency": 10.2
        },
        {
            "id": "tether",
            "symbol": "usdt",
            "name": "Tether",
            "current_price": 83.1,
            "market_cap": null,
            "market_cap_rank": 3,
            "total_volume": null,
            "price_change_percentage_1h_in_currency": null,
            "price_change_percentage_24h_in_currency": 0.01
        }
    ]"#;

    #[test]
    fn parses_provider_payload_with_optional_fields() {
        let records: Vec<MarketRecord> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);

        let btc = &records[0];
        assert_eq!(btc.id, "bitcoin");
        assert_eq!(btc.current_price, Some(5_098_972.0));
        assert_eq!(btc.change_7d, Some(-2.16));

        let usdt = &records[1];
        assert_eq!(usdt.market_cap, None);
        assert_eq!(usdt.change_1h, None);
        assert_eq!(usdt.change_24h, Some(0.01));
        // Fields missing from the payload entirely, not just null.
        assert_eq!(usdt.change_30d, None);
        assert_eq!(usdt.image, "");
    }

    #[test]
    fn malformed_payload_is_a_json_error() {
        let err = serde_json::from_str::<Vec<MarketRecord>>("{\"not\": \"an array\"}")
            .map_err(AppError::from)
            .unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn empty_id_records_are_dropped_at_the_boundary() {
        let mut records: Vec<MarketRecord> = serde_json::from_str(SAMPLE).unwrap();
        records[1].id = String::new();
        let kept = validate_records(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "bitcoin");
    }
}
