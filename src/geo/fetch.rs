use std::time::Duration;

use reqwest::Client;

use crate::foundation::error::{FxError, FxResult};
use crate::geo::land::LandCollection;

/// Environment variable that replaces the configured land dataset URL.
pub const LAND_URL_ENV: &str = "ORPHTA_LAND_URL";

/// HTTP client for the land fetch. No overall timeout unless `timeout` is set.
pub fn build_client(timeout: Option<Duration>) -> FxResult<Client> {
    let mut builder =
        Client::builder().user_agent(format!("orphta-fx/{}", env!("CARGO_PKG_VERSION")));
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder
        .build()
        .map_err(|e| FxError::fetch(format!("build http client: {e}")))
}

/// One unauthenticated GET of a GeoJSON land collection. No retries.
#[tracing::instrument(skip(client))]
pub async fn fetch_land(client: &Client, url: &str) -> FxResult<LandCollection> {
    tracing::info!("fetching land data");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FxError::fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, "land data request failed");
        return Err(FxError::fetch(format!("unexpected status {status}")));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| FxError::fetch(format!("read body: {e}")))?;
    let land = LandCollection::from_json_slice(&body)?;
    tracing::info!(features = land.features.len(), "land data loaded");
    Ok(land)
}
