//! Parking spot table endpoints
//!
//! Spots are plain PostgREST rows; the client only ever reads them.

use crate::client::TacClient;
use crate::error::ApiResult;
use serde::Serialize;
use std::time::Duration;
use tac_geo::{spots_from_rows, ParkingSpot};
use tracing::debug;

/// Columns fetched for every spot row
const SPOT_COLUMNS: &str = "id,lat,lon";

/// Parking spot table interface
#[derive(Clone)]
pub struct SpotsApi {
    client: TacClient,
    table: String,
}

impl SpotsApi {
    /// Create a new spots API interface
    pub(crate) fn new(client: TacClient, table: String) -> Self {
        Self { client, table }
    }

    /// Table this interface reads from
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Fetch every spot row
    ///
    /// GET /rest/v1/<table>?select=id,lat,lon
    ///
    /// Rows without a usable position are skipped.
    pub async fn list(&self) -> ApiResult<Vec<ParkingSpot>> {
        let path = format!("{}?select={SPOT_COLUMNS}", self.table);
        let rows: Vec<serde_json::Value> = self.client.get(&path).await?;
        let fetched = rows.len();
        let spots = spots_from_rows(rows);
        debug!(table = %self.table, fetched, count = spots.len(), "Fetched spot rows");
        Ok(spots)
    }

    /// Probe the table with a single-row read
    ///
    /// GET /rest/v1/<table>?select=id&limit=1
    pub async fn ping(&self) -> ApiResult<TableStatus> {
        let path = format!("{}?select=id&limit=1", self.table);
        let (rows, response_time) = self.client.timed_get::<Vec<serde_json::Value>>(&path).await?;

        Ok(TableStatus {
            url: format!("{}/{}", self.client.rest_url().trim_end_matches('/'), self.table),
            response_time,
            has_rows: !rows.is_empty(),
        })
    }
}

/// Result of a reachability probe
#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    /// Table URL that was checked
    pub url: String,
    /// Response time
    pub response_time: Duration,
    /// Whether at least one row came back
    pub has_rows: bool,
}

#[cfg(test)]
mod tests {
    use crate::{ApiError, ClientConfig, TacClient};
    use httpmock::prelude::*;
    use serde_json::json;
    use tac_core::retry::RetryConfig;

    fn client_for(server: &MockServer) -> TacClient {
        let config = ClientConfig::development()
            .with_rest_url(server.url("/rest/v1"))
            .with_retry(RetryConfig::no_retry());
        TacClient::with_config(config).unwrap()
    }

    #[tokio::test]
    async fn test_list_maps_rows_to_spots() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/posto")
                .query_param("select", "id,lat,lon");
            then.status(200).json_body(json!([
                {"id": 1, "lat": 41.9001, "lon": 12.5001},
                {"id": 2, "lat": 42.0, "lon": 12.6}
            ]));
        });

        let spots = client_for(&server).spots("posto").list().await.unwrap();

        mock.assert();
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[0].id.as_str(), "1");
        assert_eq!(spots[1].location.longitude, 12.6);
    }

    #[tokio::test]
    async fn test_list_skips_rows_without_coordinates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/posto");
            then.status(200).json_body(json!([
                {"id": 1, "lat": 41.9001, "lon": 12.5001},
                {"id": 2, "lat": null, "lon": 12.5},
                {"id": 3, "lat": 42.0}
            ]));
        });

        let spots = client_for(&server).spots("posto").list().await.unwrap();
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].id.as_str(), "1");
    }

    #[tokio::test]
    async fn test_list_rejects_non_array_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/v1/posto");
            then.status(200).json_body(json!({"message": "not rows"}));
        });

        let err = client_for(&server).spots("posto").list().await.unwrap_err();
        assert!(matches!(err, ApiError::Json(_)));
    }

    #[tokio::test]
    async fn test_ping_reports_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/rest/v1/posto")
                .query_param("limit", "1");
            then.status(200).json_body(json!([{"id": 1}]));
        });

        let status = client_for(&server).spots("posto").ping().await.unwrap();
        assert!(status.has_rows);
        assert!(status.url.ends_with("/rest/v1/posto"));
    }
}
