//! Snapshots of known parking spots

use crate::error::RepositoryError;
use std::future::Future;
use std::path::{Path, PathBuf};
use tac_api_client::endpoints::SpotsApi;
use tac_api_client::TacClient;
use tac_geo::{spots_from_rows, ParkingSpot};
use tracing::{debug, instrument};

/// Source of parking spot snapshots.
///
/// Every call returns a fresh, complete snapshot; nothing is cached
/// between searches.
pub trait SpotRepository: Send + Sync {
    /// Fetch every known spot
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<ParkingSpot>, RepositoryError>> + Send;
}

/// Spots read from a Supabase table through the REST API.
#[derive(Clone)]
pub struct SupabaseSpotRepository {
    api: SpotsApi,
}

impl SupabaseSpotRepository {
    /// Repository over `table` using an existing client
    pub fn new(client: &TacClient, table: &str) -> Self {
        Self {
            api: client.spots(table),
        }
    }

    /// Table being read
    pub fn table(&self) -> &str {
        self.api.table()
    }
}

impl SpotRepository for SupabaseSpotRepository {
    async fn fetch_all(&self) -> Result<Vec<ParkingSpot>, RepositoryError> {
        Ok(self.api.list().await?)
    }
}

/// Spots read from a JSON array of `{id, lat, lon}` rows on disk.
///
/// Rows without a usable position are skipped; a file that is not a JSON
/// array fails with [`RepositoryError::Parse`].
#[derive(Debug, Clone)]
pub struct JsonFileSpotRepository {
    path: PathBuf,
}

impl JsonFileSpotRepository {
    /// Repository over the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpotRepository for JsonFileSpotRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_all(&self) -> Result<Vec<ParkingSpot>, RepositoryError> {
        let path = self.path.display().to_string();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| RepositoryError::Io {
                path: path.clone(),
                source,
            })?;
        let rows: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
            .map_err(|source| RepositoryError::Parse { path, source })?;
        let spots = spots_from_rows(rows);
        debug!(count = spots.len(), "Loaded spots from file");
        Ok(spots)
    }
}

/// A fixed snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpotRepository {
    spots: Vec<ParkingSpot>,
}

impl InMemorySpotRepository {
    /// Repository answering with `spots`
    pub fn new(spots: Vec<ParkingSpot>) -> Self {
        Self { spots }
    }
}

impl From<Vec<ParkingSpot>> for InMemorySpotRepository {
    fn from(spots: Vec<ParkingSpot>) -> Self {
        Self::new(spots)
    }
}

impl SpotRepository for InMemorySpotRepository {
    async fn fetch_all(&self) -> Result<Vec<ParkingSpot>, RepositoryError> {
        Ok(self.spots.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::io::Write;
    use tac_api_client::ClientConfig;
    use tac_core::retry::RetryConfig;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_supabase_rows_become_spots() {
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

        let config = ClientConfig::development()
            .with_rest_url(server.url("/rest/v1"))
            .with_retry(RetryConfig::no_retry());
        let client = TacClient::with_config(config).unwrap();
        let repo = SupabaseSpotRepository::new(&client, "posto");

        let spots = repo.fetch_all().await.unwrap();
        mock.assert();
        assert_eq!(repo.table(), "posto");
        assert_eq!(spots.len(), 2);
        assert_eq!(spots[0].id.as_str(), "1");
        assert_eq!(spots[1].location.longitude, 12.6);
    }

    #[tokio::test]
    async fn test_json_file_repository() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "a", "lat": 41.9, "lon": 12.5}}]"#).unwrap();

        let spots = JsonFileSpotRepository::new(file.path()).fetch_all().await.unwrap();
        assert_eq!(spots, vec![ParkingSpot::new("a", 41.9, 12.5)]);
    }

    #[tokio::test]
    async fn test_json_file_skips_rows_without_position() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":1,"lat":41.9001,"lon":12.5001}},{{"id":2,"lat":null,"lon":12.5}}]"#
        )
        .unwrap();

        let spots = JsonFileSpotRepository::new(file.path()).fetch_all().await.unwrap();
        assert_eq!(spots, vec![ParkingSpot::new(1i64, 41.9001, 12.5001)]);
    }

    #[tokio::test]
    async fn test_supabase_server_error_is_api_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/rest/v1/posto");
            then.status(500).body("internal error");
        });

        let config = ClientConfig::development()
            .with_rest_url(server.url("/rest/v1"))
            .with_retry(RetryConfig::no_retry());
        let client = TacClient::with_config(config).unwrap();

        let err = SupabaseSpotRepository::new(&client, "posto").fetch_all().await.unwrap_err();
        mock.assert();
        assert!(matches!(err, RepositoryError::Api(_)));
    }

    #[tokio::test]
    async fn test_json_file_errors() {
        let missing = JsonFileSpotRepository::new("/nonexistent/spots.json");
        assert!(matches!(
            missing.fetch_all().await,
            Err(RepositoryError::Io { .. })
        ));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();
        let malformed = JsonFileSpotRepository::new(file.path());
        assert!(matches!(
            malformed.fetch_all().await,
            Err(RepositoryError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_in_memory_returns_snapshot() {
        let repo = InMemorySpotRepository::from(vec![ParkingSpot::new(1i64, 41.9, 12.5)]);
        assert_eq!(repo.fetch_all().await.unwrap().len(), 1);
        assert!(InMemorySpotRepository::default().fetch_all().await.unwrap().is_empty());
    }
}
