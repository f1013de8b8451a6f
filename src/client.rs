//! Radarr v3 API client
//!
//! The workflow consumes the API through the [`ReleaseSource`] trait so tests
//! and alternative backends can inject their own implementation;
//! [`RadarrClient`] is the production implementation over `reqwest`.

use crate::config::RadarrConfig;
use crate::error::{Error, Result};
use crate::types::{MovieId, Release};
use async_trait::async_trait;
use url::Url;

/// Capability to list candidate releases and issue grab commands
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the candidate releases for a movie
    ///
    /// Returns a fresh list per call; an empty list is a valid response and
    /// it is the caller's job to decide whether to retry.
    async fn get_releases(&self, movie_id: MovieId) -> Result<Vec<Release>>;

    /// Push a release to Radarr's download client by guid and indexer id
    ///
    /// Returns whether the grab was accepted. A rejected grab is `Ok(false)`;
    /// transport and server-side failures are errors.
    async fn grab_release(&self, guid: &str, indexer_id: i64) -> Result<bool>;
}

/// HTTP client for the Radarr v3 API
#[derive(Clone, Debug)]
pub struct RadarrClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl RadarrClient {
    /// Create a client from connection settings
    pub fn new(config: &RadarrConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL '{}': {}", config.base_url, e),
            key: Some("radarr.base_url".into()),
        })?;

        // A trailing slash keeps Url::join from clobbering a path prefix
        // (e.g. a reverse-proxied "/radarr")
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| Error::Config {
            message: format!("invalid API path '{}': {}", path, e),
            key: Some("radarr.base_url".into()),
        })
    }
}

#[async_trait]
impl ReleaseSource for RadarrClient {
    async fn get_releases(&self, movie_id: MovieId) -> Result<Vec<Release>> {
        let url = self.endpoint("api/v3/release")?;

        tracing::debug!(movie_id = %movie_id, "requesting release list");
        let response = self
            .http
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .query(&[("movieId", movie_id.get())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Fetch {
                message: format!("Radarr returned status {status}: {body}"),
            });
        }

        let releases: Vec<Release> = response.json().await?;
        tracing::debug!(
            movie_id = %movie_id,
            count = releases.len(),
            "release list received"
        );
        Ok(releases)
    }

    async fn grab_release(&self, guid: &str, indexer_id: i64) -> Result<bool> {
        let url = self.endpoint("api/v3/release")?;
        let body = serde_json::json!({
            "guid": guid,
            "indexerId": indexer_id,
        });

        tracing::debug!(guid = %guid, indexer_id = indexer_id, "issuing grab command");
        let response = self
            .http
            .post(url)
            .header("X-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }

        // Client errors are Radarr refusing the grab; server errors are
        // failures of the command itself
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "grab command rejected");
            return Ok(false);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Grab {
            message: format!("Radarr returned status {status}: {body}"),
        })
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RadarrClient {
        RadarrClient::new(&RadarrConfig {
            base_url: server.uri(),
            api_key: "test-key".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn get_releases_parses_the_radarr_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/release"))
            .and(query_param("movieId", "7"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "guid": "release-1",
                    "indexerId": 2,
                    "title": "Movie.2024.1080p.BluRay.x264-GRP",
                    "customFormatScore": 40,
                    "seeders": 12
                }
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let releases = client.get_releases(MovieId::new(7)).await.unwrap();

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].guid.as_deref(), Some("release-1"));
        assert_eq!(releases[0].custom_format_score, Some(40));
    }

    #[tokio::test]
    async fn get_releases_maps_server_errors_to_fetch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/release"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.get_releases(MovieId::new(7)).await.unwrap_err();

        match err {
            Error::Fetch { message } => {
                assert!(message.contains("500"), "message was: {message}");
                assert!(message.contains("boom"));
            }
            other => panic!("expected Fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn grab_release_posts_guid_and_indexer_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v3/release"))
            .and(header("X-Api-Key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "guid": "release-1",
                "indexerId": 2
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let accepted = client.grab_release("release-1", 2).await.unwrap();
        assert!(accepted);
    }

    #[tokio::test]
    async fn grab_release_treats_client_errors_as_rejection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v3/release"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("release not grabbable"),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let accepted = client.grab_release("release-1", 2).await.unwrap();
        assert!(!accepted, "a 4xx response is a rejection, not an error");
    }

    #[tokio::test]
    async fn grab_release_maps_server_errors_to_grab() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v3/release"))
            .respond_with(ResponseTemplate::new(503).set_body_string("queue full"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.grab_release("release-1", 2).await.unwrap_err();

        match err {
            Error::Grab { message } => assert!(message.contains("503")),
            other => panic!("expected Grab error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn base_url_with_path_prefix_is_preserved() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/radarr/api/v3/release"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RadarrClient::new(&RadarrConfig {
            base_url: format!("{}/radarr", mock_server.uri()),
            api_key: "test-key".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let releases = client.get_releases(MovieId::new(1)).await.unwrap();
        assert!(releases.is_empty());
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = RadarrClient::new(&RadarrConfig {
            base_url: "not a url".into(),
            api_key: "key".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap_err();

        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("radarr.base_url")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
