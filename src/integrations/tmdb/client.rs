// src/integrations/tmdb/client.rs
//
// TMDB API Integration
//
// ARCHITECTURE:
// - REST client for the TMDB v3 API
// - Implements the CatalogSource port: catalog browsing, search,
//   favorites pagination, favorite mutations
// - Maps external payloads → domain types (wire structs stay private)
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Payloads are validated before they cross into the stores
// - All external API concerns (auth, endpoints, status mapping) live here

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{validate_page, MediaId, MediaItem, Page, QueryMode};
use crate::error::{SourceError, SourceResult};
use crate::source::CatalogSource;

/// TMDB client configuration
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub base_url: String,
    pub api_key: String,
    pub account_id: u64,
    pub timeout: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key: String::new(),
            account_id: 0,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Paged listing payload from TMDB
#[derive(Debug, Deserialize)]
struct PageDto {
    page: u32,
    results: Vec<MovieDto>,
    total_pages: u32,
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct MovieDto {
    id: u64,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f32>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

/// Status payload TMDB returns for mutations and errors
#[derive(Debug, Deserialize)]
struct StatusDto {
    #[allow(dead_code)] // Part of the TMDB status payload schema
    status_code: i32,
    status_message: String,
}

/// TMDB API Client
pub struct TmdbClient {
    config: TmdbConfig,
    http_client: Client,
}

impl TmdbClient {
    /// Create a client for the public TMDB API with default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(TmdbConfig {
            api_key: api_key.into(),
            ..TmdbConfig::default()
        })
    }

    /// Create a client with full control over endpoint, account and timeout
    pub fn with_config(config: TmdbConfig) -> Self {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    /// GET a paged listing and map it into the domain shape
    async fn fetch_listing(
        &self,
        path: &str,
        extra: &[(&str, String)],
        page: u32,
    ) -> SourceResult<Page> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut params: Vec<(&str, String)> = vec![
            ("api_key", self.config.api_key.clone()),
            ("page", page.to_string()),
        ];
        params.extend_from_slice(extra);

        let response = self.http_client.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Transport(format!(
                "TMDB returned status {} for {}",
                status, path
            )));
        }

        let dto: PageDto = response.json().await?;
        Self::map_page(dto)
    }

    // ========================================================================
    // INTERNAL: Payload Mapping
    // ========================================================================

    /// Map a TMDB page payload into the domain page, checking its invariants
    fn map_page(dto: PageDto) -> SourceResult<Page> {
        let page = Page {
            page_number: dto.page,
            items: dto.results.into_iter().map(Self::map_movie).collect(),
            total_pages: dto.total_pages,
            total_count: dto.total_results,
        };
        validate_page(&page)?;
        Ok(page)
    }

    fn map_movie(dto: MovieDto) -> MediaItem {
        let release_date = dto
            .release_date
            .as_deref()
            .and_then(Self::parse_release_date);

        MediaItem {
            id: dto.id,
            title: dto.title,
            release_date,
            rating: dto.vote_average,
            overview: dto.overview.filter(|text| !text.is_empty()),
            poster_path: dto.poster_path,
        }
    }

    /// Parse a release date, tolerating the empty string TMDB uses for unknown
    fn parse_release_date(raw: &str) -> Option<NaiveDate> {
        if raw.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(err) => {
                debug!("ignoring unparseable release date {raw:?}: {err}");
                None
            }
        }
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    async fn fetch_page(&self, mode: &QueryMode, page: u32) -> SourceResult<Page> {
        match mode {
            QueryMode::Browse => {
                debug!("fetching popular movies page {page}");
                self.fetch_listing("/movie/popular", &[], page).await
            }
            QueryMode::Search { text } => {
                debug!("searching movies {text:?} page {page}");
                self.fetch_listing("/search/movie", &[("query", text.clone())], page)
                    .await
            }
        }
    }

    async fn fetch_favorites_page(&self, page: u32) -> SourceResult<Page> {
        debug!("fetching favorite movies page {page}");
        let path = format!("/account/{}/favorite/movies", self.config.account_id);
        self.fetch_listing(&path, &[], page).await
    }

    async fn set_favorite(&self, id: MediaId, favorite: bool) -> SourceResult<()> {
        debug!("setting favorite={favorite} for movie {id}");
        let url = format!(
            "{}/account/{}/favorite",
            self.config.base_url, self.config.account_id
        );
        let body = json!({
            "media_type": "movie",
            "media_id": id,
            "favorite": favorite,
        });

        let response = self
            .http_client
            .post(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // TMDB explains refusals in a status payload; fall back to the HTTP
        // status line when the body is not one.
        let message = match response.json::<StatusDto>().await {
            Ok(status_dto) => status_dto.status_message,
            Err(_) => format!("HTTP {}", status),
        };
        Err(SourceError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TmdbClient::new("key123");
        assert_eq!(client.config.base_url, "https://api.themoviedb.org/3");
        assert_eq!(client.config.api_key, "key123");
        assert_eq!(client.config.account_id, 0);
    }

    #[test]
    fn test_client_with_config() {
        let client = TmdbClient::with_config(TmdbConfig {
            base_url: "http://localhost:9090/3".to_string(),
            api_key: "k".to_string(),
            account_id: 42,
            timeout: Duration::from_secs(5),
        });
        assert_eq!(client.config.base_url, "http://localhost:9090/3");
        assert_eq!(client.config.account_id, 42);
    }

    #[test]
    fn test_page_payload_maps_to_domain() {
        let dto: PageDto = serde_json::from_value(json!({
            "page": 1,
            "results": [
                {
                    "id": 603,
                    "title": "The Matrix",
                    "release_date": "1999-03-31",
                    "vote_average": 8.2,
                    "overview": "A hacker learns the truth.",
                    "poster_path": "/matrix.jpg"
                },
                {
                    "id": 604,
                    "title": "The Matrix Reloaded",
                    "release_date": "",
                    "overview": ""
                }
            ],
            "total_pages": 10,
            "total_results": 195
        }))
        .unwrap();

        let page = TmdbClient::map_page(dto).unwrap();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 10);
        assert_eq!(page.total_count, 195);
        assert_eq!(page.items.len(), 2);

        let matrix = &page.items[0];
        assert_eq!(matrix.id, 603);
        assert_eq!(
            matrix.release_date,
            Some(NaiveDate::from_ymd_opt(1999, 3, 31).unwrap())
        );
        assert_eq!(matrix.rating, Some(8.2));
        assert_eq!(matrix.poster_path.as_deref(), Some("/matrix.jpg"));

        // Empty strings mean unknown, not an error.
        let reloaded = &page.items[1];
        assert_eq!(reloaded.release_date, None);
        assert_eq!(reloaded.overview, None);
        assert_eq!(reloaded.rating, None);
    }

    #[test]
    fn test_unparseable_release_date_is_dropped() {
        assert_eq!(TmdbClient::parse_release_date(""), None);
        assert_eq!(TmdbClient::parse_release_date("not-a-date"), None);
        assert!(TmdbClient::parse_release_date("2020-02-29").is_some());
    }

    #[test]
    fn test_invalid_page_payload_is_a_decode_error() {
        let dto: PageDto = serde_json::from_value(json!({
            "page": 0,
            "results": [],
            "total_pages": 10,
            "total_results": 100
        }))
        .unwrap();

        let err = TmdbClient::map_page(dto).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    // Note: request/response behavior against a live endpoint belongs in an
    // integration suite with a stub server, not here.
}
