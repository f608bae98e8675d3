use std::future::Future;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;
use ytmsearch_core::{AppError, HttpConfig, MusicSearch, SearchFilter};

use crate::parser::{
    parse_continuation_response, parse_search_response, SearchPage, SearchRecord,
};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
const ORIGIN: &str = "https://music.youtube.com";
const CLIENT_NAME: &str = "WEB_REMIX";

/// HTTP client for the YouTube Music web search endpoint.
///
/// Talks to the same unauthenticated API the music.youtube.com web player
/// uses. No cookies or API keys are needed for search.
///
/// # Examples
///
/// ```no_run
/// use ytmsearch_client::YtMusicClient;
/// use ytmsearch_core::{HttpConfig, MusicSearch};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = YtMusicClient::new(HttpConfig::default())?;
/// let results = client.search("Miles Davis - So What", 1).await?;
/// println!("{}", results);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct YtMusicClient {
    client: Client,
    base_url: Url,
    config: HttpConfig,
    filter: Option<SearchFilter>,
}

/// Request body for the search endpoint.
#[derive(Serialize)]
struct SearchRequest<'a> {
    context: RequestContext<'a>,
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'static str>,
}

#[derive(Serialize)]
struct RequestContext<'a> {
    client: ClientInfo<'a>,
    user: EmptyObject,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_name: &'static str,
    client_version: String,
    hl: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    gl: Option<&'a str>,
}

#[derive(Serialize)]
struct EmptyObject {}

impl YtMusicClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidUrl` if `config.base_url` does not parse.
    /// Returns `AppError::ClientError` if the HTTP client cannot be built.
    pub fn new(config: HttpConfig) -> Result<Self, AppError> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            config,
            filter: None,
        })
    }

    /// Restricts every search made by this client to one result kind.
    pub fn with_filter(mut self, filter: Option<SearchFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Runs a search and returns the parsed records.
    ///
    /// See [`collect_pages`] for how `limit` is applied.
    pub async fn search_records(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SearchRecord>, AppError> {
        let body = self.request_body(query);
        let url = self.search_url()?;

        debug!(query, limit, filter = ?self.filter, "Searching YouTube Music");
        let response = self.post(url.clone(), &body).await?;
        let first = parse_search_response(&response, self.filter)?;

        let (body, url) = (&body, &url);
        collect_pages(first, self.filter, limit, move |token| {
            let mut next_url = url.clone();
            next_url
                .query_pairs_mut()
                .append_pair("ctoken", &token)
                .append_pair("continuation", &token)
                .append_pair("type", "next");
            self.post(next_url, body)
        })
        .await
    }

    fn search_url(&self) -> Result<Url, AppError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| AppError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("alt", "json");
        Ok(url)
    }

    fn request_body<'a>(&'a self, query: &'a str) -> SearchRequest<'a> {
        SearchRequest {
            context: RequestContext {
                client: ClientInfo {
                    client_name: CLIENT_NAME,
                    client_version: client_version(),
                    hl: &self.config.language,
                    gl: self.config.location.as_deref(),
                },
                user: EmptyObject {},
            },
            query,
            params: self.filter.map(filter_params),
        }
    }

    async fn post(&self, url: Url, body: &SearchRequest<'_>) -> Result<Value, AppError> {
        let timeout_secs = self.config.timeout.as_secs();
        let response = self
            .client
            .post(url.clone())
            .header("origin", ORIGIN)
            .header("x-origin", ORIGIN)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {}", e))
                } else {
                    AppError::ClientError(e.to_string())
                }
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "YouTube Music responded");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(AppError::ClientError(format!(
                "HTTP {} from {}",
                status.as_u16(),
                url
            )));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(timeout_secs)
            } else {
                AppError::ClientError(format!("Failed to read response: {}", e))
            }
        })?;

        if text.trim().is_empty() {
            return Err(AppError::EmptyResponse);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl MusicSearch for YtMusicClient {
    async fn search(&self, query: &str, limit: i64) -> Result<Value, AppError> {
        let records = self.search_records(query, limit).await?;
        Ok(serde_json::to_value(records)?)
    }
}

/// Extends the first page with continuation pages until `limit` is reached.
///
/// Without a filter the first page is a mix of shelves and is returned as-is.
/// With a filter, `fetch` is called with each continuation token while fewer
/// than `limit` records are collected; the walk stops early on an empty page
/// or a missing token, and the result is cut to `limit`. A non-positive
/// `limit` returns the first page unchanged.
async fn collect_pages<F, Fut>(
    first: SearchPage,
    filter: Option<SearchFilter>,
    limit: i64,
    mut fetch: F,
) -> Result<Vec<SearchRecord>, AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Value, AppError>>,
{
    let mut records = first.records;
    let wanted = match (filter, usize::try_from(limit)) {
        (Some(_), Ok(wanted)) if wanted > 0 => wanted,
        _ => return Ok(records),
    };

    let mut continuation = first.continuation;
    let category = first.category;
    while records.len() < wanted {
        let Some(token) = continuation.take() else {
            break;
        };
        debug!(collected = records.len(), wanted, "Fetching next results page");

        let response = fetch(token).await?;
        let next = parse_continuation_response(&response, category.as_deref(), filter)?;
        if next.records.is_empty() {
            break;
        }
        records.extend(next.records);
        continuation = next.continuation;
    }

    records.truncate(wanted);
    Ok(records)
}

/// Web player version string, which embeds today's date.
fn client_version() -> String {
    format!("1.{}.01.00", Utc::now().format("%Y%m%d"))
}

/// Protobuf-encoded `params` value selecting a result kind.
fn filter_params(filter: SearchFilter) -> &'static str {
    match filter {
        SearchFilter::Songs => "EgWKAQIIAWoMEA4QChADEAQQCRAF",
        SearchFilter::Videos => "EgWKAQIQAWoMEA4QChADEAQQCRAF",
        SearchFilter::Albums => "EgWKAQIYAWoMEA4QChADEAQQCRAF",
        SearchFilter::Artists => "EgWKAQIgAWoMEA4QChADEAQQCRAF",
        SearchFilter::CommunityPlaylists => "EgeKAQQoAEABagwQDhAKEAMQBBAJEAU%3D",
        SearchFilter::FeaturedPlaylists => "EgeKAQQoADgBagwQDhAKEAMQBBAJEAU%3D",
    }
}
