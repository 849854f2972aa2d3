//! Paginated GET over array resources, following `Link: rel="next"`

use crate::error::{Error, Result};
use crate::http::client::GitHubApiClient;
use futures::stream::{self, Stream, TryStreamExt};
use serde_json::Value;

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
///
/// Returns `None` when no link carries a `next` relation.
///
/// Examples:
/// - `<https://x/p?page=2>; rel="next", <https://x/p?page=5>; rel="last"` -> `Some("https://x/p?page=2")`
/// - `<https://x/p?page=1>; rel="prev"` -> `None`
pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;

        let is_next = parts.any(|param| {
            let Some((name, value)) = param.split_once('=') else {
                return false;
            };
            name.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_ascii_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });

        (is_next && !url.is_empty()).then(|| url.to_string())
    })
}

enum Cursor {
    First,
    Next(String),
    Done,
}

/// Lazy sequence of JSON array pages from one listing endpoint
pub struct PageFetcher<'a> {
    client: &'a GitHubApiClient,
    url: String,
    query: Vec<(&'static str, String)>,
    per_page: u32,
    max_pages: u32,
}

impl<'a> PageFetcher<'a> {
    /// Create a fetcher for `url` with the given page size
    pub fn new(client: &'a GitHubApiClient, url: String, per_page: u32) -> Self {
        Self {
            client,
            url,
            query: Vec::new(),
            per_page,
            max_pages: client.config().max_pages,
        }
    }

    /// Add a fixed query parameter sent with the first request
    pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Stream pages until one is empty or carries no `next` link.
    ///
    /// Empty pages are not yielded. Any transport error ends the stream.
    pub fn pages(self) -> impl Stream<Item = Result<Vec<Value>>> + Send + 'a {
        let PageFetcher {
            client,
            url,
            mut query,
            per_page,
            max_pages,
        } = self;
        query.push(("per_page", per_page.to_string()));
        query.push(("page", "1".to_string()));

        stream::try_unfold((Cursor::First, 0u32), move |(cursor, fetched)| {
            let url = url.clone();
            let query = query.clone();
            async move {
                let response = match cursor {
                    Cursor::Done => return Ok(None),
                    _ if fetched >= max_pages => {
                        return Err(Error::Transport(format!(
                            "Too many pages in GitHub API response (limit {})",
                            max_pages
                        )))
                    }
                    Cursor::First => client.get_json(&url, &query).await?,
                    Cursor::Next(next) => client.get_json(&next, &[]).await?,
                };

                let items = match response.body {
                    Value::Array(items) => items,
                    other => {
                        return Err(Error::Transport(format!(
                            "Expected a JSON array page from {}, got {}",
                            url,
                            json_type(&other)
                        )))
                    }
                };

                if items.is_empty() {
                    return Ok(None);
                }

                tracing::debug!(page = fetched + 1, items = items.len(), "fetched page");
                let cursor = match response.next {
                    Some(next) => Cursor::Next(next),
                    None => Cursor::Done,
                };
                Ok(Some((items, (cursor, fetched + 1))))
            }
        })
    }

    /// Drain every page into one vector, in page order
    pub async fn collect_all(self) -> Result<Vec<Value>> {
        self.pages().try_concat().await
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
