//! URL-title extraction — resolves a link to a human-readable title.
//!
//! Best-effort by contract: on a malformed URL, a failed fetch, or a page
//! with no `<title>`, the caller gets the raw input back instead of an
//! error. Successful lookups are cached in the process-wide [`Resources`].

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::cache::Resources;
use crate::error::LinkError;

static TITLE_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn title_regex() -> Option<&'static Regex> {
    TITLE_RE
        .get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok())
        .as_ref()
}

/// Fetch the page at `url` and return its title, falling back to the raw
/// input on any failure.
pub async fn fetch_title(resources: &Resources, url: &str) -> String {
    match try_fetch_title(resources, url).await {
        Ok(title) => title,
        Err(e) => {
            debug!(%url, error = %e, "Title lookup failed, returning input");
            url.to_string()
        }
    }
}

async fn try_fetch_title(resources: &Resources, url: &str) -> Result<String, LinkError> {
    // Only absolute http(s) URLs are fetchable.
    let parsed = reqwest::Url::parse(url).map_err(|e| LinkError::MalformedUrl(e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(LinkError::MalformedUrl(format!(
            "unsupported scheme {:?}",
            parsed.scheme()
        )));
    }

    if let Some(cached) = resources.cached_title(url).await {
        return Ok(cached);
    }

    let resp = resources
        .http()
        .get(parsed)
        .send()
        .await
        .map_err(|e| LinkError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    if !resp.status().is_success() {
        return Err(LinkError::FetchFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", resp.status()),
        });
    }
    let body = resp.text().await.unwrap_or_default();

    let title = extract_title(&body).ok_or_else(|| LinkError::NoTitle {
        url: url.to_string(),
    })?;
    resources.store_title(url, &title).await;
    Ok(title)
}

/// Pull the `<title>` element out of an HTML document.
fn extract_title(html: &str) -> Option<String> {
    let captured = title_regex()?.captures(html)?.get(1)?.as_str();
    let title = decode_entities(captured)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if title.is_empty() { None } else { Some(title) }
}

/// Decode the handful of entities that commonly appear in titles.
fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}
