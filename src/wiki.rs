//! Minimal MediaWiki API client: resolve a title or page id to the
//! page's plain-text content, reporting missing pages and disambiguation
//! pages as distinct outcomes instead of errors.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const API_URL: &str = "https://en.wikipedia.org/w/api.php";

// Common parameters for the content query: plain-text extract of one
// page, following redirects, flagging disambiguation pages
const QUERY_PARAMS: &[(&str, &str)] = &[
    ("action", "query"),
    ("format", "json"),
    ("formatversion", "2"),
    ("redirects", "1"),
    ("prop", "extracts|pageprops"),
    ("explaintext", "1"),
    ("exlimit", "1"),
    ("ppprop", "disambiguation"),
];

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API Error: {code}: {info}")]
    Api { code: String, info: String },
    #[error("Malformed API response: {0}")]
    Malformed(&'static str),
}

/// A resolved page: canonical title plus full plain-text content.
#[derive(Debug, Clone)]
pub struct Page {
    pub pageid: u64,
    pub title: String,
    pub content: String,
}

/// Outcome of a lookup. Disambiguation carries the candidate titles so
/// the caller can apply its own tie-break policy.
#[derive(Debug)]
pub enum Lookup {
    Found(Page),
    NotFound,
    Ambiguous(Vec<String>),
}

pub struct WikiClient {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl WikiClient {
    pub fn new() -> Result<Self, WikiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("download-wiki/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: API_URL.to_owned(),
        })
    }

    pub fn lookup_title(&self, title: &str) -> Result<Lookup, WikiError> {
        self.lookup("titles", title)
    }

    pub fn lookup_pageid(&self, pageid: u64) -> Result<Lookup, WikiError> {
        self.lookup("pageids", &pageid.to_string())
    }

    fn lookup(&self, selector: &str, value: &str) -> Result<Lookup, WikiError> {
        log::debug!("query {}={}", selector, value);
        let response: QueryResponse = self
            .client
            .get(&self.api_url)
            .query(QUERY_PARAMS)
            .query(&[(selector, value)])
            .send()?
            .error_for_status()?
            .json()?;

        match interpret(response)? {
            Interpretation::Found(page) => Ok(Lookup::Found(page)),
            Interpretation::NotFound => Ok(Lookup::NotFound),
            Interpretation::Disambiguation(title) => {
                log::debug!("'{}' is a disambiguation page", title);
                Ok(Lookup::Ambiguous(self.disambiguation_options(&title)?))
            }
        }
    }

    // Candidate titles for a disambiguation page: the article-namespace
    // links on the page itself
    fn disambiguation_options(&self, title: &str) -> Result<Vec<String>, WikiError> {
        let response: LinksResponse = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "links"),
                ("plnamespace", "0"),
                ("pllimit", "max"),
                ("titles", title),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        let links = response
            .query
            .and_then(|query| query.pages.into_iter().next())
            .map(|page| page.links)
            .unwrap_or_default();

        Ok(links.into_iter().map(|link| link.title).collect())
    }
}

enum Interpretation {
    Found(Page),
    NotFound,
    Disambiguation(String),
}

// Classify a content-query response. Kept free of I/O so the JSON
// handling can be tested against fixtures.
fn interpret(response: QueryResponse) -> Result<Interpretation, WikiError> {
    if let Some(error) = response.error {
        return Err(WikiError::Api {
            code: error.code,
            info: error.info,
        });
    }

    let page = match response
        .query
        .and_then(|query| query.pages.into_iter().next())
    {
        Some(page) => page,
        None => return Ok(Interpretation::NotFound),
    };

    if page.missing || page.invalid {
        return Ok(Interpretation::NotFound);
    }

    if page
        .pageprops
        .as_ref()
        .map_or(false, |props| props.disambiguation.is_some())
    {
        return Ok(Interpretation::Disambiguation(page.title));
    }

    let pageid = page
        .pageid
        .ok_or(WikiError::Malformed("page entry without pageid"))?;

    Ok(Interpretation::Found(Page {
        pageid,
        title: page.title,
        content: page.extract.unwrap_or_default(),
    }))
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    pageid: Option<u64>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    pageprops: Option<PageProps>,
    #[serde(default)]
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinksResponse {
    #[serde(default)]
    query: Option<LinksBody>,
}

#[derive(Debug, Deserialize)]
struct LinksBody {
    #[serde(default)]
    pages: Vec<LinksPage>,
}

#[derive(Debug, Deserialize)]
struct LinksPage {
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    title: String,
}
