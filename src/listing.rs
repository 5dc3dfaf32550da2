//! Run discovery: the "list available runs" capability.
//!
//! The page-relative `archives/` directory is the source of truth for
//! archived reports. How it is enumerated is injected: over HTTP the
//! server's directory listing is scraped for anchor hrefs, locally the
//! directory is read straight off disk. Both yield the same descending
//! archive list.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use url::Url;

use crate::archive::{collect_runs, ArchiveEntry};
use crate::config::Config;

#[async_trait]
pub trait RunLister: Send + Sync {
    async fn list_runs(&self) -> Result<Vec<ArchiveEntry>>;
}

#[async_trait]
impl RunLister for Box<dyn RunLister + Send + Sync> {
    async fn list_runs(&self) -> Result<Vec<ArchiveEntry>> {
        (**self).list_runs().await
    }
}

#[derive(Clone, Copy, Debug)]
pub enum ListerKind {
    Http,
    Fs,
}

impl ListerKind {
    pub fn from_env() -> Self {
        match std::env::var("LISTER")
            .unwrap_or_else(|_| "fs".to_string())
            .as_str()
        {
            "http" => ListerKind::Http,
            _ => ListerKind::Fs,
        }
    }

    pub fn build(self, cfg: &Config) -> Result<Box<dyn RunLister + Send + Sync>> {
        match self {
            ListerKind::Http => {
                let base = cfg
                    .base_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("BASE_URL is required for the http lister"))?;
                Ok(Box::new(HttpRunLister::new(base, &cfg.archives_path)?))
            }
            ListerKind::Fs => Ok(Box::new(FsRunLister::new(&cfg.archives_dir))),
        }
    }
}

/// Scrapes the server's HTML directory listing of `archives/`.
pub struct HttpRunLister {
    client: Client,
    listing_url: Url,
}

impl HttpRunLister {
    pub fn new(base: &str, archives_path: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base).with_context(|| format!("invalid base url {}", base))?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        let listing_url = base_url.join(&format!("{}/", archives_path.trim_matches('/')))?;
        Ok(Self {
            client: Client::new(),
            listing_url,
        })
    }

    pub fn listing_url(&self) -> &str {
        self.listing_url.as_str()
    }
}

#[async_trait]
impl RunLister for HttpRunLister {
    async fn list_runs(&self) -> Result<Vec<ArchiveEntry>> {
        let resp = self.client.get(self.listing_url.clone()).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("archives listing {}: {}", status, body));
        }
        let html = resp.text().await?;
        Ok(collect_runs(extract_hrefs(&html)))
    }
}

/// Reads `run-*` subdirectories of a local archives directory.
pub struct FsRunLister {
    root: PathBuf,
}

impl FsRunLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl RunLister for FsRunLister {
    async fn list_runs(&self) -> Result<Vec<ArchiveEntry>> {
        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("cannot read archives dir {}", self.root.display()))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(collect_runs(names))
    }
}

/// Pull every anchor `href` value out of an HTML document.
///
/// Directory listings are simple enough that a byte scan over anchor
/// tags is all that is needed; quoting and attribute order vary between
/// servers, nesting does not.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    // ASCII lowercasing preserves byte offsets into the original.
    let lower = html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(rel) = lower[pos..].find("<a") {
        let tag_start = pos + rel;
        match lower.as_bytes().get(tag_start + 2) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' => {}
            // "<abbr", "<area" and friends
            _ => {
                pos = tag_start + 2;
                continue;
            }
        }
        let Some(end_rel) = lower[tag_start..].find('>') else {
            break;
        };
        let tag_end = tag_start + end_rel;
        if let Some(href) = attr_value(&html[tag_start..tag_end], &lower[tag_start..tag_end]) {
            out.push(href);
        }
        pos = tag_end + 1;
    }
    out
}

fn attr_value(tag: &str, tag_lower: &str) -> Option<String> {
    let bytes = tag.as_bytes();
    let mut search = 0;
    while let Some(rel) = tag_lower[search..].find("href") {
        let at = search + rel;
        search = at + 4;
        if at > 0 && (bytes[at - 1].is_ascii_alphanumeric() || bytes[at - 1] == b'-') {
            continue;
        }
        let mut i = at + 4;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        if bytes[i] == b'"' || bytes[i] == b'\'' {
            let quote = bytes[i];
            let start = i + 1;
            let mut j = start;
            while j < bytes.len() && bytes[j] != quote {
                j += 1;
            }
            return Some(tag[start..j].to_string());
        }
        let start = i;
        let mut j = start;
        while j < bytes.len() && !bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        return Some(tag[start..j].to_string());
    }
    None
}
