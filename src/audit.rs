//! Best-effort citation link audit.
//!
//! Issues HEAD requests against every citation url in the corpus and
//! reports unreachable links. Network findings never fail validation on
//! their own; offline well-formedness lives in [`crate::validate`].

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::store::Store;

/// Outcome of checking one url
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// Server answered with a success or redirect status
    Reachable(u16),

    /// Server answered with a client or server error status
    Broken(u16),

    /// Request failed before a status was received
    Unreachable(String),
}

impl LinkStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, LinkStatus::Reachable(_))
    }
}

/// Audit result for one citation url
#[derive(Debug, Clone)]
pub struct LinkReport {
    /// Record the citation belongs to
    pub content_id: String,

    /// Citation id within the record
    pub citation_id: String,

    /// The url that was checked
    pub url: String,

    /// What happened
    pub status: LinkStatus,
}

/// Checks citation urls over HTTP
pub struct LinkAuditor {
    client: Client,
}

impl LinkAuditor {
    /// Create an auditor with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("healthnav/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Check one url. Servers that reject HEAD get a GET retry.
    pub async fn check(&self, url: &str) -> LinkStatus {
        let head = self.client.head(url).send().await;

        let response = match head {
            Ok(resp) if resp.status() == reqwest::StatusCode::METHOD_NOT_ALLOWED => {
                self.client.get(url).send().await
            }
            other => other,
        };

        match response {
            Ok(resp) if resp.status().is_success() || resp.status().is_redirection() => {
                LinkStatus::Reachable(resp.status().as_u16())
            }
            Ok(resp) => LinkStatus::Broken(resp.status().as_u16()),
            Err(e) => LinkStatus::Unreachable(e.to_string()),
        }
    }

    /// Check every citation url in the store, in corpus order
    pub async fn audit_store(&self, store: &Store) -> Vec<LinkReport> {
        let mut reports = Vec::new();

        for record in store.iter() {
            for citation in &record.citations {
                let Some(url) = &citation.url else {
                    continue;
                };

                let status = self.check(url).await;
                if !status.is_ok() {
                    tracing::warn!("Citation link failed: {} ({:?})", url, status);
                }

                reports.push(LinkReport {
                    content_id: record.id.clone(),
                    citation_id: citation.id.clone(),
                    url: url.clone(),
                    status,
                });
            }
        }

        reports
    }
}
