// API client module: a small blocking HTTP client that talks to the
// MSRD REST API. Every request carries the account's API token in the
// `SpringfieldApiToken` header, and every response is traced to stderr
// as "<status> <reason> <url>" so a run can be followed call by call.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::fs::File;
use std::path::Path;

use crate::config::ClientConfig;
use crate::job::Uploader;

/// Blocking client for the MSRD REST API, scoped to one account. Holds
/// the resolved configuration explicitly; there is no ambient session
/// state, which keeps the assembly pipeline testable with a double.
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client from a resolved configuration. Fails if the API
    /// token cannot be carried in an HTTP header.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let token = HeaderValue::from_str(&config.api_token)
            .context("API token contains characters not allowed in an HTTP header")?;
        let mut headers = HeaderMap::new();
        headers.insert("SpringfieldApiToken", token);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ApiClient { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Trace the response, read its body, and turn a non-success status
    /// into an error carrying status, reason and URL. No retry anywhere;
    /// a failed call is fatal to the current operation.
    fn finish(&self, res: Response) -> Result<String> {
        let status = res.status();
        let reason = status.canonical_reason().unwrap_or("Unknown");
        let url = res.url().clone();
        eprintln!("{} {} {}", status.as_u16(), reason, url);

        let body = res.text().context("Failed to read response body")?;
        if !status.is_success() {
            anyhow::bail!("{} {} from {}: {}", status.as_u16(), reason, url, body);
        }
        Ok(body)
    }

    fn get(&self, url: String) -> Result<String> {
        let res = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to reach {url}"))?;
        self.finish(res)
    }

    /// Get account information.
    pub fn account_info(&self) -> Result<String> {
        self.get(self.url(&format!("api/accounts/{}", self.config.account_id)))
    }

    /// Get the OS images available to the account.
    pub fn os_images(&self) -> Result<String> {
        self.get(self.url(&format!("api/accounts/{}/osimages", self.config.account_id)))
    }

    /// Get the job tiers available to the account.
    pub fn job_tiers(&self) -> Result<String> {
        self.get(self.url(&format!("api/accounts/{}/jobtiers", self.config.account_id)))
    }

    /// Get the account's jobs.
    pub fn jobs(&self) -> Result<String> {
        self.get(self.url(&format!("api/accounts/{}/jobs", self.config.account_id)))
    }

    /// PUT one file's bytes to the Files API in a single streamed
    /// request (no chunking, no resume). The response body is the
    /// upload reference as text; see `job::strip_reference_quotes` for
    /// the quoting wart.
    pub fn upload_file(&self, path: &Path) -> Result<String> {
        let url = self.url(&format!("files/accounts/{}/session", self.config.account_id));
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

        let res = self
            .client
            .put(&url)
            .body(file)
            .send()
            .with_context(|| format!("Failed to reach {url}"))?;
        self.finish(res)
    }

    /// POST a finished job document to the account's job-creation
    /// endpoint.
    pub fn submit_job(&self, job: &Value) -> Result<String> {
        let url = self.url(&format!("api/accounts/{}/jobs", self.config.account_id));
        let res = self
            .client
            .post(&url)
            .json(job)
            .send()
            .with_context(|| format!("Failed to reach {url}"))?;
        self.finish(res)
    }
}

impl Uploader for ApiClient {
    fn upload(&self, path: &Path) -> Result<String> {
        self.upload_file(path)
    }
}
