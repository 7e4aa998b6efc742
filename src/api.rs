/// API module for interacting with the issue tracker
///
/// This module provides the `IssueTracker` seam used by the fetcher and a
/// blocking REST implementation for Jira-compatible servers.

use crate::config::TrackerConfig;
use crate::types::Issue;
use base64::Engine;
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("jira-component-report/", env!("CARGO_PKG_VERSION"));

/// Read-only access to the tracker
///
/// Every call is blocking; callers issue them one at a time.
pub trait IssueTracker {
    /// Run a search query and return one page of results
    fn search(&self, jql: &str, start_at: usize, max_results: usize) -> Result<SearchPage, String>;

    /// Fetch a single issue by key
    fn issue(&self, key: &str) -> Result<Issue, String>;
}

/// One page of search results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    pub total: usize,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// The authenticated user, used to verify the connection
#[derive(Debug, Deserialize)]
struct Myself {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

/// Blocking REST client for a Jira server
pub struct JiraClient {
    agent: ureq::Agent,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    /// Build a client and check the credentials against the server
    ///
    /// Fails if the server is unreachable or rejects the credentials.
    pub fn connect(config: &TrackerConfig) -> Result<Self, String> {
        let client = Self::new(config);
        let me: Myself = client.get_json("/rest/api/2/myself", &[])?;
        debug!(
            "connected to {} as {}",
            client.base_url(),
            me.display_name.as_deref().unwrap_or(&config.username)
        );
        Ok(client)
    }

    /// Build a client without contacting the server
    pub fn new(config: &TrackerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(USER_AGENT)
            .timeout_connect(Duration::from_secs(30))
            .build();
        let credentials = format!("{}:{}", config.username, config.token);
        let auth_header = format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(credentials));

        JiraClient { agent, base_url: config.url.trim_end_matches('/').to_string(), auth_header }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self
            .agent
            .get(&url)
            .set("Authorization", &self.auth_header)
            .set("Accept", "application/json");
        for (name, value) in query {
            request = request.query(name, value);
        }

        let response = request.call().map_err(|e| describe_error(&url, e))?;
        response
            .into_json::<T>()
            .map_err(|e| format!("Failed to parse response from {}: {}", url, e))
    }
}

impl IssueTracker for JiraClient {
    fn search(&self, jql: &str, start_at: usize, max_results: usize) -> Result<SearchPage, String> {
        let start_at = start_at.to_string();
        let max_results = max_results.to_string();
        self.get_json(
            "/rest/api/2/search",
            &[("jql", jql), ("startAt", start_at.as_str()), ("maxResults", max_results.as_str())],
        )
    }

    fn issue(&self, key: &str) -> Result<Issue, String> {
        self.get_json(&format!("/rest/api/2/issue/{}", key), &[])
    }
}

/// Turn a transport or HTTP status error into an operator-facing message
fn describe_error(url: &str, err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, response) => {
            format!("{} returned HTTP {} {}", url, code, response.status_text())
        }
        ureq::Error::Transport(transport) => format!("Request to {} failed: {}", url, transport),
    }
}
