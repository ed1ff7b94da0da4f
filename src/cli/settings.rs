//! Layered settings: built-in defaults, then an optional YAML file, then
//! `SMD_COMPARE_*` environment variables, then command-line flags.

use anyhow::{Context, Result, bail};
use clap::Args;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use smd_compare::{
    ClientConfig, DiscoveryService, NodeId, PollConfig, RateLimitConfig, RedfishCredentials,
    SmdClient, score_from_level,
};
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "SMD_COMPARE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub primary_url: String,
    pub secondary_url: String,
    pub nodes: Vec<String>,
    pub user: String,
    pub password: String,
    pub max_attempts: u32,
    pub poll_interval_secs: u64,
    pub allow_incomplete_discovery: bool,
    pub request_timeout_secs: Option<u64>,
    pub requests_per_second: Option<u32>,
    pub burst_size: Option<u32>,
    pub password_min_score: Option<u8>,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            primary_url: "http://smd:27779".to_string(),
            secondary_url: "http://smd2:8080".to_string(),
            nodes: ["x0c0s1b0", "x0c0s2b0", "x0c0s3b0", "x0c0s4b0"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            user: "root".to_string(),
            password: "root_password".to_string(),
            max_attempts: PollConfig::DEFAULT_MAX_ATTEMPTS,
            poll_interval_secs: PollConfig::DEFAULT_INTERVAL.as_secs(),
            allow_incomplete_discovery: false,
            request_timeout_secs: None,
            requests_per_second: None,
            burst_size: None,
            password_min_score: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

/// Command-line flags that override configured values when present.
#[derive(Debug, Clone, Default, Args, Serialize)]
pub struct CliOverrides {
    /// Base URL of the primary SMD instance
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_url: Option<String>,

    /// Base URL of the secondary SMD instance
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_url: Option<String>,

    /// Node to discover (repeat for several)
    #[arg(long = "node", global = true)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,

    /// Discovery polling attempts
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    /// Seconds between discovery polls
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,

    /// Compare even if some nodes never finish discovery
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub allow_incomplete_discovery: bool,

    /// Log level (overrides config; RUST_LOG takes precedence)
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Settings {
    pub fn load(path: Option<&Path>, overrides: &CliOverrides) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        if let Some(path) = path {
            if !path.exists() {
                bail!("config file {} not found", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["nodes"]));
        if let Ok(raw) = std::env::var(format!("{}NODES", ENV_PREFIX)) {
            figment = figment.merge(Serialized::default("nodes", split_node_list(&raw)));
        }

        figment
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("loading settings")
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let rate_limit = match (self.requests_per_second, self.burst_size) {
            (Some(rps), burst) => Some(RateLimitConfig {
                requests_per_second: rps,
                burst_size: burst.unwrap_or(rps),
            }),
            (None, Some(_)) => bail!("burst_size requires requests_per_second"),
            (None, None) => None,
        };
        let password_min_score = self
            .password_min_score
            .map(score_from_level)
            .transpose()?;

        Ok(ClientConfig {
            rate_limit,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            password_min_score,
        })
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new(
            self.max_attempts,
            Duration::from_secs(self.poll_interval_secs),
        )
    }

    pub fn node_ids(&self) -> Result<Vec<NodeId>> {
        if self.nodes.is_empty() {
            bail!("no nodes configured");
        }
        self.nodes
            .iter()
            .map(|n| NodeId::new(n.as_str()).with_context(|| format!("invalid node '{}'", n)))
            .collect()
    }

    pub fn discovery_service(&self) -> Result<DiscoveryService> {
        let min_score = self.client_config()?.password_min_score;
        let credentials = RedfishCredentials::new(&self.user, &self.password, min_score)
            .context("invalid BMC credentials")?;
        Ok(DiscoveryService::new(credentials, self.poll_config()))
    }

    pub fn primary_client(&self) -> Result<SmdClient> {
        self.client("primary", &self.primary_url)
    }

    pub fn secondary_client(&self) -> Result<SmdClient> {
        self.client("secondary", &self.secondary_url)
    }

    fn client(&self, name: &str, url: &str) -> Result<SmdClient> {
        SmdClient::builder()
            .name(name)
            .url(url)
            .with_context(|| format!("invalid {} url '{}'", name, url))?
            .config(self.client_config()?)
            .build()
            .with_context(|| format!("building {} client", name))
    }
}

/// Accepts both `a,b` and figment's `[a, b]` list syntax.
fn split_node_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|n| n.trim().trim_matches('"'))
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}
