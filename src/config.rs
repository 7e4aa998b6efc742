/// Configuration resolution module
///
/// This module handles:
/// - Locating and parsing the TOML config file
/// - Applying environment overrides for tracker credentials
/// - Applying CLI overrides for report settings
/// - Validating that everything needed before the first request is present
use crate::aggregate::GroupOrdering;
use crate::cli::CliArgs;
use crate::report::LayoutOptions;
use crate::types::{ColumnSet, FieldIds};
use log::debug;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Env var naming the config file
pub const CONFIG_ENV: &str = "JIRA_REPORT_CONFIG";
pub const URL_ENV: &str = "JIRA_URL";
pub const USER_ENV: &str = "JIRA_USER";
pub const TOKEN_ENV: &str = "JIRA_TOKEN";

const LOCAL_CONFIG_FILE: &str = "jira-report.toml";
const DEFAULT_OUTPUT: &str = "component-report.xlsx";
const DEFAULT_SPRINT_FIELD: &str = "customfield_10020";
const DEFAULT_REVIEW_PATH_FIELD: &str = "customfield_10100";
const DEFAULT_SUBTASK_TYPES: [&str; 4] = ["Sub-task", "Dev Sub-task", "QA Sub-task", "Design Sub-task"];

/// Raw contents of the config file; every value is optional here
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub tracker: TrackerSection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerSection {
    pub url: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    pub query: Option<String>,
    pub subtask_types: Option<Vec<String>>,
    pub sprint_field: Option<String>,
    pub review_path_field: Option<String>,
    pub output: Option<PathBuf>,
    pub columns: Option<ColumnSet>,
    pub other_last: Option<bool>,
    pub key_column_width: Option<f64>,
}

/// Tracker location and credentials
#[derive(Clone, PartialEq)]
pub struct TrackerConfig {
    pub url: String,
    pub username: String,
    pub token: String,
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Fully resolved, validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tracker: TrackerConfig,
    pub query: String,
    pub subtask_types: Vec<String>,
    pub field_ids: FieldIds,
    pub output: PathBuf,
    pub json_output: Option<PathBuf>,
    pub columns: ColumnSet,
    pub other_last: bool,
    pub key_column_width: Option<f64>,
}

impl Settings {
    pub fn ordering(&self) -> GroupOrdering {
        if self.other_last { GroupOrdering::OtherLast } else { GroupOrdering::Insertion }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            columns: self.columns,
            field_ids: self.field_ids.clone(),
            base_url: self.tracker.url.clone(),
            key_column_width: self.key_column_width,
        }
    }
}

/// Load settings from the config file, the environment and CLI arguments
pub fn load_settings(args: &CliArgs) -> Result<Settings, String> {
    let lookup = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());

    let (path, explicit) = config_path(args, lookup);
    let file = read_config_file(&path, explicit)?;
    resolve_settings(args, file, lookup)
}

/// Pick the config file: `--config`, then `$JIRA_REPORT_CONFIG`, then the
/// user config dir, then `./jira-report.toml`
///
/// Returns the path and whether it was asked for explicitly.
fn config_path(args: &CliArgs, env: impl Fn(&str) -> Option<String>) -> (PathBuf, bool) {
    if let Some(path) = &args.config {
        return (path.clone(), true);
    }
    if let Some(path) = env(CONFIG_ENV) {
        return (PathBuf::from(path), true);
    }

    let user_config =
        dirs::config_dir().map(|dir| dir.join("jira-component-report").join("config.toml"));
    match user_config {
        Some(path) if path.exists() => (path, false),
        _ => (PathBuf::from(LOCAL_CONFIG_FILE), false),
    }
}

/// Read and parse a config file; a missing default file is an empty config
fn read_config_file(path: &Path, explicit: bool) -> Result<ConfigFile, String> {
    if !explicit && !path.exists() {
        debug!("no config file at {:?}, using environment and flags only", path);
        return Ok(ConfigFile::default());
    }

    debug!("reading config from {:?}", path);
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
    parse_config(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Parse config file contents
pub fn parse_config(text: &str) -> Result<ConfigFile, String> {
    toml::from_str(text).map_err(|e| format!("Failed to parse config: {}", e))
}

/// Combine file values with environment and CLI overrides
///
/// Precedence, highest first: CLI flags, environment (credentials only),
/// config file, built-in defaults.
pub fn resolve_settings(
    args: &CliArgs,
    file: ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, String> {
    let ConfigFile { tracker, report } = file;

    let url = require(env(URL_ENV).or(tracker.url), "tracker url", URL_ENV)?;
    let username = require(env(USER_ENV).or(tracker.username), "tracker username", USER_ENV)?;
    let token = require(env(TOKEN_ENV).or(tracker.token), "tracker token", TOKEN_ENV)?;

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("Tracker url must start with http:// or https://, got '{}'", url));
    }

    let query = args
        .query
        .clone()
        .or(report.query)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| "Missing report query: set [report] query or pass --query".to_string())?;

    let subtask_types = report
        .subtask_types
        .unwrap_or_else(|| DEFAULT_SUBTASK_TYPES.iter().map(|t| t.to_string()).collect());
    if subtask_types.is_empty() || subtask_types.iter().any(|t| t.trim().is_empty()) {
        return Err("[report] subtask_types must list at least one non-empty type".to_string());
    }

    let columns = if args.compact { ColumnSet::Compact } else { report.columns.unwrap_or_default() };

    let key_column_width = args.key_width.or(report.key_column_width);
    if let Some(width) = key_column_width
        && width <= 0.0
    {
        return Err(format!("Key column width must be positive, got {}", width));
    }

    let output = args.output.clone().or(report.output).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    // The spreadsheet would be overwritten by the JSON export
    if args.json.as_ref() == Some(&output) {
        return Err(format!("--json must not point at the spreadsheet output {}", output.display()));
    }

    let settings = Settings {
        tracker: TrackerConfig { url: url.trim_end_matches('/').to_string(), username, token },
        query,
        subtask_types,
        field_ids: FieldIds {
            sprint: report.sprint_field.unwrap_or_else(|| DEFAULT_SPRINT_FIELD.to_string()),
            review_path: report.review_path_field.unwrap_or_else(|| DEFAULT_REVIEW_PATH_FIELD.to_string()),
        },
        output,
        json_output: args.json.clone(),
        columns,
        other_last: args.other_last || report.other_last.unwrap_or(false),
        key_column_width,
    };

    debug!("resolved settings: {:?}", settings);
    Ok(settings)
}

fn require(value: Option<String>, what: &str, env_name: &str) -> Result<String, String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Missing {}: set it in the config file or via ${}", what, env_name))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
