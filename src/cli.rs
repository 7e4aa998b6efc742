use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "jira-component-report")]
#[command(about = "Export stories, subtasks and linked issues grouped by component to a spreadsheet")]
#[command(version)]
pub struct CliArgs {
    /// Config file (TOML) with tracker credentials and report settings
    /// Default: $JIRA_REPORT_CONFIG, then ~/.config/jira-component-report/config.toml,
    /// then ./jira-report.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Spreadsheet output path (overrides the config file)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Search query selecting the issues to report (overrides the config file)
    #[arg(long, short = 'q', value_name = "JQL")]
    pub query: Option<String>,

    /// Omit the Priority, Created and Updated columns
    #[arg(long)]
    pub compact: bool,

    /// Always put the "Other" component group last
    #[arg(long)]
    pub other_last: bool,

    /// Also write the component grouping as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Fixed width of the Key column, in characters
    #[arg(long, value_name = "WIDTH")]
    pub key_width: Option<f64>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if let Some(width) = self.key_width
            && !(width > 0.0 && width <= 255.0)
        {
            return Err(format!("--key-width must be between 0 and 255, got {}", width));
        }

        if let Some(query) = &self.query
            && query.trim().is_empty()
        {
            return Err("--query must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults_succeed() {
        assert!(CliArgs::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_key_width() {
        let args = CliArgs { key_width: Some(0.0), ..Default::default() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_query() {
        let args = CliArgs { query: Some("   ".to_string()), ..Default::default() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "jira-component-report",
            "--config",
            "team.toml",
            "--compact",
            "--other-last",
            "--key-width",
            "20",
            "-o",
            "out.xlsx",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("team.toml")));
        assert!(args.compact);
        assert!(args.other_last);
        assert_eq!(args.key_width, Some(20.0));
        assert_eq!(args.output, Some(PathBuf::from("out.xlsx")));
        assert!(args.json.is_none());
    }
}
