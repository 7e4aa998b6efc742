use crate::aggregate;
use crate::api::IssueTracker;
use crate::config::Settings;
use crate::fetch;
use crate::report::{self, RenderSummary};
use crate::types::Issue;
use crate::ui;
use log::{debug, info};
use std::path::PathBuf;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub issues_fetched: usize,
    pub rows: RenderSummary,
    pub output: PathBuf,
    pub json_output: Option<PathBuf>,
}

/// Run the whole report against an already connected tracker
///
/// Fetch, group, fetch subtasks per story, merge, lay out, then save.
/// The spreadsheet is written only once every row has been laid out; any
/// failure before that leaves no file behind.
pub fn run_report(tracker: &dyn IssueTracker, settings: &Settings) -> Result<RunSummary, String> {
    ui::status(&format!("Searching: {}", settings.query));
    let issues = fetch::fetch_issues(tracker, &settings.query)?;
    info!("fetched {} issues", issues.len());

    let mut aggregation = aggregate::organize_by_component(&issues, settings.ordering());

    let stories: Vec<Issue> = issues.iter().filter(|i| i.is_story()).cloned().collect();
    ui::status(&format!("Fetching subtasks of {} stories", stories.len()));
    let subtasks = fetch::fetch_subtasks_for_stories(tracker, &stories, &settings.subtask_types)?;
    aggregate::merge_subtasks_per_component(&mut aggregation, &stories, &subtasks);
    debug!("components after merge: {:?}", aggregation.names());

    ui::status("Resolving linked issues and laying out rows");
    let layout = report::build_layout(&aggregation, tracker, &settings.layout_options());
    let rows = RenderSummary::of(&layout);

    report::write_workbook(&layout, &settings.output)?;
    info!("saved {} data rows to {}", rows.data_rows(), settings.output.display());

    if let Some(json_path) = &settings.json_output {
        report::export_grouping_json(&aggregation, json_path, &settings.tracker.url, &settings.query)
            .map_err(|e| format!("Failed to write grouping JSON to {}: {}", json_path.display(), e))?;
    }

    Ok(RunSummary {
        issues_fetched: issues.len(),
        rows,
        output: settings.output.clone(),
        json_output: settings.json_output.clone(),
    })
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
