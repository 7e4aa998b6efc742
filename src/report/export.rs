//! Grouping export as JSON.
//!
//! The snapshot lists, per component, the story keys and subtask keys in
//! report order. Two runs against an unchanged tracker produce the same
//! `components` section, which makes the file handy for diffing runs.

use crate::aggregate::Aggregation;
use serde_json::{Value, json};
use std::fs::File;
use std::path::Path;

/// Component grouping as a JSON value (without run metadata).
pub fn grouping_snapshot(aggregation: &Aggregation) -> Value {
    let components: Vec<Value> = aggregation
        .groups
        .iter()
        .map(|group| {
            json!({
                "name": group.name,
                "stories": group.stories.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
                "subtasks": group.subtasks.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();

    Value::Array(components)
}

/// Export the grouping as pretty-printed JSON.
///
/// # Arguments
/// * `aggregation` - Final grouping, after the subtask merge
/// * `output_path` - Path to write the JSON file
/// * `tracker_url` - Tracker base URL the data came from
/// * `query` - Search query of the run
pub fn export_grouping_json(
    aggregation: &Aggregation,
    output_path: &Path,
    tracker_url: &str,
    query: &str,
) -> std::io::Result<()> {
    let report = json!({
        "generated_at": chrono::Local::now().to_rfc3339(),
        "tracker_url": tracker_url,
        "query": query,
        "components": grouping_snapshot(aggregation),
    });

    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, &report)?;

    Ok(())
}
