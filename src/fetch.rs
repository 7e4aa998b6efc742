/// Issue fetching
///
/// This module handles:
/// - Running the report query with pagination until every match is read
/// - Per-story subtask queries (one query per story, issued serially)
/// - Resolving a story's linked issues, degrading to nothing on failure

use crate::api::IssueTracker;
use crate::types::Issue;
use log::{debug, warn};

/// Issues requested per search page
pub const PAGE_SIZE: usize = 100;

/// Subtasks returned for one story, keyed by the story's key
pub type SubtasksByStory = Vec<(String, Vec<Issue>)>;

/// A linked issue together with the relationship label seen from the story
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedIssue {
    pub issue: Issue,
    pub label: String,
}

/// Fetch every issue matching `jql`, in the order the tracker returns them
///
/// There is no cap on the result count; pages are requested until the
/// reported total is reached and a page comes back short or empty.
pub fn fetch_issues(tracker: &dyn IssueTracker, jql: &str) -> Result<Vec<Issue>, String> {
    debug!("searching: {}", jql);

    let mut all_issues = Vec::new();
    loop {
        let page = tracker
            .search(jql, all_issues.len(), PAGE_SIZE)
            .map_err(|e| format!("Search failed: {}", e))?;
        let page_size = page.issues.len();
        debug!("got {} issues at offset {} (total {})", page_size, all_issues.len(), page.total);

        all_issues.extend(page.issues);

        // A full page may be followed by more even when the total says otherwise
        if page_size == 0 || (all_issues.len() >= page.total && page_size < PAGE_SIZE) {
            break;
        }
    }

    debug!("found {} issues", all_issues.len());
    Ok(all_issues)
}

/// Query selecting the subtasks of `story_key` with one of the given types
pub fn subtask_query(story_key: &str, subtask_types: &[String]) -> String {
    let types: Vec<String> = subtask_types.iter().map(|t| format!("\"{}\"", t.replace('"', "\\\""))).collect();
    format!("issuetype in ({}) AND parent = {}", types.join(", "), story_key)
}

/// Fetch the subtasks of each story, one query per story
///
/// Results keep the order of `stories`. A failing query aborts the run.
pub fn fetch_subtasks_for_stories(
    tracker: &dyn IssueTracker,
    stories: &[Issue],
    subtask_types: &[String],
) -> Result<SubtasksByStory, String> {
    let mut by_story = Vec::with_capacity(stories.len());

    for story in stories {
        let query = subtask_query(&story.key, subtask_types);
        let subtasks = fetch_issues(tracker, &query)
            .map_err(|e| format!("Failed to fetch subtasks of {}: {}", story.key, e))?;
        debug!("{} has {} subtasks", story.key, subtasks.len());
        by_story.push((story.key.clone(), subtasks));
    }

    Ok(by_story)
}

/// Fetch the issues linked from `issue_key`
///
/// Any failure, whether fetching the issue itself or one of its link
/// targets, is logged and yields an empty list.
pub fn fetch_linked_issues(tracker: &dyn IssueTracker, issue_key: &str) -> Vec<LinkedIssue> {
    match try_fetch_linked_issues(tracker, issue_key) {
        Ok(linked) => linked,
        Err(e) => {
            warn!("could not resolve linked issues of {}: {}", issue_key, e);
            Vec::new()
        }
    }
}

fn try_fetch_linked_issues(tracker: &dyn IssueTracker, issue_key: &str) -> Result<Vec<LinkedIssue>, String> {
    let issue = tracker.issue(issue_key)?;
    let mut linked = Vec::new();

    for link in issue.links() {
        let Some(target) = link.target_key() else {
            debug!("skipping link without target on {}", issue_key);
            continue;
        };
        let target_issue = tracker.issue(target)?;
        linked.push(LinkedIssue { issue: target_issue, label: link.label() });
    }

    Ok(linked)
}
