/// In-memory tracker and issue builders shared by unit tests

use crate::api::{IssueTracker, SearchPage};
use crate::types::Issue;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

/// Tracker double answering searches from canned result lists
#[derive(Default)]
pub struct FakeTracker {
    searches: BTreeMap<String, Vec<Issue>>,
    issues: BTreeMap<String, Issue>,
    failing: HashSet<String>,
    fail_searches: bool,
    reported_total: Option<usize>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the result list for an exact query string
    pub fn with_search(mut self, jql: &str, issues: Vec<Issue>) -> Self {
        for issue in &issues {
            self.issues.entry(issue.key.clone()).or_insert_with(|| issue.clone());
        }
        self.searches.insert(jql.to_string(), issues);
        self
    }

    /// Register an issue reachable by key (overrides search copies)
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.key.clone(), issue);
        self
    }

    /// Make lookups of `key` fail with a server error
    pub fn with_failing_issue(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn with_failing_searches(mut self) -> Self {
        self.fail_searches = true;
        self
    }

    /// Report `total` on every page instead of the real result count
    pub fn with_reported_total(mut self, total: usize) -> Self {
        self.reported_total = Some(total);
        self
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl IssueTracker for FakeTracker {
    fn search(&self, jql: &str, start_at: usize, max_results: usize) -> Result<SearchPage, String> {
        self.calls.borrow_mut().push(format!("search {} @{}", jql, start_at));
        if self.fail_searches {
            return Err("search endpoint unavailable".to_string());
        }

        let all = self.searches.get(jql).cloned().unwrap_or_default();
        let issues: Vec<Issue> = all.iter().skip(start_at).take(max_results).cloned().collect();
        Ok(SearchPage { total: self.reported_total.unwrap_or(all.len()), issues })
    }

    fn issue(&self, key: &str) -> Result<Issue, String> {
        self.calls.borrow_mut().push(format!("issue {}", key));
        if self.failing.contains(key) {
            return Err(format!("issue {} returned HTTP 500", key));
        }
        self.issues.get(key).cloned().ok_or_else(|| format!("issue {} returned HTTP 404", key))
    }
}

/// Build an issue of the given type and components
pub fn issue(key: &str, issue_type: &str, components: &[&str]) -> Issue {
    issue_from(key, issue_type, components, Value::Null, vec![])
}

/// Build a subtask of `parent`
pub fn subtask(key: &str, parent: &str, components: &[&str]) -> Issue {
    issue_from(key, "Sub-task", components, json!({"key": parent}), vec![])
}

/// Build an issue carrying the given links
pub fn issue_with_links(key: &str, issue_type: &str, components: &[&str], links: Vec<Value>) -> Issue {
    issue_from(key, issue_type, components, Value::Null, links)
}

/// An outward link to `target` labelled `label`
pub fn outward_link(target: &str, label: &str) -> Value {
    json!({
        "type": {"name": "Relates", "inward": format!("{} (inward)", label), "outward": label},
        "outwardIssue": {"key": target}
    })
}

/// An inward link from `target` labelled `label`
pub fn inward_link(target: &str, label: &str) -> Value {
    json!({
        "type": {"name": "Blocks", "inward": label, "outward": format!("{} (outward)", label)},
        "inwardIssue": {"key": target}
    })
}

fn issue_from(key: &str, issue_type: &str, components: &[&str], parent: Value, links: Vec<Value>) -> Issue {
    let components: Vec<Value> = components.iter().map(|c| json!({"name": c})).collect();
    let value = json!({
        "key": key,
        "fields": {
            "summary": format!("Summary of {}", key),
            "description": format!("Description of {}", key),
            "priority": {"name": "Medium"},
            "created": "2024-03-01T09:00:00.000+0000",
            "updated": "2024-03-02T09:00:00.000+0000",
            "issuetype": {"name": issue_type},
            "assignee": {"displayName": "Dana Reyes"},
            "status": {"name": "To Do"},
            "components": components,
            "issuelinks": links,
            "parent": parent,
            "customfield_10020": ["x[id=7,name=Sprint 42,state=ACTIVE]"],
            "customfield_10100": format!("/review/{}", key)
        }
    });
    serde_json::from_value(value).unwrap()
}
