/// Core data structures for tracker issues
///
/// This module defines the issue snapshot deserialized from the tracker's
/// REST payloads and the typed per-column accessors used by the report.
/// Every accessor returns a `FieldValue`, so a missing intermediate field
/// (an unassigned issue, a null description) is an explicit `Absent`
/// rather than an error.

use crate::sprint;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Issue type name of top-level stories
pub const STORY_TYPE: &str = "Story";

/// Issue type name of subtasks bucketed from the flat search
pub const SUBTASK_TYPE: &str = "Sub-task";

/// Component group used for issues without any component
pub const OTHER_COMPONENT: &str = "Other";

/// Text written for any field that could not be resolved
pub const EMPTY_DATA: &str = "Empty Data";

/// A single issue as returned by the tracker
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

/// The `fields` object of an issue payload
///
/// Custom fields are kept as raw JSON in `custom` since their ids are
/// instance-specific and only known from configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct IssueFields {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Named>,
    pub created: Option<String>,
    pub updated: Option<String>,
    #[serde(rename = "issuetype")]
    pub issue_type: Option<Named>,
    pub assignee: Option<User>,
    pub status: Option<Named>,
    pub components: Option<Vec<Named>>,
    #[serde(rename = "issuelinks")]
    pub issue_links: Option<Vec<IssueLink>>,
    pub parent: Option<IssueRef>,
    #[serde(flatten)]
    pub custom: BTreeMap<String, serde_json::Value>,
}

/// Any tracker object identified by a display name (priority, status, type, component)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct User {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// Reference to another issue, as embedded in links and `parent`
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct IssueRef {
    pub key: String,
}

/// A typed, directional link between two issues
///
/// Exactly one of `inward_issue` / `outward_issue` is set by the tracker.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct IssueLink {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    #[serde(rename = "inwardIssue")]
    pub inward_issue: Option<IssueRef>,
    #[serde(rename = "outwardIssue")]
    pub outward_issue: Option<IssueRef>,
}

impl IssueLink {
    /// Key of the issue on the other end of the link
    pub fn target_key(&self) -> Option<&str> {
        self.inward_issue
            .as_ref()
            .or(self.outward_issue.as_ref())
            .map(|r| r.key.as_str())
    }

    /// Relationship label as seen from the issue holding the link
    ///
    /// Inward targets use the inward phrase ("is blocked by"), everything
    /// else the outward phrase ("blocks"). Falls back to the type name.
    pub fn label(&self) -> String {
        let phrase = if self.inward_issue.is_some() {
            self.link_type.inward.as_ref()
        } else {
            self.link_type.outward.as_ref()
        };
        phrase
            .or(self.link_type.name.as_ref())
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LinkType {
    pub name: Option<String>,
    pub inward: Option<String>,
    pub outward: Option<String>,
}

impl Issue {
    /// Issue type name, if the payload carries one
    pub fn issue_type(&self) -> Option<&str> {
        self.fields.issue_type.as_ref().and_then(|t| t.name.as_deref())
    }

    pub fn is_story(&self) -> bool {
        self.issue_type() == Some(STORY_TYPE)
    }

    pub fn is_subtask(&self) -> bool {
        self.issue_type() == Some(SUBTASK_TYPE)
    }

    pub fn parent_key(&self) -> Option<&str> {
        self.fields.parent.as_ref().map(|p| p.key.as_str())
    }

    /// Component names of the issue, or `["Other"]` when it has none
    pub fn component_names(&self) -> Vec<String> {
        let names: Vec<String> = self
            .fields
            .components
            .iter()
            .flatten()
            .filter_map(|c| c.name.clone())
            .collect();

        if names.is_empty() {
            vec![OTHER_COMPONENT.to_string()]
        } else {
            names
        }
    }

    pub fn links(&self) -> &[IssueLink] {
        self.fields.issue_links.as_deref().unwrap_or(&[])
    }

    /// Resolve the value shown in `column` for this issue
    pub fn resolve(&self, column: Column, field_ids: &FieldIds) -> FieldValue {
        let f = &self.fields;
        let value = match column {
            Column::Component => {
                return FieldValue::Present(self.component_names().join(", "));
            }
            Column::Key => Some(self.key.clone()),
            Column::Summary => f.summary.clone(),
            Column::Description => f.description.clone(),
            Column::Priority => f.priority.as_ref().and_then(|p| p.name.clone()),
            Column::Created => f.created.clone(),
            Column::Updated => f.updated.clone(),
            Column::IssueType => self.issue_type().map(str::to_string),
            Column::Assignee => f.assignee.as_ref().and_then(|a| a.display_name.clone()),
            Column::Status => f.status.as_ref().and_then(|s| s.name.clone()),
            Column::Sprint => f
                .custom
                .get(&field_ids.sprint)
                .and_then(sprint::parse_sprint_name),
            Column::ReviewObjectPath => f
                .custom
                .get(&field_ids.review_path)
                .and_then(custom_text),
        };
        FieldValue::from(value)
    }
}

/// Render a free-text custom field value; null counts as absent
fn custom_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Result of resolving one field of an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Present(String),
    Absent,
}

impl FieldValue {
    /// Text written into the cell
    pub fn display(&self) -> &str {
        match self {
            FieldValue::Present(s) => s,
            FieldValue::Absent => EMPTY_DATA,
        }
    }

    /// Absent and empty values are flagged with the highlight fill
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Present(s) => s.is_empty(),
            FieldValue::Absent => true,
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Present)
    }
}

/// Instance-specific custom field ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    pub sprint: String,
    pub review_path: String,
}

/// A report column; `header` is the exact label written to row 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Component,
    Key,
    Summary,
    Description,
    Priority,
    Created,
    Updated,
    IssueType,
    Assignee,
    Status,
    Sprint,
    ReviewObjectPath,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Component => "Component",
            Column::Key => "Key",
            Column::Summary => "Summary",
            Column::Description => "Description",
            Column::Priority => "Priority",
            Column::Created => "Created",
            Column::Updated => "Updated",
            Column::IssueType => "IssueType",
            Column::Assignee => "Assignee",
            Column::Status => "Status",
            Column::Sprint => "Sprint",
            Column::ReviewObjectPath => "Review Object Path",
        }
    }
}

/// Which column layout to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSet {
    /// All columns including Priority, Created and Updated
    #[default]
    Full,
    /// Omits Priority, Created and Updated
    Compact,
}

impl ColumnSet {
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = vec![Column::Component, Column::Key, Column::Summary, Column::Description];
        if *self == ColumnSet::Full {
            columns.extend([Column::Priority, Column::Created, Column::Updated]);
        }
        columns.extend([
            Column::IssueType,
            Column::Assignee,
            Column::Status,
            Column::Sprint,
            Column::ReviewObjectPath,
        ]);
        columns
    }
}
