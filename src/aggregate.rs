/// Grouping of fetched issues by component
///
/// This module handles:
/// - Bucketing stories and subtasks under each of their components
/// - Dropping components that end up with nothing to report
/// - Merging the per-story subtask fetch back into the component buckets
///
/// Subtasks are kept in a flat per-component bucket; the renderer pairs
/// them with their story by parent key.

use crate::fetch::SubtasksByStory;
use crate::types::{Issue, OTHER_COMPONENT};
use log::debug;

/// Stories and subtasks reported under one component
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentGroup {
    pub name: String,
    pub stories: Vec<Issue>,
    pub subtasks: Vec<Issue>,
}

impl ComponentGroup {
    fn new(name: &str) -> Self {
        ComponentGroup { name: name.to_string(), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty() && self.subtasks.is_empty()
    }

    /// Subtasks of `story_key`, in bucket order
    pub fn subtasks_of<'a>(&'a self, story_key: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.subtasks.iter().filter(move |s| s.parent_key() == Some(story_key))
    }
}

/// How component groups are ordered in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrdering {
    /// Order of first appearance in the fetched issues
    #[default]
    Insertion,
    /// First appearance, except that "Other" always comes last
    OtherLast,
}

/// Component groups in report order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    pub groups: Vec<ComponentGroup>,
    pub ordering: GroupOrdering,
}

impl Aggregation {
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&ComponentGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Group for `name`, created at the end if not seen yet
    fn group_mut(&mut self, name: &str) -> &mut ComponentGroup {
        let index = match self.groups.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                self.groups.push(ComponentGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    fn apply_ordering(&mut self) {
        if self.ordering == GroupOrdering::OtherLast {
            // Stable sort keeps first-appearance order for the rest
            self.groups.sort_by_key(|g| g.name == OTHER_COMPONENT);
        }
    }
}

/// Group stories and subtasks under each of their components
///
/// Issues without components go under "Other". Issues that are neither a
/// story nor a subtask are not reported and are dropped.
pub fn organize_by_component(issues: &[Issue], ordering: GroupOrdering) -> Aggregation {
    let mut aggregation = Aggregation { groups: Vec::new(), ordering };

    for issue in issues {
        let is_story = issue.is_story();
        if !is_story && !issue.is_subtask() {
            debug!("skipping {} of type {:?}", issue.key, issue.issue_type());
            continue;
        }

        for component in issue.component_names() {
            let group = aggregation.group_mut(&component);
            if is_story {
                group.stories.push(issue.clone());
            } else {
                group.subtasks.push(issue.clone());
            }
        }
    }

    aggregation.groups.retain(|g| !g.is_empty());
    aggregation.apply_ordering();

    debug!("organized issues into {} components", aggregation.groups.len());
    aggregation
}

/// Append each story's separately fetched subtasks to the story's components
///
/// A story's components are derived the same way as in the first pass. A
/// component not seen before is created. Subtasks already in a bucket (by
/// key) are not added twice.
pub fn merge_subtasks_per_component(aggregation: &mut Aggregation, stories: &[Issue], subtasks: &SubtasksByStory) {
    for story in stories {
        let Some((_, story_subtasks)) = subtasks.iter().find(|(key, _)| *key == story.key) else {
            continue;
        };

        for component in story.component_names() {
            let group = aggregation.group_mut(&component);
            for subtask in story_subtasks {
                if !group.subtasks.iter().any(|s| s.key == subtask.key) {
                    group.subtasks.push(subtask.clone());
                }
            }
        }
    }

    aggregation.groups.retain(|g| !g.is_empty());
    aggregation.apply_ordering();
}
