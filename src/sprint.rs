/// Sprint custom field parsing
///
/// Older tracker servers return the sprint field as a list of opaque
/// strings such as
/// `com.atlassian.greenhopper.service.sprint.Sprint@1f[id=7,state=ACTIVE,name=Sprint 42,goal=]`.
/// Only the first element is looked at. Parsing never fails loudly: any
/// shape it does not recognise yields `None`, which the report shows as
/// the empty-data sentinel.

use serde_json::Value;

const NAME_MARKER: &str = ",name=";

/// Extract the sprint name from the raw custom field value
pub fn parse_sprint_name(value: &Value) -> Option<String> {
    let first = value.as_array()?.first()?;
    match first {
        Value::String(raw) => name_token(raw),
        // Cloud instances send structured sprint objects instead
        Value::Object(map) => map.get("name")?.as_str().map(str::to_string),
        _ => None,
    }
}

/// Text following `,name=` up to the next comma
///
/// When `name` is the last attribute the token ends at the closing
/// bracket (or the end of the string).
pub fn name_token(raw: &str) -> Option<String> {
    let start = raw.find(NAME_MARKER)? + NAME_MARKER.len();
    let rest = &raw[start..];
    let end = rest.find(',').or_else(|| rest.rfind(']')).unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_between_commas() {
        let value = json!(["com.atlassian.Sprint@1[rapidViewId=3,name=Sprint 42,startDate=2024,id=7"]);
        assert_eq!(parse_sprint_name(&value), Some("Sprint 42".to_string()));
    }

    #[test]
    fn test_documented_shape() {
        let value = json!(["...,name=Sprint 42,...,id=7"]);
        assert_eq!(parse_sprint_name(&value).as_deref(), Some("Sprint 42"));
    }

    #[test]
    fn test_only_first_element_is_used() {
        let value = json!(["x[id=1,name=Old,state=CLOSED]", "x[id=2,name=New,state=ACTIVE]"]);
        assert_eq!(parse_sprint_name(&value).as_deref(), Some("Old"));
    }

    #[test]
    fn test_name_as_last_attribute() {
        let value = json!(["x[id=1,state=ACTIVE,name=Sprint 9]"]);
        assert_eq!(parse_sprint_name(&value).as_deref(), Some("Sprint 9"));
    }

    #[test]
    fn test_structured_sprint_object() {
        let value = json!([{"id": 7, "name": "Sprint 42", "state": "active"}]);
        assert_eq!(parse_sprint_name(&value).as_deref(), Some("Sprint 42"));
    }

    #[test]
    fn test_non_collection_fails_closed() {
        assert_eq!(parse_sprint_name(&json!("x[id=1,name=Sprint 1,state=ACTIVE]")), None);
        assert_eq!(parse_sprint_name(&json!(null)), None);
        assert_eq!(parse_sprint_name(&json!(42)), None);
        assert_eq!(parse_sprint_name(&json!({"name": "Sprint 1"})), None);
    }

    #[test]
    fn test_mismatched_shapes_fail_closed() {
        assert_eq!(parse_sprint_name(&json!([])), None);
        assert_eq!(parse_sprint_name(&json!(["no marker here"])), None);
        assert_eq!(parse_sprint_name(&json!([17])), None);
        assert_eq!(parse_sprint_name(&json!([{"id": 7}])), None);
    }

    #[test]
    fn test_marker_requires_leading_comma() {
        assert_eq!(name_token("x[name=First,id=1]"), None);
    }
}
