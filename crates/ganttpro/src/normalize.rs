//! Identifier extraction from GanttPro payloads.
//!
//! GanttPro returns the created entity's identifier in different places
//! depending on API version (`data.ganttId`, `item.projectId`, a bare `id`,
//! ...). Each entity kind has an ordered list of field paths; the first path
//! that resolves to a usable identifier wins and later paths are never
//! consulted. Supporting a new payload shape means adding a path to a list.

use serde_json::Value;

use crate::models::RemoteId;

/// A field path into a JSON object, outermost key first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub &'static [&'static str]);

impl IdPath {
    /// Resolve this path against a payload.
    ///
    /// Only non-empty strings and numbers count as identifiers; `null`,
    /// booleans, arrays and objects are treated as absent.
    #[must_use]
    pub fn resolve(&self, payload: &Value) -> Option<RemoteId> {
        let leaf = self
            .0
            .iter()
            .try_fold(payload, |value, key| value.get(key))?;

        match leaf {
            Value::String(s) if !s.is_empty() => Some(RemoteId::Text(s.clone())),
            Value::Number(n) => Some(RemoteId::Number(n.clone())),
            _ => None,
        }
    }
}

impl std::fmt::Display for IdPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Precedence for `POST /projects` responses.
pub const PROJECT_ID_PATHS: &[IdPath] = &[
    IdPath(&["data", "ganttId"]),
    IdPath(&["data", "id"]),
    IdPath(&["item", "projectId"]),
    IdPath(&["item", "id"]),
    IdPath(&["projectId"]),
    IdPath(&["id"]),
    IdPath(&["ganttId"]),
];

/// Precedence for `POST /tasks` responses.
pub const TASK_ID_PATHS: &[IdPath] = &[
    IdPath(&["data", "id"]),
    IdPath(&["data", "ganttId"]),
    IdPath(&["item", "id"]),
    IdPath(&["id"]),
];

/// Extract an identifier using the first matching path.
#[must_use]
pub fn extract_id(payload: &Value, paths: &[IdPath]) -> Option<RemoteId> {
    paths.iter().find_map(|path| path.resolve(payload))
}

/// Extract a project identifier.
#[must_use]
pub fn project_id(payload: &Value) -> Option<RemoteId> {
    extract_id(payload, PROJECT_ID_PATHS)
}

/// Extract a task identifier.
#[must_use]
pub fn task_id(payload: &Value) -> Option<RemoteId> {
    extract_id(payload, TASK_ID_PATHS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_id_from_data_gantt_id() {
        let payload = json!({"data": {"ganttId": 1001, "id": 5}});
        assert_eq!(project_id(&payload), Some(RemoteId::from(1001)));
    }

    #[test]
    fn test_project_id_from_item() {
        let payload = json!({"item": {"projectId": "p-77", "id": "x"}});
        assert_eq!(project_id(&payload), Some(RemoteId::from("p-77")));
    }

    #[test]
    fn test_project_id_top_level_fallbacks() {
        assert_eq!(
            project_id(&json!({"projectId": 3, "id": 4})),
            Some(RemoteId::from(3))
        );
        assert_eq!(project_id(&json!({"id": 4})), Some(RemoteId::from(4)));
        assert_eq!(
            project_id(&json!({"ganttId": "g"})),
            Some(RemoteId::from("g"))
        );
    }

    #[test]
    fn test_task_id_prefers_data_over_item() {
        let payload = json!({"data": {"id": 10}, "item": {"id": 20}});
        assert_eq!(task_id(&payload), Some(RemoteId::from(10)));
    }

    #[test]
    fn test_null_values_fall_through() {
        let payload = json!({"data": {"id": null}, "item": {"id": "t-2"}});
        assert_eq!(task_id(&payload), Some(RemoteId::from("t-2")));
    }

    #[test]
    fn test_non_identifier_values_are_ignored() {
        let payload = json!({"data": {"id": {"nested": 1}}, "id": ""});
        assert_eq!(task_id(&payload), None);
    }

    #[test]
    fn test_missing_id_returns_none() {
        assert_eq!(project_id(&json!({"status": "ok"})), None);
        assert_eq!(project_id(&json!([1, 2, 3])), None);
        assert_eq!(task_id(&Value::Null), None);
    }

    #[test]
    fn test_numbers_are_not_coerced() {
        let payload = json!({"id": 12.5});
        assert_eq!(
            task_id(&payload).map(|id| id.to_string()),
            Some("12.5".to_string())
        );
    }

    #[test]
    fn test_path_display() {
        assert_eq!(PROJECT_ID_PATHS[0].to_string(), "data.ganttId");
    }
}
