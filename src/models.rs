use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner id every record carries; the app only knows one user.
pub const DEMO_USER_ID: &str = "1";

/// Generate a fresh record id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Format a timestamp the way every record stores it (RFC 3339, millis, `Z`)
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as a stored timestamp string
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SubjectColor {
    Blue,
    Green,
    Purple,
    Yellow,
    Red,
}

impl SubjectColor {
    pub const ALL: [SubjectColor; 5] = [
        SubjectColor::Blue,
        SubjectColor::Green,
        SubjectColor::Purple,
        SubjectColor::Yellow,
        SubjectColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectColor::Blue => "blue",
            SubjectColor::Green => "green",
            SubjectColor::Purple => "purple",
            SubjectColor::Yellow => "yellow",
            SubjectColor::Red => "red",
        }
    }
}

impl From<&str> for SubjectColor {
    /// Unknown names fall back to blue.
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "green" => SubjectColor::Green,
            "purple" => SubjectColor::Purple,
            "yellow" => SubjectColor::Yellow,
            "red" => SubjectColor::Red,
            _ => SubjectColor::Blue,
        }
    }
}

impl From<String> for SubjectColor {
    fn from(value: String) -> Self {
        SubjectColor::from(value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub code: String,
    pub credits: u32,
    pub color: SubjectColor,
    pub semester: String,
    pub professor: Option<String>,
    pub schedule: Option<String>,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Subject {
    pub fn new(name: String, code: String) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            name,
            code,
            credits: 0,
            color: SubjectColor::Blue,
            semester: String::new(),
            professor: None,
            schedule: None,
            user_id: DEMO_USER_ID.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Label shown on task cards
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "Alta",
            Priority::Medium => "Media",
            Priority::Low => "Baja",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: String, // RFC 3339
    pub completed: bool,
    pub priority: Priority,
    pub subject_id: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    pub fn new(title: String, subject_id: String, due_date: String) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            title,
            description: None,
            due_date,
            completed: false,
            priority: Priority::Medium,
            subject_id,
            user_id: DEMO_USER_ID.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Parsed due date, `None` when the stored string is not RFC 3339
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.due_date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub subject_id: Option<String>,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Note {
    pub fn new(title: String, content: String) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            title,
            content,
            tags: Vec::new(),
            subject_id: None,
            user_id: DEMO_USER_ID.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial set of note fields; `None` leaves a field untouched.
///
/// `subject_id: Some(None)` detaches the note from its subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub subject_id: Option<Option<String>>,
}

impl NoteUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.subject_id.is_none()
    }

    /// Merge into `note`; does not touch timestamps.
    pub fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(tags) = self.tags {
            note.tags = tags;
        }
        if let Some(subject_id) = self.subject_id {
            note.subject_id = subject_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_color_falls_back_to_blue() {
        let color: SubjectColor = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(color, SubjectColor::Blue);
        let color: SubjectColor = serde_json::from_str("\"purple\"").unwrap();
        assert_eq!(color, SubjectColor::Purple);
    }

    #[test]
    fn user_json_uses_camel_case_keys() {
        let user = User {
            id: "1".to_string(),
            email: "demo@studyflow.com".to_string(),
            name: "Usuario Demo".to_string(),
            avatar: None,
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            updated_at: "2025-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("avatar"));
    }

    #[test]
    fn ids_are_unique() {
        let a = Task::new("a".into(), "1".into(), now_timestamp());
        let b = Task::new("a".into(), "1".into(), now_timestamp());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn due_at_rejects_garbage() {
        let task = Task::new("a".into(), "1".into(), "tomorrow".into());
        assert!(task.due_at().is_none());
    }
}
