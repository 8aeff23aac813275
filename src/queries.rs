//! Derived views over the store: counts, urgency, ordering, filters and
//! search. Everything here is a pure function of its inputs.

use std::cmp::Ordering;

use chrono::{DateTime, Local, Utc};

use crate::models::{Note, Subject, Task};
use crate::store::AppStore;

pub const UNKNOWN_SUBJECT: &str = "Materia desconocida";
pub const NO_SUBJECT: &str = "Sin materia";

const HOUR_MS: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub subjects: usize,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    pub notes: usize,
}

pub fn stats(store: &AppStore) -> Stats {
    let pending_tasks = store.tasks().iter().filter(|t| !t.completed).count();
    Stats {
        subjects: store.subjects().len(),
        pending_tasks,
        completed_tasks: store.tasks().len() - pending_tasks,
        notes: store.notes().len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    Urgent,
    Soon,
    Normal,
    Completed,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::Urgent => "urgent",
            Urgency::Soon => "soon",
            Urgency::Normal => "normal",
            Urgency::Completed => "completed",
        }
    }
}

fn hours_until(due: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (due - now).num_milliseconds() as f64 / HOUR_MS
}

/// Urgency of a task relative to `now`. Tasks whose due date cannot be
/// parsed count as `Normal`.
pub fn classify_urgency(task: &Task, now: DateTime<Utc>) -> Urgency {
    if task.completed {
        return Urgency::Completed;
    }
    let Some(due) = task.due_at() else {
        return Urgency::Normal;
    };
    let hours = hours_until(due, now);
    if hours < 0.0 {
        Urgency::Overdue
    } else if hours < 24.0 {
        Urgency::Urgent
    } else if hours < 72.0 {
        Urgency::Soon
    } else {
        Urgency::Normal
    }
}

/// Pending tasks, soonest due first. Unparseable dates sort last; ties keep
/// collection order.
pub fn sorted_pending<'a, I>(tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut pending: Vec<&Task> = tasks.into_iter().filter(|t| !t.completed).collect();
    pending.sort_by(|a, b| match (a.due_at(), b.due_at()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    pending
}

/// Completed tasks in collection order
pub fn completed<'a, I>(tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().filter(|t| t.completed).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Todas las tareas",
            StatusFilter::Pending => "Pendientes",
            StatusFilter::Completed => "Completadas",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: StatusFilter,
    /// `None` means every subject
    pub subject_id: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let status_match = match self.status {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Completed => task.completed,
        };
        let subject_match = self
            .subject_id
            .as_deref()
            .is_none_or(|id| task.subject_id == id);
        status_match && subject_match
    }
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Case-insensitive substring match on title, content or any tag
pub fn note_matches(note: &Note, term: &str) -> bool {
    let term = term.to_lowercase();
    note.title.to_lowercase().contains(&term)
        || note.content.to_lowercase().contains(&term)
        || note.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
}

pub fn search_notes<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    notes.iter().filter(|n| note_matches(n, term)).collect()
}

/// Human text for a due date relative to `now`
pub fn format_due(due_date: &str, now: DateTime<Utc>) -> String {
    let Some(due) = DateTime::parse_from_rfc3339(due_date)
        .ok()
        .map(|d| d.with_timezone(&Utc))
    else {
        return format!("Vence {}", due_date);
    };
    let hours = hours_until(due, now);

    if hours < -24.0 {
        format!("Vencida hace {} días", (hours / 24.0).floor().abs() as i64)
    } else if hours < 0.0 {
        "Vencida".to_string()
    } else if hours < 24.0 {
        format!("Vence en {} horas", hours.ceil() as i64)
    } else if hours < 48.0 {
        "Vence mañana".to_string()
    } else {
        format!("Vence {}", due.with_timezone(&Local).format("%d/%m/%Y"))
    }
}

pub fn subject_label_for_task<'a>(subjects: &'a [Subject], task: &Task) -> &'a str {
    subjects
        .iter()
        .find(|s| s.id == task.subject_id)
        .map(|s| s.name.as_str())
        .unwrap_or(UNKNOWN_SUBJECT)
}

pub fn subject_label_for_note<'a>(subjects: &'a [Subject], note: &Note) -> &'a str {
    match note.subject_id.as_deref() {
        None => NO_SUBJECT,
        Some(id) => subjects
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN_SUBJECT),
    }
}

pub fn tasks_for_subject<'a>(tasks: &'a [Task], subject_id: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.subject_id == subject_id).collect()
}

/// Multi-line summary shown by the subject detail popup
pub fn subject_details(subject: &Subject, tasks: &[Task]) -> String {
    format!(
        "Código: {}\nCréditos: {}\nProfesor: {}\nHorario: {}\nTareas activas: {}",
        subject.code,
        subject.credits,
        subject.professor.as_deref().unwrap_or("No asignado"),
        subject.schedule.as_deref().unwrap_or("No definido"),
        tasks_for_subject(tasks, &subject.id).len()
    )
}

/// Split a comma-separated tag string into trimmed, non-empty tags
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format_timestamp;
    use chrono::{Duration, TimeZone};

    fn task_due(now: DateTime<Utc>, hours: i64) -> Task {
        Task::new(
            "t".to_string(),
            "1".to_string(),
            format_timestamp(now + Duration::hours(hours)),
        )
    }

    #[test]
    fn completed_wins_over_date() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let mut task = task_due(now, -500);
        task.completed = true;
        assert_eq!(classify_urgency(&task, now), Urgency::Completed);
    }

    #[test]
    fn overdue_boundaries() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(classify_urgency(&task_due(now, -1), now), Urgency::Overdue);
        assert_eq!(classify_urgency(&task_due(now, 0), now), Urgency::Urgent);
        assert_eq!(classify_urgency(&task_due(now, 24), now), Urgency::Soon);
        assert_eq!(classify_urgency(&task_due(now, 72), now), Urgency::Normal);
    }

    #[test]
    fn format_due_texts() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let at = |h: i64| format_timestamp(now + Duration::hours(h));
        assert_eq!(format_due(&at(-72), now), "Vencida hace 3 días");
        assert_eq!(format_due(&at(-2), now), "Vencida");
        assert_eq!(format_due(&at(5), now), "Vence en 5 horas");
        assert_eq!(format_due(&at(30), now), "Vence mañana");
        let far = format_due(&at(24 * 10), now);
        assert!(far.starts_with("Vence "));
        assert!(far.contains("/2025"));
    }

    #[test]
    fn partial_hours_round_up() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let due = format_timestamp(now + Duration::minutes(90));
        assert_eq!(format_due(&due, now), "Vence en 2 horas");
    }

    #[test]
    fn parse_tags_trims_and_drops_empty() {
        assert_eq!(parse_tags(" a, b ,, c "), vec!["a", "b", "c"]);
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn empty_search_matches_everything() {
        let notes = vec![Note::new("A".into(), "x".into()), Note::new("B".into(), "y".into())];
        assert_eq!(search_notes(&notes, "").len(), 2);
    }
}
