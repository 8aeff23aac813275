use chrono::{Duration, Utc};
use log::{debug, info};
use rand::Rng;

use crate::demo;
use crate::models::{
    Note, NoteUpdate, Priority, Subject, SubjectColor, Task, format_timestamp, now_timestamp,
};

/// Subject id assigned to quick tasks when no subject exists yet
pub const FALLBACK_SUBJECT_ID: &str = "1";

/// Days between a quick task's creation and its due date
pub const QUICK_TASK_DUE_DAYS: i64 = 7;

pub const QUICK_NOTE_TAGS: [&str; 2] = ["nueva", "nota"];

/// Which collection a screen is about to show; drives the seed gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Subjects,
    Tasks,
    Notes,
}

/// In-memory owner of subjects, tasks and notes.
///
/// Every mutation goes through `&mut self`, so readers never see a
/// half-applied change (a cascade delete is one call).
#[derive(Debug, Clone, Default)]
pub struct AppStore {
    subjects: Vec<Subject>,
    tasks: Vec<Task>,
    notes: Vec<Note>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        match collection {
            Collection::Subjects => self.subjects.is_empty(),
            Collection::Tasks => self.tasks.is_empty(),
            Collection::Notes => self.notes.is_empty(),
        }
    }

    pub fn set_subjects(&mut self, subjects: Vec<Subject>) {
        self.subjects = subjects;
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    pub fn add_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Remove a subject together with every task and note pointing at it.
    /// Returns false when no subject has that id.
    pub fn delete_subject(&mut self, id: &str) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        let tasks_before = self.tasks.len();
        self.tasks.retain(|t| t.subject_id != id);
        let notes_before = self.notes.len();
        self.notes.retain(|n| n.subject_id.as_deref() != Some(id));

        let removed = before != self.subjects.len();
        debug!(
            "event=subject_delete id={} found={} tasks_removed={} notes_removed={}",
            id,
            removed,
            tasks_before - self.tasks.len(),
            notes_before - self.notes.len()
        );
        removed
    }

    /// Flip `completed`; `updated_at` is left as is.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }

    pub fn delete_note(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        before != self.notes.len()
    }

    /// Merge `update` into the note and refresh its `updated_at`.
    /// An empty update changes nothing and returns false.
    pub fn update_note(&mut self, id: &str, update: NoteUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                update.apply_to(note);
                note.updated_at = now_timestamp();
                true
            }
            None => false,
        }
    }

    /// Build a plausible subject from a name and code and append it.
    pub fn quick_add_subject<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        name: &str,
        code: &str,
    ) -> &Subject {
        let color = SubjectColor::ALL[rng.random_range(0..SubjectColor::ALL.len())];
        let first_word = name.split(' ').next().unwrap_or_default();

        let mut subject = Subject::new(name.to_string(), code.to_string());
        subject.credits = 4;
        subject.color = color;
        subject.semester = demo::DEFAULT_SEMESTER.to_string();
        subject.professor = Some(format!("Prof. {}", first_word));
        subject.schedule = Some(demo::DEFAULT_SCHEDULE.to_string());

        self.add_subject(subject);
        &self.subjects[self.subjects.len() - 1]
    }

    /// Append a medium-priority task due in a week.
    ///
    /// Without an explicit subject the task goes to the first subject, or to
    /// `FALLBACK_SUBJECT_ID` when there are none.
    pub fn quick_add_task(&mut self, title: &str, subject_id: Option<&str>) -> &Task {
        let target = subject_id
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| self.subjects.first().map(|s| s.id.clone()))
            .unwrap_or_else(|| FALLBACK_SUBJECT_ID.to_string());
        let due = format_timestamp(Utc::now() + Duration::days(QUICK_TASK_DUE_DAYS));

        let mut task = Task::new(title.to_string(), target, due);
        task.description = Some(format!("Descripción para: {}", title));
        task.priority = Priority::Medium;

        self.add_task(task);
        &self.tasks[self.tasks.len() - 1]
    }

    /// Append a note tagged `nueva`/`nota`, attached to the given subject or
    /// the first one if any.
    pub fn quick_add_note(&mut self, title: &str, content: &str, subject_id: Option<&str>) -> &Note {
        let target = subject_id
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| self.subjects.first().map(|s| s.id.clone()));

        let mut note = Note::new(title.to_string(), content.to_string());
        note.tags = QUICK_NOTE_TAGS.iter().map(|t| t.to_string()).collect();
        note.subject_id = target;

        self.add_note(note);
        &self.notes[self.notes.len() - 1]
    }

    /// Replace all three collections with the fixed demo dataset.
    pub fn initialize_demo_data(&mut self) {
        self.subjects = demo::demo_subjects();
        self.tasks = demo::demo_tasks();
        self.notes = demo::demo_notes();
        info!(
            "event=demo_seed subjects={} tasks={} notes={}",
            self.subjects.len(),
            self.tasks.len(),
            self.notes.len()
        );
    }

    /// Seed only when a user is signed in and `collection` is empty.
    /// Returns true when seeding happened.
    pub fn seed_if_needed(&mut self, authenticated: bool, collection: Collection) -> bool {
        if authenticated && self.is_empty(collection) {
            self.initialize_demo_data();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn quick_subject_derives_professor_from_first_word() {
        let mut store = AppStore::new();
        let mut rng = StdRng::seed_from_u64(3);
        let subject = store.quick_add_subject(&mut rng, "Física General", "MAT-123");
        assert_eq!(subject.professor.as_deref(), Some("Prof. Física"));
        assert_eq!(subject.credits, 4);
        assert_eq!(subject.semester, "2025-1");
        assert_eq!(subject.schedule.as_deref(), Some("Lun/Mié 10:00-12:00"));
    }

    #[test]
    fn quick_task_without_subjects_uses_fallback() {
        let mut store = AppStore::new();
        let task = store.quick_add_task("Leer", None);
        assert_eq!(task.subject_id, FALLBACK_SUBJECT_ID);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
    }

    #[test]
    fn seed_gate_requires_auth_and_empty_collection() {
        let mut store = AppStore::new();
        assert!(!store.seed_if_needed(false, Collection::Subjects));
        assert!(store.subjects().is_empty());
        assert!(store.seed_if_needed(true, Collection::Subjects));
        assert!(!store.seed_if_needed(true, Collection::Subjects));
    }

    #[test]
    fn missing_ids_are_noops() {
        let mut store = AppStore::new();
        store.initialize_demo_data();
        assert!(!store.toggle_task("missing"));
        assert!(!store.delete_task("missing"));
        assert!(!store.delete_note("missing"));
        assert!(!store.update_note("missing", NoteUpdate::title("x")));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.notes().len(), 1);
    }
}
