use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use studyflow::store::{AppStore, Collection};
use studyflow::{NoteUpdate, SubjectColor};

fn seeded() -> AppStore {
    let mut store = AppStore::new();
    store.initialize_demo_data();
    store
}

#[test]
fn toggling_twice_restores_task() {
    let mut store = seeded();
    let before = store.task("1").unwrap().clone();

    assert!(store.toggle_task("1"));
    assert!(store.task("1").unwrap().completed);
    assert!(store.toggle_task("1"));

    assert_eq!(store.task("1").unwrap(), &before);
    assert!(!store.toggle_task("missing"));
}

#[test]
fn deleting_subject_removes_its_tasks_and_notes() {
    let mut store = seeded();
    store.quick_add_task("de la materia 2", Some("2"));
    store.quick_add_note("nota 2", "contenido", Some("2"));

    assert!(store.delete_subject("1"));

    assert!(store.subject("1").is_none());
    assert!(store.tasks().iter().all(|t| t.subject_id != "1"));
    assert!(store.notes().iter().all(|n| n.subject_id.as_deref() != Some("1")));
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.notes().len(), 1);
    assert!(!store.delete_subject("1"));
}

#[test]
fn update_note_touches_only_given_fields() {
    let mut store = seeded();
    let before = store.note("1").unwrap().clone();

    assert!(store.update_note("1", NoteUpdate::title("Hooks avanzados")));

    let after = store.note("1").unwrap();
    assert_eq!(after.title, "Hooks avanzados");
    assert_eq!(after.content, before.content);
    assert_eq!(after.tags, before.tags);
    assert_eq!(after.subject_id, before.subject_id);
    assert_eq!(after.created_at, before.created_at);
    assert_ne!(after.updated_at, before.updated_at);
    assert!(!store.update_note("missing", NoteUpdate::title("x")));
}

#[test]
fn empty_note_update_leaves_note_untouched() {
    let mut store = seeded();
    let before = store.note("1").unwrap().clone();

    assert!(!store.update_note("1", NoteUpdate::default()));

    assert_eq!(store.note("1").unwrap(), &before);
}

#[test]
fn quick_adds_fill_demo_fields() {
    let mut store = AppStore::new();
    let mut rng = StdRng::seed_from_u64(11);

    let subject = store.quick_add_subject(&mut rng, "Cálculo Diferencial", "MAT-101").clone();
    assert_eq!(subject.credits, 4);
    assert_eq!(subject.professor.as_deref(), Some("Prof. Cálculo"));
    assert!(SubjectColor::ALL.contains(&subject.color));

    let task = store.quick_add_task("Ensayo", None).clone();
    assert_eq!(task.subject_id, subject.id);
    assert_eq!(task.description.as_deref(), Some("Descripción para: Ensayo"));
    assert!(!task.completed);

    let note = store.quick_add_note("Resumen", "texto", None).clone();
    assert_eq!(note.tags, vec!["nueva".to_string(), "nota".to_string()]);
    assert_eq!(note.subject_id, Some(subject.id));
}

#[test]
fn quick_task_without_subjects_uses_fallback_id() {
    let mut store = AppStore::new();
    let task = store.quick_add_task("Suelta", None);
    assert_eq!(task.subject_id, "1");
}

#[test]
fn seeding_requires_user_and_empty_collection() {
    let mut store = AppStore::new();
    assert!(!store.seed_if_needed(false, Collection::Subjects));
    assert!(store.is_empty(Collection::Subjects));

    assert!(store.seed_if_needed(true, Collection::Subjects));
    assert_eq!(store.subjects().len(), 2);

    store.delete_task("1");
    assert!(store.seed_if_needed(true, Collection::Tasks));
    assert_eq!(store.tasks().len(), 1);
    assert!(!store.seed_if_needed(true, Collection::Notes));
}
