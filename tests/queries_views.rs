use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use studyflow::Task;
use studyflow::models::format_timestamp;
use studyflow::queries::{
    self, Stats, StatusFilter, TaskFilter, Urgency, classify_urgency, format_due, sorted_pending,
};
use studyflow::store::AppStore;

fn task_due(title: &str, subject_id: &str, due: chrono::DateTime<Utc>) -> Task {
    Task::new(title.to_string(), subject_id.to_string(), format_timestamp(due))
}

#[test]
fn pending_tasks_order_by_due_date_with_urgency() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let tasks = vec![
        task_due("normal", "1", now + Duration::hours(100)),
        task_due("urgent", "1", now + Duration::hours(1)),
        task_due("soon", "1", now + Duration::hours(30)),
    ];

    let ordered = sorted_pending(&tasks);
    let titles: Vec<&str> = ordered.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["urgent", "soon", "normal"]);

    let urgencies: Vec<Urgency> = ordered.iter().map(|t| classify_urgency(t, now)).collect();
    assert_eq!(urgencies, vec![Urgency::Urgent, Urgency::Soon, Urgency::Normal]);
}

#[test]
fn overdue_and_completed_classification() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let mut late = task_due("late", "1", now - Duration::hours(2));
    assert_eq!(classify_urgency(&late, now), Urgency::Overdue);
    assert_eq!(format_due(&late.due_date, now), "Vencida");

    late.completed = true;
    assert_eq!(classify_urgency(&late, now), Urgency::Completed);
    assert!(sorted_pending(std::slice::from_ref(&late)).is_empty());
}

#[test]
fn due_text_buckets() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let at = |h: i64| format_timestamp(now + Duration::hours(h));

    assert_eq!(format_due(&at(-72), now), "Vencida hace 3 días");
    assert_eq!(format_due(&at(5), now), "Vence en 5 horas");
    assert_eq!(format_due(&at(30), now), "Vence mañana");
    assert_eq!(format_due("pronto", now), "Vence pronto");
}

#[test]
fn stats_follow_store_changes() {
    let mut store = AppStore::new();
    store.initialize_demo_data();
    assert_eq!(
        queries::stats(&store),
        Stats { subjects: 2, pending_tasks: 1, completed_tasks: 0, notes: 1 }
    );

    store.toggle_task("1");
    store.quick_add_task("otra", None);
    assert_eq!(
        queries::stats(&store),
        Stats { subjects: 2, pending_tasks: 1, completed_tasks: 1, notes: 1 }
    );
}

#[test]
fn filters_combine_status_and_subject() {
    let now = Utc::now();
    let mut tasks = vec![
        task_due("a", "1", now),
        task_due("b", "2", now),
        task_due("c", "1", now),
    ];
    tasks[2].completed = true;

    let filter = TaskFilter { status: StatusFilter::Pending, subject_id: Some("1".into()) };
    let titles: Vec<&str> = queries::filter_tasks(&tasks, &filter)
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["a"]);

    let all = TaskFilter::default();
    assert_eq!(queries::filter_tasks(&tasks, &all).len(), 3);
    assert_eq!(StatusFilter::Completed.next(), StatusFilter::All);
}

#[test]
fn note_search_matches_tags_case_insensitively() {
    let mut store = AppStore::new();
    store.initialize_demo_data();

    assert_eq!(queries::search_notes(store.notes(), "frontend").len(), 1);
    assert_eq!(queries::search_notes(store.notes(), "HOOKS").len(), 1);
    assert_eq!(queries::search_notes(store.notes(), "").len(), 1);
    assert!(queries::search_notes(store.notes(), "python").is_empty());
}

#[test]
fn labels_for_missing_subjects() {
    let mut store = AppStore::new();
    store.initialize_demo_data();
    let orphan = task_due("orphan", "99", Utc::now());

    assert_eq!(queries::subject_label_for_task(store.subjects(), &orphan), "Materia desconocida");
    assert_eq!(
        queries::subject_label_for_task(store.subjects(), &store.tasks()[0]),
        "Programación Web"
    );

    let mut note = store.notes()[0].clone();
    note.subject_id = None;
    assert_eq!(queries::subject_label_for_note(store.subjects(), &note), "Sin materia");
}
