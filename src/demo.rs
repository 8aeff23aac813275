//! Fixed demo content: the seed dataset and the sample titles the
//! quick-add actions pick from.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::models::{
    DEMO_USER_ID, Note, Priority, Subject, SubjectColor, Task, now_timestamp,
};

pub const DEFAULT_SEMESTER: &str = "2025-1";
pub const DEFAULT_SCHEDULE: &str = "Lun/Mié 10:00-12:00";

/// Subject names offered by the dashboard's quick-add action
pub const DASHBOARD_SUBJECT_NAMES: &[&str] = &[
    "Análisis Matemático",
    "Física General",
    "Química Orgánica",
    "Historia del Arte",
    "Inglés Técnico",
    "Estadística",
];

/// Subject names offered by the subjects screen's quick-add action
pub const SUBJECT_NAMES: &[&str] = &[
    "Cálculo Diferencial",
    "Programación Orientada a Objetos",
    "Estructuras de Datos",
    "Sistemas Operativos",
    "Redes de Computadores",
    "Ingeniería de Software",
];

pub const DASHBOARD_TASK_TITLES: &[&str] = &[
    "Estudiar para parcial",
    "Entregar laboratorio",
    "Revisar apuntes",
    "Hacer ejercicios",
    "Preparar presentación",
    "Leer capítulo 5",
];

pub const TASK_TITLES: &[&str] = &[
    "Estudiar para parcial de matemáticas",
    "Entregar informe de laboratorio",
    "Revisar apuntes de la semana",
    "Hacer ejercicios del capítulo 4",
    "Preparar presentación grupal",
    "Leer artículo científico",
    "Completar tarea de programación",
];

/// Task titles used when adding a task from a subject card
pub const SUBJECT_TASK_TITLES: &[&str] = &[
    "Parcial 1",
    "Tarea práctica",
    "Ensayo final",
    "Proyecto grupal",
    "Laboratorio 3",
];

pub const DASHBOARD_NOTE_TITLES: &[&str] = &[
    "Resumen de clase",
    "Conceptos importantes",
    "Fórmulas clave",
    "Ideas para proyecto",
    "Dudas pendientes",
    "Recursos útiles",
];

pub const NOTE_TITLES: &[&str] = &[
    "Conceptos importantes del capítulo 5",
    "Resumen de la clase de hoy",
    "Fórmulas para el examen",
    "Ideas para el proyecto final",
    "Dudas sobre programación",
    "Recursos útiles encontrados",
];

/// Pick one entry from a non-empty pool
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Random subject code such as `ING-417`
pub fn subject_code<R: Rng + ?Sized>(rng: &mut R, prefix: &str) -> String {
    format!("{}-{}", prefix, rng.random_range(100..1000))
}

/// Short body used by the dashboard's quick note
pub fn short_note_content(title: &str) -> String {
    format!(
        "Esta es una nota sobre {}. Contenido automático generado para testing.",
        title
    )
}

/// Longer body used by the notes screen's quick note
pub fn long_note_content(title: &str) -> String {
    format!(
        "Esta es una nota sobre {}.\n\nPuntos importantes:\n- Punto 1\n- Punto 2\n- Punto 3\n\nNotas adicionales: Esta nota fue generada automáticamente para testing.",
        title
    )
}

pub fn demo_subjects() -> Vec<Subject> {
    let now = now_timestamp();
    vec![
        Subject {
            id: "1".to_string(),
            name: "Programación Web".to_string(),
            code: "ING-301".to_string(),
            credits: 4,
            color: SubjectColor::Blue,
            semester: DEFAULT_SEMESTER.to_string(),
            professor: Some("Dr. García".to_string()),
            schedule: Some(DEFAULT_SCHEDULE.to_string()),
            user_id: DEMO_USER_ID.to_string(),
            created_at: now.clone(),
            updated_at: now.clone(),
        },
        Subject {
            id: "2".to_string(),
            name: "Base de Datos".to_string(),
            code: "ING-250".to_string(),
            credits: 3,
            color: SubjectColor::Green,
            semester: DEFAULT_SEMESTER.to_string(),
            professor: Some("Dra. López".to_string()),
            schedule: Some("Mar/Jue 14:00-16:00".to_string()),
            user_id: DEMO_USER_ID.to_string(),
            created_at: now.clone(),
            updated_at: now,
        },
    ]
}

pub fn demo_tasks() -> Vec<Task> {
    let now = now_timestamp();
    vec![Task {
        id: "1".to_string(),
        title: "Proyecto Final React".to_string(),
        description: Some("Desarrollar aplicación web con React y TypeScript".to_string()),
        due_date: "2025-02-15T23:59:00.000Z".to_string(),
        completed: false,
        priority: Priority::High,
        subject_id: "1".to_string(),
        user_id: DEMO_USER_ID.to_string(),
        created_at: now.clone(),
        updated_at: now,
    }]
}

pub fn demo_notes() -> Vec<Note> {
    vec![Note {
        id: "1".to_string(),
        title: "Conceptos de React Hooks".to_string(),
        content: "useState, useEffect, useContext... Los hooks permiten usar estado y otras características de React.".to_string(),
        tags: vec![
            "React".to_string(),
            "JavaScript".to_string(),
            "Frontend".to_string(),
        ],
        subject_id: Some("1".to_string()),
        user_id: DEMO_USER_ID.to_string(),
        created_at: "2025-01-15".to_string(),
        updated_at: "2025-01-15".to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn subject_code_has_three_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let code = subject_code(&mut rng, "ING");
            let digits = code.strip_prefix("ING-").unwrap();
            assert_eq!(digits.len(), 3);
            assert!(digits.parse::<u32>().is_ok());
        }
    }

    #[test]
    fn pick_stays_in_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let title = pick(&mut rng, TASK_TITLES);
        assert!(TASK_TITLES.contains(&title));
    }

    #[test]
    fn seed_references_are_consistent() {
        let subjects = demo_subjects();
        assert!(demo_tasks()
            .iter()
            .all(|t| subjects.iter().any(|s| s.id == t.subject_id)));
    }
}
