use std::time::Duration;

use clap::Parser;
use studyflow::Config;
use studyflow::cli::{Cli, CliError, apply_overrides, handle_summary, write_summary};
use studyflow::config::ConfigError;
use studyflow::session::{MemorySessionStorage, SessionStore, demo_user};
use studyflow::store::AppStore;

#[test]
fn summary_lists_stats_and_pending_tasks() {
    let mut store = AppStore::new();
    store.initialize_demo_data();
    let mut out = Vec::new();

    write_summary(&store, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Materias activas:  2"));
    assert!(text.contains("Tareas pendientes (1)"));
    assert!(text.contains("Proyecto Final React - Programación Web (Alta"));
}

#[test]
fn summary_requires_signed_in_user() {
    let mut session = SessionStore::new(Box::new(MemorySessionStorage::new()), Duration::ZERO);
    session.restore();
    let mut out = Vec::new();

    let err = handle_summary(&session, &mut out).unwrap_err();
    assert!(matches!(err, CliError::NotAuthenticated));
    assert!(out.is_empty());

    let user = serde_json::to_string(&demo_user()).unwrap();
    let mut session = SessionStore::new(Box::new(MemorySessionStorage::with_value(user)), Duration::ZERO);
    session.restore();
    handle_summary(&session, &mut out).unwrap();
    assert!(!out.is_empty());
}

#[test]
fn theme_flag_overrides_config() {
    let cli = Cli::try_parse_from(["studyflow", "--theme", "campus", "whoami"]).unwrap();
    let mut config = Config::default();

    apply_overrides(&cli, &mut config).unwrap();
    assert_eq!(config.current_theme, "campus");

    let cli = Cli::try_parse_from(["studyflow", "--theme", "neon"]).unwrap();
    let err = apply_overrides(&cli, &mut config).unwrap_err();
    assert!(matches!(err, ConfigError::ThemeNotFound(_)));
    assert_eq!(config.current_theme, "campus");
}
