use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::Write;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::queries;
use crate::session::{AuthError, SessionError, SessionStore};
use crate::store::{AppStore, Collection};

#[derive(Parser)]
#[command(name = "studyflow")]
#[command(about = "StudyFlow - subjects, tasks and notes in the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (separate dev config/session)
    #[arg(long)]
    pub dev: bool,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Theme for this run, overriding `current_theme` from the config
    #[arg(long)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Print dashboard stats and pending tasks for the demo data
    Summary,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),
    #[error("{0}")]
    AuthError(#[from] AuthError),
    #[error("Not signed in; run `studyflow login` first")]
    NotAuthenticated,
    #[error("Failed to write output: {0}")]
    IoError(#[from] std::io::Error),
}

/// Apply command line overrides on top of the loaded config
pub fn apply_overrides(cli: &Cli, config: &mut Config) -> Result<(), ConfigError> {
    if let Some(name) = cli.theme.as_deref() {
        config.set_theme(name)?;
    }
    Ok(())
}

/// Handle the login command
pub fn handle_login(
    email: &str,
    password: &str,
    session: &mut SessionStore,
    runtime: &tokio::runtime::Runtime,
) -> Result<(), CliError> {
    let user = runtime.block_on(session.login(email, password))?;
    println!("Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

/// Handle the logout command
pub fn handle_logout(session: &mut SessionStore) -> Result<(), CliError> {
    session.logout()?;
    println!("Signed out");
    Ok(())
}

/// Handle the whoami command
pub fn handle_whoami(session: &SessionStore) -> Result<(), CliError> {
    match session.user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not signed in"),
    }
    Ok(())
}

/// Handle the summary command
pub fn handle_summary(session: &SessionStore, out: &mut impl Write) -> Result<(), CliError> {
    if !session.is_authenticated() {
        return Err(CliError::NotAuthenticated);
    }

    let mut store = AppStore::new();
    store.seed_if_needed(session.is_authenticated(), Collection::Subjects);
    write_summary(&store, out)
}

/// Render the dashboard numbers and the pending task list as plain text
pub fn write_summary(store: &AppStore, out: &mut impl Write) -> Result<(), CliError> {
    let now = Utc::now();
    let stats = queries::stats(store);

    writeln!(out, "Materias activas:  {}", stats.subjects)?;
    writeln!(out, "Tareas pendientes: {}", stats.pending_tasks)?;
    writeln!(out, "Notas guardadas:   {}", stats.notes)?;
    writeln!(out, "Completadas:       {}", stats.completed_tasks)?;

    let pending = queries::sorted_pending(store.tasks());
    if !pending.is_empty() {
        writeln!(out)?;
        writeln!(out, "Tareas pendientes ({})", pending.len())?;
        for task in pending {
            writeln!(
                out,
                "  [{}] {} - {} ({}, {})",
                queries::classify_urgency(task, now).label(),
                task.title,
                queries::subject_label_for_task(store.subjects(), task),
                task.priority.label(),
                queries::format_due(&task.due_date, now)
            )?;
        }
    }
    Ok(())
}
