use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use studyflow::{
    Config, Profile,
    cli::{Cli, Commands},
    session::{MemorySessionStorage, SessionStorage, SessionStore, SqliteSessionStorage},
};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let mut config = match cli.config {
        Some(ref path) => Config::load_from_path(&PathBuf::from(path))?,
        None => Config::load_with_profile(profile)?,
    };
    studyflow::cli::apply_overrides(&cli, &mut config)?;

    // Logging failures are not fatal; the app works without a log file
    if let Err(e) = studyflow::logging::init_logging(&config.log_level, &config.get_log_dir()) {
        eprintln!("warning: {}", e);
    }

    let storage: Box<dyn SessionStorage> = if cli.ephemeral {
        Box::new(MemorySessionStorage::new())
    } else {
        let session_path = config.get_session_path();
        Box::new(SqliteSessionStorage::new(
            session_path
                .to_str()
                .ok_or_else(|| color_eyre::eyre::eyre!("Session path contains invalid UTF-8"))?,
        )?)
    };
    let mut session = SessionStore::new(storage, config.login_delay());
    session.restore();

    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = studyflow::tui::App::new(config, session, runtime.handle().clone());
            studyflow::tui::run_event_loop(app)?;
        }
        Commands::Login { email, password } => {
            studyflow::cli::handle_login(&email, &password, &mut session, &runtime)?;
        }
        Commands::Logout => {
            studyflow::cli::handle_logout(&mut session)?;
        }
        Commands::Whoami => {
            studyflow::cli::handle_whoami(&session)?;
        }
        Commands::Summary => {
            studyflow::cli::handle_summary(&session, &mut std::io::stdout())?;
        }
    }

    Ok(())
}
