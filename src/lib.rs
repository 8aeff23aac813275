pub mod cli;
pub mod config;
pub mod demo;
pub mod logging;
pub mod models;
pub mod queries;
pub mod session;
pub mod store;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use models::{Note, NoteUpdate, Priority, Subject, SubjectColor, Task, User};
pub use session::{SessionStorage, SessionStore};
pub use store::AppStore;
pub use utils::Profile;
