use chrono::Utc;
use log::{debug, info};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::demo;
use crate::models::{Note, NoteUpdate, Subject, Task, User};
use crate::queries::{self, StatusFilter, TaskFilter};
use crate::session::{AuthError, SessionStore, authenticate};
use crate::store::{AppStore, Collection};
use crate::tui::widgets::editor::Editor;
use crate::Config;

const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Login,
    Dashboard,
    Subjects,
    Tasks,
    Notes,
}

impl Screen {
    /// Screens reachable from the tab bar, in order
    pub const TABS: [Screen; 4] = [Screen::Dashboard, Screen::Subjects, Screen::Tasks, Screen::Notes];

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Screen::Home | Screen::Login)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Inicio",
            Screen::Login => "Iniciar Sesión",
            Screen::Dashboard => "Dashboard",
            Screen::Subjects => "Materias",
            Screen::Tasks => "Tareas",
            Screen::Notes => "Notas",
        }
    }

    /// Collection whose emptiness triggers demo seeding on this screen
    fn seed_collection(&self) -> Option<Collection> {
        match self {
            Screen::Dashboard | Screen::Subjects => Some(Collection::Subjects),
            Screen::Tasks => Some(Collection::Tasks),
            Screen::Notes => Some(Collection::Notes),
            Screen::Home | Screen::Login => None,
        }
    }

    fn tab_index(&self) -> Option<usize> {
        Self::TABS.iter().position(|s| s == self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    View,
    Search,
    Help,
    EditNote,
    Confirm,
    Details,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: Editor,
    pub password: Editor,
    pub current_field: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: Editor::new(),
            password: Editor::new(),
            current_field: LoginField::Email,
        }
    }
}

impl LoginForm {
    pub fn current_editor(&mut self) -> &mut Editor {
        match self.current_field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Content,
    Tags,
}

#[derive(Debug, Clone)]
pub struct NoteForm {
    pub note_id: String,
    pub title: Editor,
    pub content: Editor,
    pub tags: Editor,
    pub current_field: NoteField,
}

impl NoteForm {
    pub fn from_note(note: &Note) -> Self {
        Self {
            note_id: note.id.clone(),
            title: Editor::from_string(&note.title, false),
            content: Editor::from_string(&note.content, true),
            tags: Editor::from_string(&note.tags.join(", "), false),
            current_field: NoteField::Title,
        }
    }

    pub fn current_editor(&mut self) -> &mut Editor {
        match self.current_field {
            NoteField::Title => &mut self.title,
            NoteField::Content => &mut self.content,
            NoteField::Tags => &mut self.tags,
        }
    }

    pub fn navigate(&mut self, forward: bool) {
        self.current_field = match (self.current_field, forward) {
            (NoteField::Title, true) => NoteField::Content,
            (NoteField::Content, true) => NoteField::Tags,
            (NoteField::Tags, true) => NoteField::Title,
            (NoteField::Title, false) => NoteField::Tags,
            (NoteField::Content, false) => NoteField::Title,
            (NoteField::Tags, false) => NoteField::Content,
        };
    }

    /// Trimmed update, or the message to show when a required field is blank
    pub fn to_update(&self) -> Result<NoteUpdate, String> {
        let title = self.title.text().trim().to_string();
        let content = self.content.text().trim().to_string();
        if title.is_empty() || content.is_empty() {
            return Err("Título y contenido son obligatorios".to_string());
        }
        Ok(NoteUpdate {
            title: Some(title),
            content: Some(content),
            tags: Some(queries::parse_tags(&self.tags.text())),
            subject_id: None,
        })
    }
}

/// Something a confirmation modal will do when accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteSubject { id: String, name: String },
    DeleteTask { id: String, title: String },
    DeleteNote { id: String },
    QuickAdd(Collection),
}

impl PendingAction {
    pub fn title(&self) -> &'static str {
        match self {
            PendingAction::QuickAdd(Collection::Subjects) => "Nueva Materia",
            PendingAction::QuickAdd(Collection::Tasks) => "Nueva Tarea",
            PendingAction::QuickAdd(Collection::Notes) => "Nueva Nota",
            _ => "Confirmar",
        }
    }

    pub fn message(&self) -> String {
        match self {
            PendingAction::DeleteSubject { name, .. } => format!(
                "¿Eliminar la materia \"{}\"? Esto también eliminará todas sus tareas y notas.",
                name
            ),
            PendingAction::DeleteTask { title, .. } => format!("¿Eliminar la tarea \"{}\"?", title),
            PendingAction::DeleteNote { .. } => "¿Eliminar esta nota?".to_string(),
            PendingAction::QuickAdd(Collection::Subjects) => {
                "Para el testing, usaremos la función de agregar rápido con datos aleatorios.".to_string()
            }
            PendingAction::QuickAdd(Collection::Tasks) => {
                "Para el testing, usaremos la función de crear tarea rápida con datos de ejemplo.".to_string()
            }
            PendingAction::QuickAdd(Collection::Notes) => {
                "Para el testing, usaremos la función de crear nota rápida con contenido de ejemplo.".to_string()
            }
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            PendingAction::QuickAdd(Collection::Subjects) => "Agregar Materia Demo",
            PendingAction::QuickAdd(Collection::Tasks) => "Crear Tarea Demo",
            PendingAction::QuickAdd(Collection::Notes) => "Crear Nota Demo",
            _ => "Eliminar",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Popup {
    pub title: String,
    pub body: String,
}

/// Rows of the task list: pending by due date, then completed ones unless
/// the filter asks for pending only
pub fn task_rows<'a>(store: &'a AppStore, filter: &TaskFilter) -> Vec<&'a Task> {
    let filtered = queries::filter_tasks(store.tasks(), filter);
    let mut rows = queries::sorted_pending(filtered.iter().copied());
    if filter.status != StatusFilter::Pending {
        rows.extend(queries::completed(filtered.iter().copied()));
    }
    rows
}

/// Dashboard quick actions, in display order
pub const DASHBOARD_ACTIONS: [Collection; 3] = [Collection::Subjects, Collection::Tasks, Collection::Notes];

#[derive(Debug, Clone)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub session: SessionStore,
    pub store: AppStore,

    pub screen: Screen,
    pub mode: Mode,
    pub list_state: ListState,
    pub login_form: LoginForm,
    pub note_form: Option<NoteForm>,
    pub pending_action: Option<PendingAction>,
    pub confirm_selection: usize,
    pub popup: Option<Popup>,
    pub task_filter: TaskFilter,
    pub search_query: String,
    pub status: StatusState,

    runtime: Handle,
    login_tx: UnboundedSender<Result<User, AuthError>>,
    login_rx: UnboundedReceiver<Result<User, AuthError>>,
    logins_in_flight: usize,
}

impl App {
    /// `session` should already be restored.
    pub fn new(config: Config, session: SessionStore, runtime: Handle) -> Self {
        let (login_tx, login_rx) = unbounded_channel();
        let screen = if session.is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::Home
        };

        let mut app = Self {
            config,
            session,
            store: AppStore::new(),
            screen: Screen::Home,
            mode: Mode::View,
            list_state: ListState::default(),
            login_form: LoginForm::default(),
            note_form: None,
            pending_action: None,
            confirm_selection: 0,
            popup: None,
            task_filter: TaskFilter::default(),
            search_query: String::new(),
            status: StatusState {
                message: None,
                message_time: None,
            },
            runtime,
            login_tx,
            login_rx,
            logins_in_flight: 0,
        };
        app.go_to(screen);
        app
    }

    /// Switch screens. Protected screens send signed-out users to the
    /// login form; entering a screen seeds demo data when its collection is
    /// empty.
    pub fn go_to(&mut self, screen: Screen) {
        let target = if screen.requires_auth() && !self.session.is_authenticated() {
            Screen::Login
        } else {
            screen
        };

        if let Some(collection) = target.seed_collection() {
            self.store
                .seed_if_needed(self.session.is_authenticated(), collection);
        }

        debug!("event=navigate from={:?} to={:?}", self.screen, target);
        self.screen = target;
        self.mode = Mode::View;
        self.search_query.clear();
        self.list_state.select(if self.current_len() > 0 { Some(0) } else { None });
    }

    pub fn next_tab(&mut self) {
        if let Some(i) = self.screen.tab_index() {
            self.go_to(Screen::TABS[(i + 1) % Screen::TABS.len()]);
        }
    }

    pub fn previous_tab(&mut self) {
        if let Some(i) = self.screen.tab_index() {
            self.go_to(Screen::TABS[(i + Screen::TABS.len() - 1) % Screen::TABS.len()]);
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() >= STATUS_MESSAGE_TIMEOUT {
                self.clear_status_message();
            }
        }
    }

    // ---- login ----

    pub fn is_login_pending(&self) -> bool {
        self.logins_in_flight > 0
    }

    /// Start an authentication attempt on the runtime. Attempts are not
    /// merged; each one reports back on its own.
    pub fn submit_login(&mut self) {
        let email = self.login_form.email.text();
        let password = self.login_form.password.text();
        let delay = self.session.login_delay();
        let tx = self.login_tx.clone();

        self.session.begin_login();
        self.logins_in_flight += 1;
        self.runtime.spawn(async move {
            let result = authenticate(email, password, delay).await;
            // The receiver only goes away when the app is shutting down
            let _ = tx.send(result);
        });
    }

    /// Apply finished login attempts. Called once per frame.
    pub fn poll_login(&mut self) {
        while let Ok(result) = self.login_rx.try_recv() {
            self.logins_in_flight = self.logins_in_flight.saturating_sub(1);
            let welcome = match self.session.complete_login(result) {
                Ok(user) => Some(format!("Bienvenido, {}", user.name)),
                Err(_) => None,
            };
            if let Some(message) = welcome {
                self.login_form = LoginForm::default();
                self.go_to(Screen::Dashboard);
                self.set_status_message(message);
            }
        }
    }

    /// Sign out and drop every collection; the next sign-in starts from
    /// the demo seed again.
    pub fn logout(&mut self) {
        self.store = AppStore::new();
        self.task_filter = TaskFilter::default();
        if let Err(e) = self.session.logout() {
            self.set_status_message(format!("No se pudo cerrar la sesión: {}", e));
        }
        self.go_to(Screen::Home);
    }

    // ---- lists ----

    pub fn visible_tasks(&self) -> Vec<&Task> {
        task_rows(&self.store, &self.task_filter)
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        queries::search_notes(self.store.notes(), &self.search_query)
    }

    pub fn current_len(&self) -> usize {
        match self.screen {
            Screen::Dashboard => DASHBOARD_ACTIONS.len(),
            Screen::Subjects => self.store.subjects().len(),
            Screen::Tasks => self.visible_tasks().len(),
            Screen::Notes => self.visible_notes().len(),
            Screen::Home | Screen::Login => 0,
        }
    }

    /// Keep the selection inside the current list after it changes size
    pub fn adjust_selection(&mut self) {
        let len = self.current_len();
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn move_selection_up(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.current_len();
        if let Some(i) = self.list_state.selected() {
            if i + 1 < len {
                self.list_state.select(Some(i + 1));
            }
        }
    }

    pub fn selected_subject(&self) -> Option<&Subject> {
        self.list_state
            .selected()
            .and_then(|i| self.store.subjects().get(i))
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|i| self.visible_tasks().get(i).copied())
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.list_state
            .selected()
            .and_then(|i| self.visible_notes().get(i).copied())
    }

    // ---- actions ----

    /// Open the confirmation modal for the "new item" button of this screen
    pub fn request_quick_add(&mut self) {
        let collection = match self.screen {
            Screen::Subjects => Collection::Subjects,
            Screen::Tasks => Collection::Tasks,
            Screen::Notes => Collection::Notes,
            _ => return,
        };
        self.open_confirm(PendingAction::QuickAdd(collection));
    }

    /// Open the confirmation modal for deleting the selected row
    pub fn request_delete(&mut self) {
        let action = match self.screen {
            Screen::Subjects => self.selected_subject().map(|s| PendingAction::DeleteSubject {
                id: s.id.clone(),
                name: s.name.clone(),
            }),
            Screen::Tasks => self.selected_task().map(|t| PendingAction::DeleteTask {
                id: t.id.clone(),
                title: t.title.clone(),
            }),
            Screen::Notes => self
                .selected_note()
                .map(|n| PendingAction::DeleteNote { id: n.id.clone() }),
            _ => None,
        };
        if let Some(action) = action {
            self.open_confirm(action);
        }
    }

    fn open_confirm(&mut self, action: PendingAction) {
        self.pending_action = Some(action);
        self.confirm_selection = 0;
        self.mode = Mode::Confirm;
    }

    /// Close the modal; run its action only if `accepted`.
    pub fn resolve_confirm(&mut self, accepted: bool) {
        self.mode = Mode::View;
        let Some(action) = self.pending_action.take() else {
            return;
        };
        if !accepted {
            return;
        }

        match action {
            PendingAction::DeleteSubject { id, name } => {
                if self.store.delete_subject(&id) {
                    self.set_status_message(format!("Materia \"{}\" eliminada", name));
                }
            }
            PendingAction::DeleteTask { id, .. } => {
                if self.store.delete_task(&id) {
                    self.set_status_message("Tarea eliminada".to_string());
                }
            }
            PendingAction::DeleteNote { id } => {
                if self.store.delete_note(&id) {
                    self.set_status_message("Nota eliminada".to_string());
                }
            }
            PendingAction::QuickAdd(collection) => self.quick_add(collection, false),
        }
        self.adjust_selection();
    }

    /// Create a demo record. Dashboard actions draw from their own title
    /// pools.
    pub fn quick_add(&mut self, collection: Collection, from_dashboard: bool) {
        let mut rng = rand::rng();
        let message = match collection {
            Collection::Subjects => {
                let (pool, prefix) = if from_dashboard {
                    (demo::DASHBOARD_SUBJECT_NAMES, "MAT")
                } else {
                    (demo::SUBJECT_NAMES, "ING")
                };
                let name = demo::pick(&mut rng, pool);
                let code = demo::subject_code(&mut rng, prefix);
                self.store.quick_add_subject(&mut rng, name, &code);
                format!("Materia \"{}\" agregada exitosamente!", name)
            }
            Collection::Tasks => {
                let pool = if from_dashboard {
                    demo::DASHBOARD_TASK_TITLES
                } else {
                    demo::TASK_TITLES
                };
                let title = demo::pick(&mut rng, pool);
                self.store.quick_add_task(title, None);
                format!("Tarea \"{}\" creada exitosamente!", title)
            }
            Collection::Notes => {
                let (title, content) = if from_dashboard {
                    let title = demo::pick(&mut rng, demo::DASHBOARD_NOTE_TITLES);
                    (title, demo::short_note_content(title))
                } else {
                    let title = demo::pick(&mut rng, demo::NOTE_TITLES);
                    (title, demo::long_note_content(title))
                };
                self.store.quick_add_note(title, &content, None);
                format!("Nota \"{}\" guardada exitosamente!", title)
            }
        };
        info!("event=quick_add collection={:?}", collection);
        self.set_status_message(message);
        self.adjust_selection();
    }

    /// Run the dashboard quick action under the cursor
    pub fn run_dashboard_action(&mut self) {
        if let Some(collection) = self
            .list_state
            .selected()
            .and_then(|i| DASHBOARD_ACTIONS.get(i).copied())
        {
            self.quick_add(collection, true);
        }
    }

    /// Add a demo task to the selected subject
    pub fn add_task_to_selected_subject(&mut self) {
        let Some((id, name)) = self.selected_subject().map(|s| (s.id.clone(), s.name.clone())) else {
            return;
        };
        let title = demo::pick(&mut rand::rng(), demo::SUBJECT_TASK_TITLES);
        self.store.quick_add_task(title, Some(&id));
        self.set_status_message(format!("Tarea \"{}\" agregada a {}!", title, name));
    }

    pub fn toggle_selected_task(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            self.store.toggle_task(&id);
            self.adjust_selection();
        }
    }

    pub fn cycle_status_filter(&mut self) {
        self.task_filter.status = self.task_filter.status.next();
        self.adjust_selection();
    }

    /// Step through "all subjects" and each subject in turn
    pub fn cycle_subject_filter(&mut self) {
        let subjects = self.store.subjects();
        self.task_filter.subject_id = match &self.task_filter.subject_id {
            None => subjects.first().map(|s| s.id.clone()),
            Some(current) => subjects
                .iter()
                .position(|s| &s.id == current)
                .and_then(|i| subjects.get(i + 1))
                .map(|s| s.id.clone()),
        };
        self.adjust_selection();
    }

    pub fn show_selected_details(&mut self) {
        let popup = match self.screen {
            Screen::Subjects => self.selected_subject().map(|s| Popup {
                title: format!("Detalles de {}", s.name),
                body: queries::subject_details(s, self.store.tasks()),
            }),
            Screen::Notes => self.selected_note().map(|n| Popup {
                title: n.title.clone(),
                body: format!(
                    "{}\n\nTags: {}\nMateria: {}",
                    n.content,
                    n.tags.join(", "),
                    queries::subject_label_for_note(self.store.subjects(), n)
                ),
            }),
            _ => None,
        };
        if let Some(popup) = popup {
            self.popup = Some(popup);
            self.mode = Mode::Details;
        }
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
        self.mode = Mode::View;
    }

    pub fn enter_edit_note(&mut self) {
        if let Some(form) = self.selected_note().map(NoteForm::from_note) {
            self.note_form = Some(form);
            self.mode = Mode::EditNote;
        }
    }

    pub fn cancel_edit_note(&mut self) {
        self.note_form = None;
        self.mode = Mode::View;
    }

    /// Validate and apply the note form. On validation failure the form
    /// stays open with a status message.
    pub fn save_note_form(&mut self) {
        let Some(form) = self.note_form.as_ref() else {
            return;
        };
        match form.to_update() {
            Ok(update) => {
                let id = form.note_id.clone();
                self.store.update_note(&id, update);
                self.note_form = None;
                self.mode = Mode::View;
                self.set_status_message("Nota actualizada exitosamente!".to_string());
            }
            Err(message) => self.set_status_message(message),
        }
    }

    pub fn enter_search_mode(&mut self) {
        if self.screen == Screen::Notes {
            self.mode = Mode::Search;
        }
    }

    /// Leave search input; the query keeps filtering the list
    pub fn exit_search_mode(&mut self) {
        self.mode = Mode::View;
    }

    pub fn add_to_search(&mut self, ch: char) {
        self.search_query.push(ch);
        self.adjust_selection();
    }

    pub fn remove_from_search(&mut self) {
        self.search_query.pop();
        self.adjust_selection();
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.mode = Mode::View;
    }

    /// Human summary of the task filters for the filter bar
    pub fn get_filter_summary(&self) -> String {
        match self.screen {
            Screen::Tasks => {
                let subject = match &self.task_filter.subject_id {
                    None => "Todas las materias",
                    Some(id) => self
                        .store
                        .subject(id)
                        .map(|s| s.name.as_str())
                        .unwrap_or(queries::UNKNOWN_SUBJECT),
                };
                let filtered = queries::filter_tasks(self.store.tasks(), &self.task_filter);
                let completed = queries::completed(filtered.iter().copied()).len();
                format!(
                    "{} | {} ({} pendientes, {} completadas)",
                    self.task_filter.status.label(),
                    subject,
                    filtered.len() - completed,
                    completed
                )
            }
            Screen::Notes => {
                let count = self.visible_notes().len();
                if self.search_query.is_empty() {
                    format!("Buscar: (vacío) | {} guardadas", count)
                } else {
                    format!("Buscar: {} | {} encontradas", self.search_query, count)
                }
            }
            Screen::Subjects => format!("{} activas", self.store.subjects().len()),
            _ => String::new(),
        }
    }

    pub fn now(&self) -> chrono::DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStorage, demo_user};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
    }

    fn signed_in_app(rt: &tokio::runtime::Runtime) -> App {
        let user = serde_json::to_string(&demo_user()).unwrap();
        let mut session = SessionStore::new(
            Box::new(MemorySessionStorage::with_value(user)),
            Duration::ZERO,
        );
        session.restore();
        App::new(Config::default(), session, rt.handle().clone())
    }

    #[test]
    fn signed_out_users_cannot_reach_protected_screens() {
        let rt = runtime();
        let mut session = SessionStore::new(Box::new(MemorySessionStorage::new()), Duration::ZERO);
        session.restore();
        let mut app = App::new(Config::default(), session, rt.handle().clone());
        assert_eq!(app.screen, Screen::Home);
        app.go_to(Screen::Tasks);
        assert_eq!(app.screen, Screen::Login);
        assert!(app.store.subjects().is_empty());
    }

    #[test]
    fn restored_session_lands_on_seeded_dashboard() {
        let rt = runtime();
        let app = signed_in_app(&rt);
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.store.subjects().len(), 2);
    }

    #[test]
    fn declining_delete_changes_nothing() {
        let rt = runtime();
        let mut app = signed_in_app(&rt);
        app.go_to(Screen::Subjects);
        app.request_delete();
        assert_eq!(app.mode, Mode::Confirm);
        app.resolve_confirm(false);
        assert_eq!(app.store.subjects().len(), 2);
        assert_eq!(app.mode, Mode::View);
    }

    #[test]
    fn accepting_subject_delete_cascades() {
        let rt = runtime();
        let mut app = signed_in_app(&rt);
        app.go_to(Screen::Subjects);
        app.request_delete();
        app.resolve_confirm(true);
        assert_eq!(app.store.subjects().len(), 1);
        assert!(app.store.tasks().is_empty());
        assert!(app.store.notes().is_empty());
    }

    #[test]
    fn pending_filter_hides_completed_tasks() {
        let rt = runtime();
        let mut app = signed_in_app(&rt);
        app.go_to(Screen::Tasks);
        app.store.quick_add_task("otra", None);
        app.toggle_selected_task();
        assert_eq!(app.visible_tasks().len(), 2);
        app.cycle_status_filter();
        assert_eq!(app.task_filter.status, StatusFilter::Pending);
        assert_eq!(app.visible_tasks().len(), 1);
    }

    #[test]
    fn blank_note_title_is_rejected() {
        let rt = runtime();
        let mut app = signed_in_app(&rt);
        app.go_to(Screen::Notes);
        app.enter_edit_note();
        app.note_form.as_mut().unwrap().title.clear();
        app.save_note_form();
        assert_eq!(app.mode, Mode::EditNote);
        assert_eq!(
            app.status.message.as_deref(),
            Some("Título y contenido son obligatorios")
        );
    }

    #[test]
    fn search_filters_visible_notes() {
        let rt = runtime();
        let mut app = signed_in_app(&rt);
        app.go_to(Screen::Notes);
        for ch in "frontend".chars() {
            app.add_to_search(ch);
        }
        assert_eq!(app.visible_notes().len(), 1);
        app.add_to_search('x');
        assert!(app.visible_notes().is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn login_round_trip_through_channel() {
        let rt = runtime();
        let mut session = SessionStore::new(Box::new(MemorySessionStorage::new()), Duration::ZERO);
        session.restore();
        let mut app = App::new(Config::default(), session, rt.handle().clone());
        app.go_to(Screen::Login);
        for ch in "demo@studyflow.com".chars() {
            app.login_form.email.insert_char(ch);
        }
        for ch in "demo123".chars() {
            app.login_form.password.insert_char(ch);
        }
        app.submit_login();
        assert!(app.session.is_loading());
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(10)).await });
        app.poll_login();
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(!app.is_login_pending());
    }

    fn fill_login(app: &mut App, email: &str, password: &str) {
        for ch in email.chars() {
            app.login_form.email.insert_char(ch);
        }
        for ch in password.chars() {
            app.login_form.password.insert_char(ch);
        }
    }

    #[test]
    fn padded_email_is_rejected() {
        let rt = runtime();
        let mut session = SessionStore::new(Box::new(MemorySessionStorage::new()), Duration::ZERO);
        session.restore();
        let mut app = App::new(Config::default(), session, rt.handle().clone());
        app.go_to(Screen::Login);
        fill_login(&mut app, "  demo@studyflow.com  ", "demo123");

        app.submit_login();
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(10)).await });
        app.poll_login();

        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
        assert_eq!(app.session.error(), Some("Credenciales inválidas"));
    }

    #[test]
    fn task_summary_counts_only_filtered_tasks() {
        let rt = runtime();
        let mut app = signed_in_app(&rt);
        app.go_to(Screen::Tasks);
        app.store.quick_add_task("Lectura", Some("2"));
        app.store.quick_add_task("Ensayo", Some("2"));

        app.cycle_subject_filter();

        assert_eq!(app.task_filter.subject_id.as_deref(), Some("1"));
        assert_eq!(app.visible_tasks().len(), 1);
        assert!(app.get_filter_summary().ends_with("(1 pendientes, 0 completadas)"));
    }

    #[test]
    fn logout_clears_data_and_next_login_reseeds() {
        let rt = runtime();
        let mut app = signed_in_app(&rt);
        app.go_to(Screen::Tasks);
        app.store.quick_add_task("Privada", None);
        app.cycle_subject_filter();
        assert_eq!(app.store.tasks().len(), 2);

        app.logout();

        assert_eq!(app.screen, Screen::Home);
        assert!(app.store.tasks().is_empty());
        assert!(app.store.subjects().is_empty());
        assert!(app.store.notes().is_empty());
        assert_eq!(app.task_filter, TaskFilter::default());

        app.go_to(Screen::Login);
        fill_login(&mut app, "demo@studyflow.com", "demo123");
        app.submit_login();
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(10)).await });
        app.poll_login();

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.store.tasks().len(), 1);
    }

    #[test]
    fn login_stays_pending_until_every_attempt_reports() {
        let rt = runtime();
        let mut session = SessionStore::new(Box::new(MemorySessionStorage::new()), Duration::ZERO);
        session.restore();
        let mut app = App::new(Config::default(), session, rt.handle().clone());
        app.go_to(Screen::Login);

        // The runtime is never driven here, so only the results sent below arrive
        app.submit_login();
        app.submit_login();
        app.login_tx.send(Err(AuthError::InvalidCredentials)).unwrap();
        app.poll_login();

        assert!(!app.session.is_loading());
        assert!(app.is_login_pending());

        app.login_tx.send(Err(AuthError::InvalidCredentials)).unwrap();
        app.poll_login();
        assert!(!app.is_login_pending());
    }
}
