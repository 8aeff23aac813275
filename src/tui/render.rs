use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::queries;
use crate::tui::app::{Mode, Screen, task_rows};
use crate::tui::widgets::{
    color::parse_color,
    confirm::render_confirm,
    dashboard::render_dashboard,
    filters_box::render_filters_box,
    help::render_help,
    login::{render_home, render_login},
    note_form::render_note_form,
    note_list::{render_note_list, render_note_view},
    popup::render_details,
    status_bar::render_status_bar,
    subject_list::{render_subject_list, render_subject_view},
    tabs::render_tabs,
    task_list::{render_task_list, render_task_view},
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display as show;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let theme = app.config.get_active_theme();
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("StudyFlow")
        .title_alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(parse_color(&theme.fg))
                .bg(parse_color(&theme.bg)),
        );
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.screen, &app.config);

    let content = Rect::new(
        layout.sidebar_area.x,
        layout.sidebar_area.y,
        layout.sidebar_area.width + layout.main_area.width,
        layout.main_area.height,
    );
    let now = app.now();
    let selected = app.list_state.selected();

    match app.screen {
        Screen::Home => render_home(f, content, &app.config),
        Screen::Login => render_login(
            f,
            content,
            &app.login_form,
            app.is_login_pending(),
            app.session.error(),
            &app.config,
        ),
        Screen::Dashboard => {
            let name = app.session.user().map(|u| u.name.as_str()).unwrap_or_default();
            render_dashboard(
                f,
                content,
                &app.store,
                name,
                &mut app.list_state,
                now,
                &app.config,
            );
        }
        Screen::Subjects => {
            let subjects = app.store.subjects();
            render_subject_list(f, layout.sidebar_area, subjects, &mut app.list_state, &app.config);
            render_subject_view(
                f,
                layout.main_area,
                selected.and_then(|i| subjects.get(i)),
                app.store.tasks(),
                &app.config,
            );
        }
        Screen::Tasks => {
            let rows = task_rows(&app.store, &app.task_filter);
            let subjects = app.store.subjects();
            render_task_list(
                f,
                layout.sidebar_area,
                &rows,
                subjects,
                &mut app.list_state,
                now,
                &app.config,
            );
            render_task_view(
                f,
                layout.main_area,
                selected.and_then(|i| rows.get(i).copied()),
                subjects,
                now,
                &app.config,
            );
        }
        Screen::Notes => {
            let rows = queries::search_notes(app.store.notes(), &app.search_query);
            render_note_list(
                f,
                layout.sidebar_area,
                &rows,
                app.store.notes().len(),
                &mut app.list_state,
                &app.config,
            );
            if let Some(form) = app.note_form.as_ref().filter(|_| app.mode == Mode::EditNote) {
                render_note_form(f, layout.main_area, form, &app.config);
            } else {
                render_note_view(
                    f,
                    layout.main_area,
                    selected.and_then(|i| rows.get(i).copied()),
                    app.store.subjects(),
                    !app.search_query.is_empty(),
                    &app.config,
                );
            }
        }
    }

    match app.screen {
        Screen::Tasks => render_filters_box(
            f,
            layout.filters_area,
            &format!(
                "{}: Estado • {}: Materia",
                show(&app.config.key_bindings.filter_status),
                show(&app.config.key_bindings.filter_subject)
            ),
            &app.get_filter_summary(),
            &app.config,
        ),
        Screen::Notes => render_filters_box(
            f,
            layout.filters_area,
            &format!("{}: Buscar", show(&app.config.key_bindings.search)),
            &app.get_filter_summary(),
            &app.config,
        ),
        Screen::Subjects => render_filters_box(
            f,
            layout.filters_area,
            "Materias",
            &app.get_filter_summary(),
            &app.config,
        ),
        _ => {}
    }

    let hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_deref(),
        &hints,
        &app.config,
    );

    let overlay_area = layout.inner_area;
    match app.mode {
        Mode::Help => render_help(f, overlay_area, &app.config),
        Mode::Confirm => {
            if let Some(action) = app.pending_action.as_ref() {
                render_confirm(f, overlay_area, action, app.confirm_selection, &app.config);
            }
        }
        Mode::Details => {
            if let Some(popup) = app.popup.as_ref() {
                render_details(f, overlay_area, popup, &app.config);
            }
        }
        Mode::View | Mode::Search | Mode::EditNote => {}
    }
}

fn get_key_hints(app: &App) -> Vec<String> {
    let keys = &app.config.key_bindings;
    let hint = |binding: &str, label: &str| format!("{}: {}", show(binding), label);

    match (&app.mode, app.screen) {
        (Mode::Search, _) => vec![
            "Escribe para buscar".to_string(),
            "Enter/Esc: Terminar".to_string(),
        ],
        (Mode::EditNote, _) => vec![
            "Tab: Campo".to_string(),
            hint("Ctrl+s", "Guardar"),
            "Esc: Cancelar".to_string(),
        ],
        (Mode::Help | Mode::Confirm | Mode::Details, _) => vec!["Esc: Cerrar".to_string()],
        (Mode::View, Screen::Home) => vec![
            "Enter: Iniciar sesión".to_string(),
            hint(&keys.help, "Ayuda"),
            hint(&keys.quit, "Salir"),
        ],
        (Mode::View, Screen::Login) => vec![
            "Tab: Campo".to_string(),
            "Enter: Continuar".to_string(),
            "Esc: Volver".to_string(),
        ],
        (Mode::View, screen) => {
            let mut hints = vec![hint(&keys.quit, "Salir"), hint(&keys.help, "Ayuda")];
            match screen {
                Screen::Dashboard => hints.push(hint(&keys.details, "Acción rápida")),
                Screen::Subjects => {
                    hints.push(hint(&keys.new, "Nueva"));
                    hints.push(hint(&keys.details, "Detalles"));
                    hints.push(hint(&keys.add_subject_task, "Agregar tarea"));
                    hints.push(hint(&keys.delete, "Eliminar"));
                }
                Screen::Tasks => {
                    hints.push(hint(&keys.new, "Nueva"));
                    hints.push(hint(&keys.toggle_task_status, "Completar"));
                    hints.push(hint(&keys.delete, "Eliminar"));
                }
                Screen::Notes => {
                    hints.push(hint(&keys.new, "Nueva"));
                    hints.push(hint(&keys.edit, "Editar"));
                    hints.push(hint(&keys.search, "Buscar"));
                    hints.push(hint(&keys.delete, "Eliminar"));
                }
                Screen::Home | Screen::Login => {}
            }
            hints.push(hint(&keys.logout, "Cerrar sesión"));
            hints
        }
    }
}
