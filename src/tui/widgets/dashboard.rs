use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::Config;
use crate::queries::{self, Stats};
use crate::store::{AppStore, Collection};
use crate::tui::app::DASHBOARD_ACTIONS;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color, urgency_color};

const UPCOMING_LIMIT: usize = 5;
const RECENT_NOTES_LIMIT: usize = 3;

pub fn action_label(collection: Collection) -> &'static str {
    match collection {
        Collection::Subjects => "+ Agregar Materia",
        Collection::Tasks => "+ Nueva Tarea",
        Collection::Notes => "+ Crear Nota",
    }
}

pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    store: &AppStore,
    user_name: &str,
    list_state: &mut ListState,
    now: DateTime<Utc>,
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let [greeting_area, stats_area, body_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .areas(area);
    let [actions_area, upcoming_area, notes_area] = Layout::horizontal([
        Constraint::Percentage(25),
        Constraint::Percentage(45),
        Constraint::Percentage(30),
    ])
    .areas(body_area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("¡Hola, {}!", user_name),
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            )),
            Line::from("Aquí tienes un resumen de tu actividad académica"),
        ]),
        greeting_area,
    );

    render_stats(f, stats_area, &queries::stats(store), fg);

    let actions: Vec<ListItem> = DASHBOARD_ACTIONS
        .iter()
        .map(|c| ListItem::new(action_label(*c)))
        .collect();
    let list = List::new(actions)
        .block(Block::default().borders(Borders::ALL).title("Acciones Rápidas"))
        .style(Style::default().fg(fg))
        .highlight_style(
            Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg),
        );
    f.render_stateful_widget(list, actions_area, list_state);

    let pending = queries::sorted_pending(store.tasks());
    let upcoming: Vec<ListItem> = if pending.is_empty() {
        vec![ListItem::new("No hay tareas pendientes")]
    } else {
        pending
            .iter()
            .take(UPCOMING_LIMIT)
            .map(|task| {
                let urgency = queries::classify_urgency(task, now);
                ListItem::new(vec![
                    Line::from(Span::styled(
                        task.title.clone(),
                        Style::default().fg(urgency_color(urgency)),
                    )),
                    Line::from(format!(
                        "  {} • {}",
                        queries::subject_label_for_task(store.subjects(), task),
                        queries::format_due(&task.due_date, now)
                    )),
                ])
            })
            .collect()
    };
    f.render_widget(
        List::new(upcoming)
            .block(Block::default().borders(Borders::ALL).title("Próximas Tareas"))
            .style(Style::default().fg(fg)),
        upcoming_area,
    );

    let notes: Vec<ListItem> = if store.notes().is_empty() {
        vec![ListItem::new("No hay notas")]
    } else {
        store
            .notes()
            .iter()
            .rev()
            .take(RECENT_NOTES_LIMIT)
            .map(|note| ListItem::new(note.title.clone()))
            .collect()
    };
    f.render_widget(
        List::new(notes)
            .block(Block::default().borders(Borders::ALL).title("Notas Recientes"))
            .style(Style::default().fg(fg)),
        notes_area,
    );
}

fn render_stats(f: &mut Frame, area: Rect, stats: &Stats, fg: ratatui::style::Color) {
    let cards = [
        ("Materias", stats.subjects),
        ("Pendientes", stats.pending_tasks),
        ("Notas", stats.notes),
        ("Completadas", stats.completed_tasks),
    ];
    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((label, value), card_area) in cards.iter().zip(areas.iter()) {
        f.render_widget(
            Paragraph::new(value.to_string())
                .style(Style::default().fg(fg).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL).title(*label)),
            *card_area,
        );
    }
}
