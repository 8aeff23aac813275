use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, Wrap,
};

use crate::Config;
use crate::models::{Subject, Task};
use crate::queries::{self, Urgency};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color, priority_color, urgency_color};
use crate::tui::widgets::status_bar::truncate;

/// `tasks` arrive already filtered and ordered
pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    subjects: &[Subject],
    list_state: &mut ListState,
    now: DateTime<Utc>,
    config: &Config,
) {
    let max_width = area.width.saturating_sub(4) as usize;
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let urgency = queries::classify_urgency(task, now);
            let mark = if task.completed { "✓" } else { "○" };
            let mut title_style = Style::default().fg(urgency_color(urgency));
            if urgency == Urgency::Completed {
                title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
            }
            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate(&format!("{} {}", mark, task.title), max_width),
                    title_style,
                )),
                Line::from(truncate(
                    &format!(
                        "  {} • {}",
                        queries::subject_label_for_task(subjects, task),
                        queries::format_due(&task.due_date, now)
                    ),
                    max_width,
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Tareas ({})", tasks.len())),
        )
        .style(Style::default().fg(fg))
        .highlight_style(
            Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg),
        );
    f.render_stateful_widget(list, area, list_state);

    // Two lines per task
    let visible_rows = area.height.saturating_sub(2) as usize / 2;
    if tasks.len() > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(tasks.len()).position(list_state.selected().unwrap_or(0));
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

pub fn render_task_view(
    f: &mut Frame,
    area: Rect,
    task: Option<&Task>,
    subjects: &[Subject],
    now: DateTime<Utc>,
    config: &Config,
) {
    let fg = parse_color(&config.get_active_theme().fg);
    let block = Block::default().borders(Borders::ALL);

    let Some(task) = task else {
        f.render_widget(
            Paragraph::new("No hay tareas\n\nn: Crear una tarea de ejemplo")
                .block(block.title("Tarea"))
                .style(Style::default().fg(fg)),
            area,
        );
        return;
    };

    let urgency = queries::classify_urgency(task, now);
    let lines = vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(task.description.clone().unwrap_or_default()),
        Line::from(""),
        Line::from(format!("Materia: {}", queries::subject_label_for_task(subjects, task))),
        Line::from(vec![
            Span::raw("Prioridad: "),
            Span::styled(task.priority.label(), Style::default().fg(priority_color(task.priority))),
        ]),
        Line::from(vec![
            Span::raw("Entrega: "),
            Span::styled(
                queries::format_due(&task.due_date, now),
                Style::default().fg(urgency_color(urgency)),
            ),
        ]),
        Line::from(format!(
            "Estado: {}",
            if task.completed { "Completada" } else { "Pendiente" }
        )),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .block(block.title("Tarea"))
            .style(Style::default().fg(fg))
            .wrap(Wrap { trim: false }),
        area,
    );
}
