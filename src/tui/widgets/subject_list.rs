use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::Config;
use crate::models::{Subject, Task};
use crate::queries;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color, subject_color};
use crate::tui::widgets::status_bar::truncate;

pub fn render_subject_list(
    f: &mut Frame,
    area: Rect,
    subjects: &[Subject],
    list_state: &mut ListState,
    config: &Config,
) {
    let max_width = area.width.saturating_sub(4) as usize;
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let items: Vec<ListItem> = subjects
        .iter()
        .map(|subject| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("▌ ", Style::default().fg(subject_color(subject.color))),
                    Span::raw(truncate(&subject.name, max_width.saturating_sub(2))),
                ]),
                Line::from(format!("  {} • {} créditos", subject.code, subject.credits)),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Mis Materias ({})", subjects.len())),
        )
        .style(Style::default().fg(fg))
        .highlight_style(
            Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg),
        );

    f.render_stateful_widget(list, area, list_state);
}

/// Detail pane for the selected subject and its tasks
pub fn render_subject_view(
    f: &mut Frame,
    area: Rect,
    subject: Option<&Subject>,
    tasks: &[Task],
    config: &Config,
) {
    let fg = parse_color(&config.get_active_theme().fg);
    let block = Block::default().borders(Borders::ALL);

    let Some(subject) = subject else {
        let empty = Paragraph::new("No tienes materias registradas\n\nn: Agregar tu primera materia")
            .block(block.title("Materia"))
            .style(Style::default().fg(fg));
        f.render_widget(empty, area);
        return;
    };

    let mut lines: Vec<Line> = queries::subject_details(subject, tasks)
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    lines.push(Line::from(format!("Semestre: {}", subject.semester)));
    lines.push(Line::from(""));

    let subject_tasks = queries::tasks_for_subject(tasks, &subject.id);
    if subject_tasks.is_empty() {
        lines.push(Line::from("Sin tareas para esta materia"));
    } else {
        lines.push(Line::from("Tareas:"));
        for task in subject_tasks {
            let mark = if task.completed { "✓" } else { "○" };
            lines.push(Line::from(format!("  {} {}", mark, task.title)));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            block.title(Span::styled(
                subject.name.clone(),
                Style::default().fg(subject_color(subject.color)),
            )),
        )
        .style(Style::default().fg(fg))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
