use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::Config;
use crate::models::{Note, Subject};
use crate::queries;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::status_bar::truncate;
use crate::tui::widgets::tags::format_tags_brackets;

pub fn render_note_list(
    f: &mut Frame,
    area: Rect,
    notes: &[&Note],
    total_count: usize,
    list_state: &mut ListState,
    config: &Config,
) {
    let max_width = area.width.saturating_sub(4) as usize;
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let highlight_bg = parse_color(&theme.highlight_bg);

    let items: Vec<ListItem> = notes
        .iter()
        .map(|note| {
            let tags = if note.tags.is_empty() {
                "  [Sin etiquetas]".to_string()
            } else {
                format!("  {}", format_tags_brackets(&note.tags))
            };
            ListItem::new(vec![
                Line::from(truncate(&note.title, max_width)),
                Line::from(truncate(&tags, max_width)),
            ])
        })
        .collect();

    let title = if notes.len() == total_count {
        format!("Mis Notas ({})", total_count)
    } else {
        format!("Mis Notas ({}/{})", notes.len(), total_count)
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg))
        .highlight_style(
            Style::default()
                .fg(get_contrast_text_color(highlight_bg))
                .bg(highlight_bg),
        );
    f.render_stateful_widget(list, area, list_state);
}

pub fn render_note_view(
    f: &mut Frame,
    area: Rect,
    note: Option<&Note>,
    subjects: &[Subject],
    searching: bool,
    config: &Config,
) {
    let fg = parse_color(&config.get_active_theme().fg);
    let block = Block::default().borders(Borders::ALL);

    let Some(note) = note else {
        let message = if searching {
            "No se encontraron notas"
        } else {
            "No hay notas\n\nn: Crear una nota de ejemplo"
        };
        f.render_widget(
            Paragraph::new(message)
                .block(block.title("Nota"))
                .style(Style::default().fg(fg)),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            note.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} • {}",
            queries::subject_label_for_note(subjects, note),
            note.updated_at
        )),
        Line::from(""),
    ];
    lines.extend(note.content.lines().map(|l| Line::from(l.to_string())));
    if !note.tags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(format_tags_brackets(&note.tags)));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(block.title("Nota"))
            .style(Style::default().fg(fg))
            .wrap(Wrap { trim: false }),
        area,
    );
}
