use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::app::{NoteField, NoteForm};
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::editor::Editor;

/// First visible line so that `cursor_line` stays inside a viewport of
/// `height` lines
pub fn scroll_offset(cursor_line: usize, height: usize) -> usize {
    if height == 0 {
        return cursor_line;
    }
    cursor_line.saturating_sub(height - 1)
}

pub fn render_note_form(f: &mut Frame, area: Rect, form: &NoteForm, config: &Config) {
    if area.width < 4 || area.height < 10 {
        return;
    }
    f.render_widget(Clear, area);

    let theme = config.get_active_theme();
    let active_style = Style::default()
        .bg(parse_color(&theme.highlight_bg))
        .fg(parse_color(&theme.highlight_fg));
    let inactive_style = Style::default()
        .fg(parse_color(&theme.fg))
        .add_modifier(Modifier::DIM);
    let style_for = |field: NoteField| {
        if form.current_field == field {
            active_style
        } else {
            inactive_style
        }
    };

    let [title_area, content_area, tags_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(form.title.text())
            .style(style_for(NoteField::Title))
            .block(Block::default().borders(Borders::ALL).title("Título")),
        title_area,
    );

    let content_height = content_area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(form.content.cursor_line, content_height);
    f.render_widget(
        Paragraph::new(form.content.text())
            .style(style_for(NoteField::Content))
            .scroll((offset as u16, 0))
            .block(Block::default().borders(Borders::ALL).title("Contenido")),
        content_area,
    );

    f.render_widget(
        Paragraph::new(form.tags.text())
            .style(style_for(NoteField::Tags))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Etiquetas (separadas por comas)"),
            ),
        tags_area,
    );

    f.render_widget(
        Paragraph::new(format!(
            "Tab: Siguiente campo • {}: Guardar • Esc: Cancelar",
            crate::utils::format_key_binding_for_display("Ctrl+s")
        ))
        .style(inactive_style),
        hint_area,
    );

    let (editor, field_area, row_offset) = match form.current_field {
        NoteField::Title => (&form.title, title_area, 0),
        NoteField::Content => (&form.content, content_area, offset),
        NoteField::Tags => (&form.tags, tags_area, 0),
    };
    if let Some(position) = cursor_position(editor, field_area, row_offset) {
        f.set_cursor_position(position);
    }
}

/// Terminal cell for the editor cursor inside a bordered field, if visible
fn cursor_position(editor: &Editor, field_area: Rect, row_offset: usize) -> Option<(u16, u16)> {
    let row = editor.cursor_line.checked_sub(row_offset)? as u16;
    let x = field_area.x + 1 + editor.cursor_col as u16;
    let y = field_area.y + 1 + row;
    let inside = x < field_area.x + field_area.width.saturating_sub(1)
        && y < field_area.y + field_area.height.saturating_sub(1);
    inside.then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_keeps_cursor_in_view() {
        assert_eq!(scroll_offset(2, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(7, 5), 3);
    }

    #[test]
    fn cursor_outside_field_is_hidden() {
        let editor = Editor::from_string("abc", false);
        let area = Rect::new(0, 0, 10, 3);
        assert_eq!(cursor_position(&editor, area, 0), Some((4, 1)));
        let narrow = Rect::new(0, 0, 4, 3);
        assert_eq!(cursor_position(&editor, narrow, 0), None);
    }
}
