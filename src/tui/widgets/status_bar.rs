use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::Config;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Status message if one is showing, otherwise the key hints that fit.
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&str>,
    key_hints: &[String],
    config: &Config,
) {
    let theme = config.get_active_theme();
    let max_width = area.width as usize;

    let (content, style) = match message {
        Some(msg) => {
            let highlight_bg = parse_color(&theme.highlight_bg);
            (
                truncate(msg, max_width),
                Style::default()
                    .fg(get_contrast_text_color(highlight_bg))
                    .bg(highlight_bg)
                    .add_modifier(Modifier::BOLD),
            )
        }
        None => (
            fit_hints(key_hints, max_width),
            Style::default()
                .fg(parse_color(&theme.fg))
                .bg(parse_color(&theme.bg)),
        ),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

/// Cut to `max_width` chars, ending in "..." when shortened
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Join as many hints as fit in `max_width`, ending with an ellipsis when
/// some were dropped
pub fn fit_hints(hints: &[String], max_width: usize) -> String {
    let mut text = String::new();
    for hint in hints {
        let candidate = if text.is_empty() {
            hint.clone()
        } else {
            format!("{}{}{}", text, SEPARATOR, hint)
        };
        if candidate.chars().count() > max_width {
            return if text.is_empty() {
                truncate(hint, max_width)
            } else {
                truncate(&format!("{}{}", text, ELLIPSIS), max_width)
            };
        }
        text = candidate;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["q: Salir".to_string(), "F1: Ayuda".to_string(), "n: Nueva".to_string()]
    }

    #[test]
    fn all_hints_fit_in_wide_bar() {
        assert_eq!(fit_hints(&hints(), 80), "q: Salir • F1: Ayuda • n: Nueva");
    }

    #[test]
    fn narrow_bar_drops_trailing_hints() {
        assert_eq!(fit_hints(&hints(), 23), "q: Salir • F1: Ayuda...");
        assert_eq!(fit_hints(&hints(), 6), "q: ...");
    }
}
