use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Config;
use crate::tui::app::Popup;
use crate::tui::widgets::color::parse_color;

/// Centered rect covering a percentage of `area`
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Read-only detail view (subject details, full note)
pub fn render_details(f: &mut Frame, area: Rect, popup: &Popup, config: &Config) {
    let theme = config.get_active_theme();
    let style = Style::default()
        .fg(parse_color(&theme.fg))
        .bg(parse_color(&theme.bg));

    let popup_area = popup_area(area, 60, 60);
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(format!("{}\n\nEsc/Enter: Cerrar", popup.body))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(popup.title.as_str())
                .title_alignment(Alignment::Center)
                .style(style),
        )
        .style(style)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}
