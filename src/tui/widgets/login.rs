use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::Config;
use crate::session::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::tui::app::{LoginField, LoginForm};
use crate::tui::widgets::color::parse_color;

/// Public landing screen
pub fn render_home(f: &mut Frame, area: Rect, config: &Config) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let accent = parse_color(&theme.highlight_bg);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "StudyFlow",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Organiza tus materias, tareas y notas en un solo lugar."),
        Line::from(""),
        Line::from("  • Materias con código, créditos y horario"),
        Line::from("  • Tareas con prioridad y fecha de entrega"),
        Line::from("  • Notas con etiquetas y búsqueda"),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: Iniciar sesión",
            Style::default().fg(fg).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Inicio"))
        .style(Style::default().fg(fg))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Login form with the cursor placed in the focused field
pub fn render_login(
    f: &mut Frame,
    area: Rect,
    form: &LoginForm,
    loading: bool,
    error: Option<&str>,
    config: &Config,
) {
    let theme = config.get_active_theme();
    let fg = parse_color(&theme.fg);
    let accent = parse_color(&theme.highlight_bg);

    let [header, email_area, password_area, message_area, demo_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new("Iniciar Sesión")
            .style(Style::default().fg(fg).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        header,
    );

    let field_style = |field: LoginField| {
        if form.current_field == field {
            Style::default().fg(accent)
        } else {
            Style::default().fg(fg)
        }
    };

    f.render_widget(
        Paragraph::new(form.email.text()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Email")
                .border_style(field_style(LoginField::Email)),
        ),
        email_area,
    );

    let masked = "•".repeat(form.password.text().chars().count());
    f.render_widget(
        Paragraph::new(masked).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Contraseña")
                .border_style(field_style(LoginField::Password)),
        ),
        password_area,
    );

    let message = match (loading, error) {
        (true, _) => Line::from(Span::styled("Iniciando sesión...", Style::default().fg(fg))),
        (false, Some(e)) => Line::from(Span::styled(
            e.to_string(),
            Style::default().fg(ratatui::style::Color::Red),
        )),
        (false, None) => Line::from(""),
    };
    f.render_widget(Paragraph::new(message).alignment(Alignment::Center), message_area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from("Credenciales de prueba:"),
            Line::from(format!("Email: {}", DEMO_EMAIL)),
            Line::from(format!("Contraseña: {}", DEMO_PASSWORD)),
            Line::from(""),
            Line::from("Tab: Cambiar campo • Enter: Continuar • Esc: Volver"),
        ])
        .style(Style::default().fg(fg))
        .alignment(Alignment::Center),
        demo_area,
    );

    let (editor, field_area) = match form.current_field {
        LoginField::Email => (&form.email, email_area),
        LoginField::Password => (&form.password, password_area),
    };
    let x = field_area.x + 1 + editor.cursor_col as u16;
    if x < field_area.x + field_area.width.saturating_sub(1) {
        f.set_cursor_position((x, field_area.y + 1));
    }
}
