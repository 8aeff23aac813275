use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Config;
use crate::config::KeyBindings;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup::popup_area;
use crate::utils::format_key_binding_for_display as show;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let theme = config.get_active_theme();
    let style = Style::default()
        .fg(parse_color(&theme.fg))
        .bg(parse_color(&theme.bg));

    let popup_area = popup_area(area, 60, 80);
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(&config.key_bindings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ayuda - Atajos de teclado")
                .title_alignment(Alignment::Center)
                .style(style),
        )
        .style(style)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(keys: &KeyBindings) -> String {
    let mut text = String::new();

    text.push_str("Navegación:\n");
    text.push_str(&format!("  {} / {}: Cambiar pestaña\n", show(&keys.tab_left), show(&keys.tab_right)));
    text.push_str(&format!(
        "  {} {} {} {}: Dashboard, Materias, Tareas, Notas\n",
        show(&keys.tab_1),
        show(&keys.tab_2),
        show(&keys.tab_3),
        show(&keys.tab_4)
    ));
    text.push_str(&format!("  {} / {}: Moverse en la lista\n", show(&keys.list_up), show(&keys.list_down)));
    text.push('\n');

    text.push_str("Acciones:\n");
    text.push_str(&format!("  {}: Nuevo elemento de ejemplo\n", show(&keys.new)));
    text.push_str(&format!("  {}: Eliminar seleccionado\n", show(&keys.delete)));
    text.push_str(&format!("  {}: Ver detalles / acción rápida\n", show(&keys.details)));
    text.push_str(&format!("  {}: Editar nota\n", show(&keys.edit)));
    text.push_str(&format!("  {}: Completar tarea\n", show(&keys.toggle_task_status)));
    text.push_str(&format!("  {}: Agregar tarea a la materia\n", show(&keys.add_subject_task)));
    text.push_str(&format!("  {}: Buscar notas\n", show(&keys.search)));
    text.push_str(&format!("  {} / {}: Filtrar por estado / materia\n", show(&keys.filter_status), show(&keys.filter_subject)));
    text.push('\n');

    text.push_str("Edición de notas:\n");
    text.push_str("  Tab / Shift+Tab: Cambiar campo\n");
    text.push_str(&format!("  {}: Guardar\n", show("Ctrl+s")));
    text.push_str("  Esc: Cancelar\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Cerrar sesión\n", show(&keys.logout)));
    text.push_str(&format!("  {}: Mostrar/ocultar ayuda\n", show(&keys.help)));
    text.push_str(&format!("  {}: Salir\n", show(&keys.quit)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_configured_bindings() {
        let mut keys = KeyBindings::default();
        keys.new = "a".to_string();
        let text = build_help_text(&keys);
        assert!(text.contains("  a: Nuevo elemento de ejemplo"));
        assert!(text.contains("Salir"));
    }
}
