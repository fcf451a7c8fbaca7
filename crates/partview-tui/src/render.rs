use partview_core::action::{ActionCategory, ActionRegistry};
use partview_core::config::keymap::Keymap;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, AppMode, DirectoryState};
use crate::input::InputState;
use crate::ui::popup::{render_alert, render_popup};
use crate::ui::preview::render_preview;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};
use crate::ui::tree::{render_tree, TreeProps};

/// Main render function. Composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App, input_state: &InputState) {
    let theme = app.theme();
    let ui = &app.config().ui;

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let tree_percent = tree_percentage(ui.tree_ratio);
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(tree_percent),
            Constraint::Percentage(100 - tree_percent),
        ])
        .split(main_chunks[0]);

    let rows = app.tree_view().visible_rows(app.roots());
    let selected_uuid = app.selection().selected().map(|record| record.uuid.as_str());
    let tree_props = TreeProps {
        title: &ui.title,
        rows: match app.directory() {
            DirectoryState::Loading => None,
            DirectoryState::Ready(_) => Some(rows.as_slice()),
        },
        cursor: app.tree_view().cursor(),
        selected_uuid,
        show_icons: ui.show_icons,
    };
    render_tree(f, content[0], &tree_props, theme);

    render_preview(
        f,
        content[1],
        app.selection(),
        app.preview_scroll(),
        app.keymap(),
        theme,
    );

    let status_props = StatusBarProps {
        row_count: rows.len(),
        cursor: app.tree_view().cursor(),
        selected: app.selection().selected(),
        pending_key: input_state.is_pending(),
        status_message: app.status_message(),
    };
    render_statusbar(f, main_chunks[1], &status_props, theme);

    // Render modal overlays based on mode
    match app.mode() {
        AppMode::Help => {
            let lines = help_lines(app.action_registry(), app.keymap());
            render_popup(f, "Help", &lines, theme);
        }
        AppMode::Alert(message) => render_alert(f, message, theme),
        AppMode::Normal => {}
    }
}

/// Converts the configured tree share into a layout percentage.
fn tree_percentage(ratio: f64) -> u16 {
    let ratio = if ratio.is_finite() { ratio } else { 0.4 };
    (ratio.clamp(0.1, 0.9) * 100.0).round() as u16
}

/// Help popup content: every action with its bound keys, grouped by category.
fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<String> {
    let mut lines = Vec::new();
    for category in [
        ActionCategory::Navigation,
        ActionCategory::File,
        ActionCategory::System,
    ] {
        lines.push(format!("{}:", category.label()));
        for desc in registry.all().iter().filter(|d| d.category == category) {
            let keys = keymap
                .keys_for_action(desc.action)
                .map(|keys| keys.join(", "))
                .unwrap_or_else(|| "-".to_owned());
            lines.push(format!("  {keys:<10} {}", desc.description));
        }
        lines.push(String::new());
    }
    lines.push("Press Esc or ? to close".to_owned());
    lines
}
