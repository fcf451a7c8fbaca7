//! Right-hand pane: actions for the selected file and its preview text.

use partview_core::action::Action;
use partview_core::config::keymap::Keymap;
use partview_core::config::theme::{parse_color, Theme};
use partview_core::kinds::PreviewEligibility;
use partview_core::selection::SelectionController;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the action line and the preview body for the current selection.
pub fn render_preview(
    f: &mut Frame,
    area: Rect,
    selection: &SelectionController,
    scroll: usize,
    keymap: &Keymap,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Preview")
        .border_style(Style::default().fg(parse_color(&theme.preview.border_fg)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    f.render_widget(Paragraph::new(action_line(selection, keymap, theme)), chunks[0]);

    f.render_widget(body_paragraph(selection, scroll, theme), chunks[1]);
}

/// The preview body scrolled to `scroll`.
///
/// Lines are not wrapped: one content line is one row, which is what the
/// scroll limit in the app counts.
pub fn body_paragraph(
    selection: &SelectionController,
    scroll: usize,
    theme: &Theme,
) -> Paragraph<'static> {
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    Paragraph::new(body_lines(selection, theme)).scroll((scroll, 0))
}

/// The first key bound to `action`, for display.
fn key_hint(keymap: &Keymap, action: Action) -> String {
    keymap
        .keys_for_action(action)
        .and_then(|keys| keys.first())
        .map(|key| format!("[{key}]"))
        .unwrap_or_default()
}

/// "[p] Preview <name>   [d] Download <name>", or a hint when nothing is
/// selected. The preview action is dimmed for files that cannot be previewed.
pub fn action_line(
    selection: &SelectionController,
    keymap: &Keymap,
    theme: &Theme,
) -> Line<'static> {
    let Some(record) = selection.selected() else {
        return Line::from(Span::styled(
            "Select a file in the tree",
            Style::default()
                .fg(parse_color(&theme.preview.disabled_fg))
                .add_modifier(Modifier::ITALIC),
        ));
    };

    let action_style = Style::default()
        .fg(parse_color(&theme.preview.action_fg))
        .add_modifier(Modifier::BOLD);
    let preview_style = match selection.preview_eligibility() {
        Some(PreviewEligibility::Available) => action_style,
        _ => Style::default()
            .fg(parse_color(&theme.preview.disabled_fg))
            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
    };

    Line::from(vec![
        Span::styled(
            format!("{} Preview {}", key_hint(keymap, Action::Preview), record.name),
            preview_style,
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} Download {}", key_hint(keymap, Action::Download), record.name),
            action_style,
        ),
    ])
}

/// Lines of the preview body.
pub fn body_lines(selection: &SelectionController, theme: &Theme) -> Vec<Line<'static>> {
    match selection.preview_eligibility() {
        None => Vec::new(),
        Some(PreviewEligibility::Excluded3d(_)) => {
            let text = selection.preview_text().unwrap_or_default().to_string();
            vec![Line::from(Span::styled(
                text,
                Style::default()
                    .fg(parse_color(&theme.preview.placeholder_fg))
                    .add_modifier(Modifier::ITALIC),
            ))]
        }
        Some(PreviewEligibility::Available) if selection.is_loading() => {
            vec![Line::from(Span::styled(
                "Loading...",
                Style::default().fg(parse_color(&theme.preview.loading_fg)),
            ))]
        }
        Some(PreviewEligibility::Available) => selection
            .preview_content()
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect(),
    }
}
