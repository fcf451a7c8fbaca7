//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the selected file, a pending-key indicator,
//! and an optional status message.

use partview_core::config::theme::{parse_color, Theme};
use partview_core::directory::FileRecord;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub row_count: usize,
    pub cursor: usize,
    pub selected: Option<&'a FileRecord>,
    /// A multi-key sequence (`g…`) is waiting for its second key.
    pub pending_key: bool,
    pub status_message: Option<&'a str>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let bg = parse_color(&theme.statusbar.bg);
    let bar = Paragraph::new(status_line(props, theme)).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

pub fn status_line(props: &StatusBarProps<'_>, theme: &Theme) -> Line<'static> {
    let bg = parse_color(&theme.statusbar.bg);
    let position_fg = parse_color(&theme.statusbar.position_fg);
    let message_fg = parse_color(&theme.statusbar.message_fg);

    let position = if props.row_count > 0 {
        format!(" {}/{}", props.cursor + 1, props.row_count)
    } else {
        " 0/0".to_owned()
    };

    let file_info = props
        .selected
        .map(|record| match &record.file_type {
            Some(file_type) => format!("  {} [{file_type}]", record.name),
            None => format!("  {}", record.name),
        })
        .unwrap_or_default();

    let pending = if props.pending_key { "  g-" } else { "" };

    let status_span = props
        .status_message
        .map(|msg| {
            Span::styled(
                format!("  {msg}"),
                Style::default()
                    .fg(message_fg)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            )
        })
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(
            position,
            Style::default()
                .fg(position_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(file_info, Style::default().fg(position_fg).bg(bg)),
        Span::styled(pending.to_owned(), Style::default().fg(position_fg).bg(bg)),
        status_span,
    ])
}
