//! Directory tree panel.
//!
//! Renders the visible rows of the tree as a scrollable `List`, indented by
//! depth, with the row under the cursor highlighted and the selected file
//! marked.

use partview_core::config::theme::{parse_color, Theme};
use partview_core::nav::tree_view::VisibleRow;
use partview_core::tree::TreeNodeKind;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::icons::{icon_for_node, plain_marker};

/// Data needed to render the tree panel.
pub struct TreeProps<'a> {
    pub title: &'a str,
    /// `None` while the directory is still loading.
    pub rows: Option<&'a [VisibleRow<'a>]>,
    pub cursor: usize,
    /// Uuid of the selected file, if any.
    pub selected_uuid: Option<&'a str>,
    pub show_icons: bool,
}

pub fn render_tree(f: &mut Frame, area: Rect, props: &TreeProps<'_>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(props.title.to_owned())
        .border_style(Style::default().fg(parse_color(&theme.tree.border_fg)));

    let Some(rows) = props.rows else {
        let loading = Paragraph::new(Line::from(Span::styled(
            "Loading...",
            Style::default().add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        f.render_widget(loading, area);
        return;
    };

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(row_line(row, props.selected_uuid, props.show_icons, theme)))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(parse_color(&theme.tree.cursor_bg))
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(props.cursor.min(rows.len() - 1)));
    }

    f.render_stateful_widget(list, area, &mut state);
}

/// Builds the display line for one visible row.
pub fn row_line(
    row: &VisibleRow<'_>,
    selected_uuid: Option<&str>,
    show_icons: bool,
    theme: &Theme,
) -> Line<'static> {
    let node = row.node;
    let indent = "  ".repeat(row.depth);
    let arrow = if !node.is_container() {
        "  "
    } else if row.is_expanded {
        "▾ "
    } else {
        "▸ "
    };
    let icon = if show_icons {
        icon_for_node(node, row.is_expanded)
    } else {
        plain_marker(node)
    };

    let style = match &node.kind {
        TreeNodeKind::Branch => Style::default()
            .fg(parse_color(&theme.tree.branch_fg))
            .add_modifier(Modifier::BOLD),
        TreeNodeKind::Group(_) => Style::default().fg(parse_color(&theme.tree.group_fg)),
        TreeNodeKind::File(record) if Some(record.uuid.as_str()) == selected_uuid => {
            Style::default()
                .fg(parse_color(&theme.tree.selected_fg))
                .add_modifier(Modifier::BOLD)
        }
        TreeNodeKind::File(_) => Style::default().fg(parse_color(&theme.tree.file_fg)),
        TreeNodeKind::Label => Style::default()
            .fg(parse_color(&theme.tree.label_fg))
            .add_modifier(Modifier::ITALIC),
    };

    Line::from(vec![
        Span::raw(format!("{indent}{arrow}")),
        Span::styled(format!("{icon}{}", node.label), style),
    ])
}
