use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use replpane_core::floating::{self, Size};
use replpane_core::ui;

use crate::model::{Row, RowKind};
use crate::{FileTree, MENU_ITEMS, MenuState};

const SELECTED_BG: Color = Color::Gray;

/// Width of the actions cell at the right edge of a root file row.
const ACTIONS_CELL_WIDTH: u16 = 2;

// ── Pane geometry ────────────────────────────────────────────────────

/// Geometry of the files pane, shared by rendering and mouse hit-testing
/// so both always agree on where things are.
pub(crate) struct PaneLayout {
    pub(crate) header: Rect,
    pub(crate) new_button: Rect,
    pub(crate) list: Rect,
    pub(crate) editor: Option<Rect>,
}

impl PaneLayout {
    pub(crate) fn new(area: Rect, editor_armed: bool, total: usize, hovered: usize) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);

        let header = Rect {
            height: inner.height.min(1),
            ..inner
        };
        let new_button = Rect {
            x: header.right().saturating_sub(3),
            width: 3.min(header.width),
            ..header
        };

        let list = Rect {
            y: inner.y + header.height,
            height: inner.height.saturating_sub(header.height),
            ..inner
        };

        let mut layout = Self {
            header,
            new_button,
            list,
            editor: None,
        };
        if editor_armed && layout.list.height > 0 {
            // The editor sits on the line after the last visible row,
            // clamped to the reserved bottom line when the list is full.
            layout.list.height -= 1;
            let offset = layout.scroll_offset(hovered);
            let shown = total
                .saturating_sub(offset)
                .min(layout.list.height as usize);
            layout.editor = Some(Rect {
                y: layout.list.y + shown as u16,
                height: 1,
                ..layout.list
            });
        }
        layout
    }

    /// First visible row index, keeping the hovered row in view.
    pub(crate) fn scroll_offset(&self, hovered: usize) -> usize {
        let visible = self.list.height as usize;
        if visible == 0 {
            return 0;
        }
        if hovered >= visible {
            hovered - visible + 1
        } else {
            0
        }
    }

    /// The absolute row index under (column, row), if any.
    pub(crate) fn row_at(&self, hovered: usize, total: usize, column: u16, row: u16) -> Option<usize> {
        if !replpane_core::dismiss::contains(self.list, column, row) {
            return None;
        }
        let idx = self.scroll_offset(hovered) + (row - self.list.y) as usize;
        (idx < total).then_some(idx)
    }

    /// The one-line rect of a row, if it is currently scrolled into view.
    pub(crate) fn row_line(&self, hovered: usize, idx: usize) -> Option<Rect> {
        let offset = self.scroll_offset(hovered);
        if idx < offset || idx >= offset + self.list.height as usize {
            return None;
        }
        Some(Rect {
            x: self.list.x,
            y: self.list.y + (idx - offset) as u16,
            width: self.list.width,
            height: 1,
        })
    }

    /// The actions cell at the right edge of a row line.
    pub(crate) fn actions_cell(&self, line: Rect) -> Rect {
        Rect {
            x: line.right().saturating_sub(ACTIONS_CELL_WIDTH),
            width: ACTIONS_CELL_WIDTH.min(line.width),
            ..line
        }
    }
}

/// The rect the open context menu occupies, anchored to its actions cell
/// and kept inside the pane.
pub(crate) fn menu_rect(menu: &MenuState, viewport: Rect) -> Rect {
    let item_width = MENU_ITEMS.iter().map(|i| i.width()).max().unwrap_or(0) as u16;
    let size = Size {
        width: item_width + 4,
        height: MENU_ITEMS.len() as u16 + 2,
    };
    floating::panel_rect(Some(menu.anchor), size, viewport)
}

// ── Rendering ────────────────────────────────────────────────────────

/// Render the files pane: header with the new-file button, the flattened
/// tree, the inline editor when armed, and the context menu on top.
pub fn render_file_tree(frame: &mut Frame, area: Rect, tree: &FileTree, focused: bool) {
    let block = ui::pane_block("Files", focused);
    frame.render_widget(block, area);

    let layout = PaneLayout::new(area, tree.new_file.is_some(), tree.rows().len(), tree.hovered);
    if layout.header.height == 0 || layout.header.width == 0 {
        return;
    }

    render_header(frame, &layout);
    render_rows(frame, &layout, tree);
    if let Some(editor_area) = layout.editor {
        render_editor(frame, editor_area, tree);
    }
    render_menu(frame, area, tree);
}

fn render_header(frame: &mut Frame, layout: &PaneLayout) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Files",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, layout.header);

    let button = Paragraph::new(Line::from(vec![
        Span::styled("[", Style::default().add_modifier(Modifier::DIM)),
        Span::styled("+", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("]", Style::default().add_modifier(Modifier::DIM)),
    ]));
    frame.render_widget(button, layout.new_button);
}

fn render_rows(frame: &mut Frame, layout: &PaneLayout, tree: &FileTree) {
    let rows = tree.rows();
    if layout.list.height == 0 {
        return;
    }
    if rows.is_empty() {
        let empty = Paragraph::new("  No files yet. Press 'a' to add.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, layout.list);
        return;
    }

    let offset = layout.scroll_offset(tree.hovered);
    let visible = layout.list.height as usize;

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, row)| render_entry_line(row, idx == tree.hovered, layout.list.width))
        .collect();

    frame.render_widget(Paragraph::new(lines), layout.list);
}

fn render_entry_line(row: &Row, is_hovered: bool, width: u16) -> Line<'static> {
    let base_style = if is_hovered {
        Style::default()
            .bg(SELECTED_BG)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if matches!(row.kind, RowKind::Folder) {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::White)
    };

    let show_actions = is_hovered && row.is_menu_capable();

    let indent = "  ".repeat(row.depth);
    let icon = match row.kind {
        RowKind::Folder => "",
        RowKind::File { .. } => file_icon(&row.name),
    };
    let reserved = indent.width() + icon.width() + if show_actions { ACTIONS_CELL_WIDTH as usize } else { 0 };
    let name_width = (width as usize).saturating_sub(reserved);
    let name = ui::truncate_to_width(&row.name, name_width);

    let mut spans: Vec<Span<'static>> = Vec::new();
    if !indent.is_empty() {
        spans.push(Span::styled(indent, base_style));
    }
    if !icon.is_empty() {
        spans.push(Span::styled(icon.to_string(), base_style));
    }
    spans.push(Span::styled(name, base_style));

    if is_hovered {
        let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
        let tail = if show_actions { ACTIONS_CELL_WIDTH as usize } else { 0 };
        let remaining = (width as usize).saturating_sub(content_width + tail);
        if remaining > 0 {
            spans.push(Span::styled(" ".repeat(remaining), base_style));
        }
        if show_actions {
            spans.push(Span::styled(
                "\u{22EE} ",
                Style::default().bg(SELECTED_BG).fg(Color::DarkGray),
            ));
        }
    }

    Line::from(spans)
}

/// TypeScript sources get a filled glyph, everything else a hollow one.
fn file_icon(name: &str) -> &'static str {
    let is_ts = [".ts", ".tsx", ".mts", ".cts"]
        .iter()
        .any(|ext| name.ends_with(ext));
    if is_ts { "\u{25C6} " } else { "\u{25C7} " }
}

fn render_editor(frame: &mut Frame, area: Rect, tree: &FileTree) {
    let Some(input) = &tree.new_file else { return };

    let label = "New: ";
    let line = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(input.value().to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + label.width() as u16 + input.value()[..input.cursor()].width() as u16;
    if cursor_x < area.right() {
        frame.set_cursor_position((cursor_x, area.y));
    }
}

fn render_menu(frame: &mut Frame, viewport: Rect, tree: &FileTree) {
    let Some(menu) = &tree.menu else { return };

    let panel = menu_rect(menu, viewport);
    frame.render_widget(Clear, panel);

    let lines: Vec<Line> = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == menu.cursor {
                Style::default()
                    .bg(SELECTED_BG)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {item} "), style))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), panel);
}

// ── Tests ────────────────────────────────────────────────────────────────────
