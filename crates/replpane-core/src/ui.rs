use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Create a standard bordered block for a pane, with the border color
/// signaling focus.
pub fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border_color = if focused {
        Color::Blue
    } else {
        Color::DarkGray
    };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Render the bottom status bar showing the current mode and key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, mode_label: &str, info: &str) {
    let mode_style = Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let line = Line::from(vec![
        Span::styled(format!(" {} ", mode_label), mode_style),
        Span::raw("  "),
        Span::styled(info.to_string(), Style::default().add_modifier(Modifier::DIM)),
    ]);

    let bar = Paragraph::new(line).style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

/// Standard layout: main content + status bar (1 line).
/// Returns (content_area, status_area).
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let [content_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    (content_area, status_area)
}

/// Truncate `s` to at most `max_width` display columns, ending in an
/// ellipsis when anything was cut. No tooltip, no wrapping.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ── Tests ────────────────────────────────────────────────────────────
