use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;

// ── Dismiss behavior ─────────────────────────────────────────────────
//
// Pure decisions for dismissible overlays (context menus, popups): whether
// a click lands outside the overlay, and what a key press means while one
// is open. State lives with the overlay owner; these functions only decide.

/// What a key press means for an open overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Close the overlay without activating anything.
    Dismiss,
    /// Move the overlay cursor up (cursor-keys overlays only).
    CursorUp,
    /// Move the overlay cursor down (cursor-keys overlays only).
    CursorDown,
    /// Activate the highlighted item.
    Select,
    /// Not part of the overlay protocol; the overlay swallows it.
    Pass,
}

/// Whether (column, row) falls inside `rect`.
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Whether a click at (column, row) lands outside both the overlay panel
/// and the anchor that opened it. Such a click dismisses the overlay.
pub fn is_outside_click(panel: Rect, anchor: Option<Rect>, column: u16, row: u16) -> bool {
    if contains(panel, column, row) {
        return false;
    }
    if let Some(anchor) = anchor {
        if contains(anchor, column, row) {
            return false;
        }
    }
    true
}

/// Interpret a key press for an open overlay. With `cursor_keys` the
/// up/down keys (and j/k) move the overlay cursor; without it they pass
/// through to the overlay unchanged.
pub fn key_outcome(key: KeyEvent, cursor_keys: bool) -> KeyOutcome {
    match key.code {
        KeyCode::Esc => KeyOutcome::Dismiss,
        KeyCode::Enter => KeyOutcome::Select,
        KeyCode::Up | KeyCode::Char('k') if cursor_keys => KeyOutcome::CursorUp,
        KeyCode::Down | KeyCode::Char('j') if cursor_keys => KeyOutcome::CursorDown,
        _ => KeyOutcome::Pass,
    }
}

// ── Tests ────────────────────────────────────────────────────────────
