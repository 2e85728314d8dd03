use ratatui::layout::Rect;

// ── Anchored placement ───────────────────────────────────────────────

/// Where a floating panel should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// The size the floating panel wants to occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

/// Compute the position of a floating panel relative to its anchor.
///
/// The panel is placed directly below the anchor, aligned to the anchor's
/// left edge. If it would overflow the bottom of the viewport it flips above
/// the anchor; if it would overflow the right edge it shifts left. The
/// result is always clamped into the viewport. Without an anchor the panel
/// sits at the viewport origin.
pub fn anchored_position(anchor: Option<Rect>, size: Size, viewport: Rect) -> Position {
    let Some(anchor) = anchor else {
        return Position {
            x: viewport.x,
            y: viewport.y,
        };
    };

    let mut y = anchor.bottom();
    if y.saturating_add(size.height) > viewport.bottom() {
        // Flip above the anchor.
        y = anchor.y.saturating_sub(size.height);
    }
    if y < viewport.y {
        y = viewport.y;
    }

    let mut x = anchor.x;
    if x.saturating_add(size.width) > viewport.right() {
        x = viewport.right().saturating_sub(size.width);
    }
    if x < viewport.x {
        x = viewport.x;
    }

    Position { x, y }
}

/// The rect a floating panel occupies: anchored position, intersected with
/// the viewport so it never draws outside it.
pub fn panel_rect(anchor: Option<Rect>, size: Size, viewport: Rect) -> Rect {
    let pos = anchored_position(anchor, size, viewport);
    let panel = Rect {
        x: pos.x,
        y: pos.y,
        width: size.width,
        height: size.height,
    };
    panel.intersection(viewport)
}

// ── Tests ────────────────────────────────────────────────────────────
