pub mod model;
pub mod render;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use replpane_core::dismiss::{self, KeyOutcome};
use replpane_core::text_input::InputLine;

use model::{File, Folder, Row, rows};
use render::PaneLayout;

pub use render::render_file_tree;

// ── Callback seam ────────────────────────────────────────────────────

/// Host-side operations the tree requests. The widget never mutates its
/// tree data; structural changes flow through here and come back as
/// updated folders/files. Exactly one call fires per user gesture.
pub trait FileTreeHandler {
    /// A file row was activated. `path` is its slash-joined location.
    fn open_file(&mut self, path: &str);
    /// The inline editor committed this name. May be empty or a duplicate;
    /// rejecting such names is the implementor's job.
    fn new_file(&mut self, name: &str);
    /// "Delete file" was chosen for a root file.
    fn delete_file(&mut self, name: &str);
}

// ── Widget state ─────────────────────────────────────────────────────

/// Context menu items, top to bottom.
pub(crate) const MENU_ITEMS: [&str; 1] = ["Delete file"];
const MENU_DELETE: usize = 0;

/// An open context menu: the actions cell it is anchored to, the file it
/// targets, and the highlighted item. Anchor and target live in one value
/// so an open menu always has both.
#[derive(Debug, Clone)]
pub(crate) struct MenuState {
    pub(crate) anchor: Rect,
    pub(crate) file: File,
    pub(crate) cursor: usize,
}

/// Input focus of the pane, shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    NewFile,
    Menu,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Browse => "BROWSE",
            Self::NewFile => "NEW FILE",
            Self::Menu => "MENU",
        }
    }
}

/// The file tree browser pane.
///
/// Renders caller-owned folders and files as a flattened list, tracks the
/// hovered row, and drives three transient interactions: opening a file,
/// creating one through an inline editor, and deleting a root file through
/// an anchored context menu. All transitions happen synchronously inside
/// `handle_key` / `handle_mouse`.
pub struct FileTree {
    folders: Vec<Folder>,
    files: Vec<File>,
    /// Hovered row index into the flattened rows. Keyboard cursor and
    /// mouse hover share it.
    pub(crate) hovered: usize,
    /// Inline new-file editor; visible iff armed.
    pub(crate) new_file: Option<InputLine>,
    /// Context menu; open iff `Some`.
    pub(crate) menu: Option<MenuState>,
}

impl FileTree {
    pub fn new(folders: Vec<Folder>, files: Vec<File>) -> Self {
        Self {
            folders,
            files,
            hovered: 0,
            new_file: None,
            menu: None,
        }
    }

    /// Replace the tree data after the host applied a change.
    pub fn set_tree(&mut self, folders: Vec<Folder>, files: Vec<File>) {
        self.folders = folders;
        self.files = files;
        self.clamp_hovered();
    }

    /// Flatten the current tree. Recomputed per call; paths are never cached.
    pub fn rows(&self) -> Vec<Row> {
        rows(&self.folders, &self.files)
    }

    pub fn hovered(&self) -> usize {
        self.hovered
    }

    pub fn mode(&self) -> Mode {
        if self.menu.is_some() {
            Mode::Menu
        } else if self.new_file.is_some() {
            Mode::NewFile
        } else {
            Mode::Browse
        }
    }

    /// Name of the file the open menu targets, if any.
    pub fn menu_target(&self) -> Option<&str> {
        self.menu.as_ref().map(|m| m.file.name.as_str())
    }

    fn clamp_hovered(&mut self) {
        let len = self.rows().len();
        if self.hovered >= len {
            self.hovered = len.saturating_sub(1);
        }
    }

    // ── Inline new-file editor ───────────────────────────────────────

    /// Arm the inline editor with an empty buffer and take key focus.
    pub fn arm_new_file(&mut self) {
        self.new_file = Some(InputLine::new());
    }

    /// Commit the editor: invoke the callback with the buffer as-is (an
    /// empty buffer is passed through too) and return to hidden. Enter and
    /// blur share this path.
    fn commit_new_file(&mut self, handler: &mut dyn FileTreeHandler) {
        if let Some(input) = self.new_file.take() {
            handler.new_file(&input.into_value());
        }
    }

    // ── Event handling ───────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent, area: Rect, handler: &mut dyn FileTreeHandler) {
        if self.menu.is_some() {
            self.handle_menu_key(key, handler);
            return;
        }
        if self.new_file.is_some() {
            self.handle_editor_key(key, handler);
            return;
        }

        let rows = self.rows();
        let layout = PaneLayout::new(area, false, rows.len(), self.hovered);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.hovered + 1 < rows.len() {
                    self.hovered += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.hovered = self.hovered.saturating_sub(1);
            }
            KeyCode::Char('g') => {
                self.hovered = 0;
            }
            KeyCode::Char('G') => {
                self.hovered = rows.len().saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(path) = rows.get(self.hovered).and_then(Row::file_path) {
                    handler.open_file(path);
                }
            }
            KeyCode::Char('a') => self.arm_new_file(),
            KeyCode::Char('m') => self.open_menu_on_hovered(&layout),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect, handler: &mut dyn FileTreeHandler) {
        let layout = PaneLayout::new(
            area,
            self.new_file.is_some(),
            self.rows().len(),
            self.hovered,
        );
        match mouse.kind {
            MouseEventKind::Moved => {
                // Hover tracking drives the actions affordance.
                if self.menu.is_none() {
                    if let Some(idx) =
                        layout.row_at(self.hovered, self.rows().len(), mouse.column, mouse.row)
                    {
                        self.hovered = idx;
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row, area, &layout, handler);
            }
            _ => {}
        }
    }

    fn handle_click(
        &mut self,
        column: u16,
        row: u16,
        area: Rect,
        layout: &PaneLayout,
        handler: &mut dyn FileTreeHandler,
    ) {
        // An open menu captures the whole gesture.
        if let Some(menu) = &self.menu {
            let panel = render::menu_rect(menu, area);
            if dismiss::contains(panel, column, row) {
                let on_item = row > panel.y
                    && row < panel.bottom().saturating_sub(1)
                    && (row - panel.y - 1) as usize == MENU_DELETE;
                if on_item {
                    // Close and clear first, then request the deletion.
                    if let Some(menu) = self.menu.take() {
                        handler.delete_file(&menu.file.name);
                    }
                }
                return;
            }
            if dismiss::is_outside_click(panel, Some(menu.anchor), column, row) {
                // Another row's actions cell re-anchors without closing;
                // anything else dismisses without a callback.
                match self.actions_target(layout, column, row) {
                    Some((anchor, file)) => {
                        self.menu = Some(MenuState {
                            anchor,
                            file,
                            cursor: 0,
                        });
                    }
                    None => self.menu = None,
                }
            } else {
                // The anchor itself toggles the menu shut.
                self.menu = None;
            }
            return;
        }

        // An armed editor commits on any click that leaves it (blur). The
        // blurring gesture triggers nothing further.
        if self.new_file.is_some() {
            let inside = layout
                .editor
                .is_some_and(|e| dismiss::contains(e, column, row));
            if !inside {
                self.commit_new_file(handler);
            }
            return;
        }

        // Header "+" button arms the inline editor.
        if dismiss::contains(layout.new_button, column, row) {
            self.arm_new_file();
            return;
        }

        // Tree rows. The target is resolved against the scroll offset the
        // user clicked on; the hover moves only afterwards, since moving it
        // first can shift the offset under the hit test.
        let rows = self.rows();
        let Some(idx) = layout.row_at(self.hovered, rows.len(), column, row) else {
            return;
        };
        if let Some((anchor, file)) = self.actions_target(layout, column, row) {
            // The actions cell suppresses the row's own click. The hover
            // stays put so the list doesn't scroll under the open menu.
            self.menu = Some(MenuState {
                anchor,
                file,
                cursor: 0,
            });
            return;
        }
        self.hovered = idx;
        if let Some(path) = rows[idx].file_path() {
            handler.open_file(path);
        }
    }

    /// The actions-cell target under (column, row): the cell rect to anchor
    /// to and the file it belongs to, when the row there is a root file.
    fn actions_target(&self, layout: &PaneLayout, column: u16, row: u16) -> Option<(Rect, File)> {
        let rows = self.rows();
        let idx = layout.row_at(self.hovered, rows.len(), column, row)?;
        let entry = &rows[idx];
        if !entry.is_menu_capable() {
            return None;
        }
        let line = layout.row_line(self.hovered, idx)?;
        let cell = layout.actions_cell(line);
        if !dismiss::contains(cell, column, row) {
            return None;
        }
        Some((cell, File::new(entry.name.clone())))
    }

    fn open_menu_on_hovered(&mut self, layout: &PaneLayout) {
        let rows = self.rows();
        let Some(entry) = rows.get(self.hovered) else {
            return;
        };
        if !entry.is_menu_capable() {
            return;
        }
        let Some(line) = layout.row_line(self.hovered, self.hovered) else {
            return;
        };
        self.menu = Some(MenuState {
            anchor: layout.actions_cell(line),
            file: File::new(entry.name.clone()),
            cursor: 0,
        });
    }

    fn handle_menu_key(&mut self, key: KeyEvent, handler: &mut dyn FileTreeHandler) {
        match dismiss::key_outcome(key, true) {
            KeyOutcome::Dismiss => self.menu = None,
            KeyOutcome::CursorUp => {
                if let Some(menu) = &mut self.menu {
                    menu.cursor = menu.cursor.saturating_sub(1);
                }
            }
            KeyOutcome::CursorDown => {
                if let Some(menu) = &mut self.menu {
                    menu.cursor = (menu.cursor + 1).min(MENU_ITEMS.len() - 1);
                }
            }
            KeyOutcome::Select => {
                // Close and clear first, then request the deletion.
                if let Some(menu) = self.menu.take() {
                    if menu.cursor == MENU_DELETE {
                        handler.delete_file(&menu.file.name);
                    }
                }
            }
            KeyOutcome::Pass => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent, handler: &mut dyn FileTreeHandler) {
        match key.code {
            // Esc is the keyboard blur: same commit path as Enter.
            KeyCode::Enter | KeyCode::Esc => self.commit_new_file(handler),
            code => {
                if let Some(input) = &mut self.new_file {
                    match code {
                        KeyCode::Char(c) => input.insert_char(c),
                        KeyCode::Backspace => input.backspace(),
                        KeyCode::Left => input.cursor_left(),
                        KeyCode::Right => input.cursor_right(),
                        _ => {}
                    }
                }
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[derive(Default)]
    struct Recorder {
        opened: Vec<String>,
        created: Vec<String>,
        deleted: Vec<String>,
    }

    impl FileTreeHandler for Recorder {
        fn open_file(&mut self, path: &str) {
            self.opened.push(path.to_string());
        }
        fn new_file(&mut self, name: &str) {
            self.created.push(name.to_string());
        }
        fn delete_file(&mut self, name: &str) {
            self.deleted.push(name.to_string());
        }
    }

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 30,
        height: 12,
    };

    fn sample_tree() -> FileTree {
        let folders = vec![Folder {
            name: "src".into(),
            files: vec![File::new("main.ts"), File::new("utils.ts")],
            folders: vec![Folder {
                name: "components".into(),
                files: vec![File::new("app.ts")],
                folders: Vec::new(),
            }],
        }];
        let files = vec![File::new("index.html"), File::new("README.md")];
        FileTree::new(folders, files)
    }

    // Row indices in the sample tree:
    // 0 src/  1 components/  2 app.ts  3 main.ts  4 utils.ts
    // 5 index.html  6 README.md

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn moved(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// The y coordinate of a fully-visible row (list starts below the
    /// border and the header line).
    fn row_y(idx: usize) -> u16 {
        2 + idx as u16
    }

    /// x inside the actions cell (last two columns inside the border).
    const ACTIONS_X: u16 = 27;

    #[test]
    fn test_enter_opens_hovered_file_with_full_path() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.hovered = 2; // app.ts
        tree.handle_key(key(KeyCode::Enter), AREA, &mut rec);

        assert_eq!(rec.opened, vec!["src/components/app.ts"]);
        assert!(rec.created.is_empty());
        assert!(rec.deleted.is_empty());
    }

    #[test]
    fn test_enter_on_folder_label_does_nothing() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.hovered = 0; // src
        tree.handle_key(key(KeyCode::Enter), AREA, &mut rec);

        assert!(rec.opened.is_empty());
    }

    #[test]
    fn test_click_row_body_opens_exactly_once() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_mouse(click(3, row_y(5)), AREA, &mut rec);

        assert_eq!(rec.opened, vec!["index.html"]);
        assert!(rec.deleted.is_empty());
        assert_eq!(tree.mode(), Mode::Browse);
    }

    #[test]
    fn test_click_actions_cell_opens_menu_not_file() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_mouse(click(ACTIONS_X, row_y(5)), AREA, &mut rec);

        assert!(rec.opened.is_empty());
        assert_eq!(tree.mode(), Mode::Menu);
        assert_eq!(tree.menu_target(), Some("index.html"));
    }

    #[test]
    fn test_actions_cell_only_exists_on_root_files() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        // Nested file row: the right edge is plain row body.
        tree.handle_mouse(click(ACTIONS_X, row_y(3)), AREA, &mut rec);

        assert_eq!(rec.opened, vec!["src/main.ts"]);
        assert_eq!(tree.mode(), Mode::Browse);
    }

    #[test]
    fn test_menu_retargets_on_other_actions_cell_without_closing() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        // Open on README.md (row 6), whose panel drops below it, then
        // click index.html's actions cell (row 5).
        tree.handle_mouse(click(ACTIONS_X, row_y(6)), AREA, &mut rec);
        assert_eq!(tree.menu_target(), Some("README.md"));

        tree.handle_mouse(click(ACTIONS_X, row_y(5)), AREA, &mut rec);

        assert_eq!(tree.mode(), Mode::Menu);
        assert_eq!(tree.menu_target(), Some("index.html"));
        assert!(rec.opened.is_empty());
        assert!(rec.deleted.is_empty());
    }

    #[test]
    fn test_scrolled_actions_click_targets_visible_row() {
        // More rows than visible lines: hovering the bottom scrolls the
        // list, so absolute and on-screen indices diverge.
        let files = (0..12).map(|i| File::new(format!("f{i}.ts"))).collect();
        let mut tree = FileTree::new(Vec::new(), files);
        let mut rec = Recorder::default();

        tree.handle_key(key(KeyCode::Char('G')), AREA, &mut rec);
        assert_eq!(tree.hovered(), 11);
        // Nine visible lines, so the first one now shows f3.ts.

        tree.handle_mouse(click(ACTIONS_X, row_y(0)), AREA, &mut rec);

        assert_eq!(tree.mode(), Mode::Menu);
        assert_eq!(tree.menu_target(), Some("f3.ts"));
        // Opening the menu must not scroll the list under it.
        assert_eq!(tree.hovered(), 11);

        tree.handle_key(key(KeyCode::Enter), AREA, &mut rec);
        assert_eq!(rec.deleted, vec!["f3.ts"]);
        assert!(rec.opened.is_empty());
    }

    #[test]
    fn test_outside_click_dismisses_without_delete() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_mouse(click(ACTIONS_X, row_y(5)), AREA, &mut rec);
        assert_eq!(tree.mode(), Mode::Menu);

        tree.handle_mouse(click(3, row_y(1)), AREA, &mut rec);

        assert_eq!(tree.mode(), Mode::Browse);
        assert!(tree.menu_target().is_none());
        assert!(rec.deleted.is_empty());
        assert!(rec.opened.is_empty());
    }

    #[test]
    fn test_menu_escape_dismisses_without_delete() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.hovered = 5;
        tree.handle_key(key(KeyCode::Char('m')), AREA, &mut rec);
        assert_eq!(tree.mode(), Mode::Menu);

        tree.handle_key(key(KeyCode::Esc), AREA, &mut rec);

        assert_eq!(tree.mode(), Mode::Browse);
        assert!(rec.deleted.is_empty());
    }

    #[test]
    fn test_menu_select_closes_then_deletes_by_name() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.hovered = 5;
        tree.handle_key(key(KeyCode::Char('m')), AREA, &mut rec);
        tree.handle_key(key(KeyCode::Enter), AREA, &mut rec);

        // Bare name, not a path; menu state fully cleared before the call.
        assert_eq!(rec.deleted, vec!["index.html"]);
        assert_eq!(tree.mode(), Mode::Browse);
        assert!(tree.menu_target().is_none());
        assert!(rec.opened.is_empty());
    }

    #[test]
    fn test_menu_click_delete_item() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        // Anchor at (27, 7); the panel flips left and opens below at
        // (15, 8, 15, 3) with the item line at y = 9.
        tree.handle_mouse(click(ACTIONS_X, row_y(5)), AREA, &mut rec);
        tree.handle_mouse(click(16, 9), AREA, &mut rec);

        assert_eq!(rec.deleted, vec!["index.html"]);
        assert_eq!(tree.mode(), Mode::Browse);
    }

    #[test]
    fn test_menu_key_on_nested_file_is_ignored() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.hovered = 3; // src/main.ts
        tree.handle_key(key(KeyCode::Char('m')), AREA, &mut rec);

        assert_eq!(tree.mode(), Mode::Browse);
    }

    #[test]
    fn test_new_file_commit_on_enter() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_key(key(KeyCode::Char('a')), AREA, &mut rec);
        assert_eq!(tree.mode(), Mode::NewFile);

        for c in "foo.ts".chars() {
            tree.handle_key(key(KeyCode::Char(c)), AREA, &mut rec);
        }
        tree.handle_key(key(KeyCode::Enter), AREA, &mut rec);

        assert_eq!(rec.created, vec!["foo.ts"]);
        assert_eq!(tree.mode(), Mode::Browse);
        // Typing 'a' went into the buffer, not back into arming.
        assert!(rec.opened.is_empty());
    }

    #[test]
    fn test_new_file_commit_on_blur_click() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_key(key(KeyCode::Char('a')), AREA, &mut rec);
        for c in "bar.ts".chars() {
            tree.handle_key(key(KeyCode::Char(c)), AREA, &mut rec);
        }

        // A click on some row blurs the editor; it commits and the click
        // does not also open a file.
        tree.handle_mouse(click(3, row_y(2)), AREA, &mut rec);

        assert_eq!(rec.created, vec!["bar.ts"]);
        assert_eq!(tree.mode(), Mode::Browse);
        assert!(rec.opened.is_empty());
    }

    #[test]
    fn test_empty_commit_passes_empty_string_through() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_key(key(KeyCode::Char('a')), AREA, &mut rec);
        tree.handle_key(key(KeyCode::Enter), AREA, &mut rec);

        assert_eq!(rec.created, vec![""]);
        assert_eq!(tree.mode(), Mode::Browse);
    }

    #[test]
    fn test_plus_button_click_arms_editor() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        // Header line y = 1, button in the last three inner columns.
        tree.handle_mouse(click(27, 1), AREA, &mut rec);

        assert_eq!(tree.mode(), Mode::NewFile);
        assert!(rec.created.is_empty());
    }

    #[test]
    fn test_editor_backspace_and_cursor_editing() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_key(key(KeyCode::Char('a')), AREA, &mut rec);
        for c in "ab".chars() {
            tree.handle_key(key(KeyCode::Char(c)), AREA, &mut rec);
        }
        tree.handle_key(key(KeyCode::Backspace), AREA, &mut rec);
        tree.handle_key(key(KeyCode::Char('x')), AREA, &mut rec);
        tree.handle_key(key(KeyCode::Enter), AREA, &mut rec);

        assert_eq!(rec.created, vec!["ax"]);
    }

    #[test]
    fn test_mouse_hover_moves_highlight() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_mouse(moved(3, row_y(4)), AREA, &mut rec);
        assert_eq!(tree.hovered(), 4);

        // Outside the list: hover unchanged.
        tree.handle_mouse(moved(3, 0), AREA, &mut rec);
        assert_eq!(tree.hovered(), 4);
    }

    #[test]
    fn test_keyboard_navigation_bounds() {
        let mut tree = sample_tree();
        let mut rec = Recorder::default();

        tree.handle_key(key(KeyCode::Char('G')), AREA, &mut rec);
        assert_eq!(tree.hovered(), 6);
        tree.handle_key(key(KeyCode::Char('j')), AREA, &mut rec);
        assert_eq!(tree.hovered(), 6);

        tree.handle_key(key(KeyCode::Char('g')), AREA, &mut rec);
        assert_eq!(tree.hovered(), 0);
        tree.handle_key(key(KeyCode::Char('k')), AREA, &mut rec);
        assert_eq!(tree.hovered(), 0);
    }

    #[test]
    fn test_set_tree_clamps_hover() {
        let mut tree = sample_tree();
        tree.hovered = 6;

        tree.set_tree(Vec::new(), vec![File::new("only.ts")]);

        assert_eq!(tree.hovered(), 0);
        assert_eq!(tree.rows().len(), 1);
    }
}
