use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use replpane_core::ui;
use replpane_files::{FileTree, Mode, render_file_tree};

use crate::workspace::Workspace;

/// Width of the files pane.
const FILES_PANE_WIDTH: u16 = 32;

/// The main application state: the file tree pane over the workspace,
/// plus a preview pane for the opened file.
pub struct App {
    tree: FileTree,
    workspace: Workspace,
    pub should_quit: bool,
    /// Where the files pane was last drawn; mouse events are resolved
    /// against it.
    files_area: Rect,
}

impl App {
    pub fn new(workspace: Workspace) -> Self {
        let tree = FileTree::new(workspace.folders.clone(), workspace.files.clone());
        Self {
            tree,
            workspace,
            should_quit: false,
            files_area: Rect::default(),
        }
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Ctrl-c always quits
                if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
                    self.should_quit = true;
                    return;
                }
                // 'q' quits only while browsing, so it stays typable in
                // the new-file editor.
                if key.code == KeyCode::Char('q') && self.tree.mode() == Mode::Browse {
                    self.should_quit = true;
                    return;
                }
                self.tree.handle_key(key, self.files_area, &mut self.workspace);
                self.sync_tree();
            }
            Event::Mouse(mouse) => {
                self.tree.handle_mouse(mouse, self.files_area, &mut self.workspace);
                self.sync_tree();
            }
            _ => {}
        }
    }

    /// Push fresh tree data into the pane after the workspace changed.
    fn sync_tree(&mut self) {
        if self.workspace.take_dirty() {
            self.tree
                .set_tree(self.workspace.folders.clone(), self.workspace.files.clone());
        }
    }

    /// Called every poll timeout; ages out the status message.
    pub fn tick(&mut self) {
        self.workspace.expire_status();
    }

    /// Render the entire application.
    pub fn render(&mut self, frame: &mut Frame) {
        let (content_area, status_area) = ui::main_layout(frame.area());

        let [files_area, preview_area] = Layout::horizontal([
            Constraint::Length(FILES_PANE_WIDTH),
            Constraint::Min(1),
        ])
        .areas(content_area);
        self.files_area = files_area;

        render_file_tree(frame, files_area, &self.tree, true);
        self.render_preview(frame, preview_area);

        let info = match self.workspace.status() {
            Some(msg) => msg.to_string(),
            None => match self.tree.mode() {
                Mode::Browse => "j/k: move  Enter: open  a: new file  m: menu  q: quit".to_string(),
                Mode::NewFile => "Enter: create  (leaving the field also creates)".to_string(),
                Mode::Menu => "Enter: delete file  Esc: dismiss".to_string(),
            },
        };
        ui::render_status_bar(frame, status_area, self.tree.mode().label(), &info);
    }

    /// Render the preview pane for the opened file.
    fn render_preview(&self, frame: &mut Frame, area: Rect) {
        let block = ui::pane_block("Preview", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match &self.workspace.open_path {
            Some(path) => vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {path}"),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "  Contents are evaluated by the playground runtime.",
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ],
            None => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Select a file to open it here.",
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ],
        };

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
