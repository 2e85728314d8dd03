use std::time::Instant;

use replpane_files::FileTreeHandler;
use replpane_files::model::{File, Folder};

/// How long a status message stays on the bar.
const STATUS_SECS: u64 = 4;

/// The in-memory playground workspace behind the file tree. It owns the
/// tree data; the pane only renders it and requests changes through the
/// `FileTreeHandler` callbacks.
pub struct Workspace {
    pub folders: Vec<Folder>,
    pub files: Vec<File>,
    /// Path of the file shown in the preview pane.
    pub open_path: Option<String>,
    status: Option<(String, Instant)>,
    dirty: bool,
}

impl Workspace {
    pub fn new(folders: Vec<Folder>, files: Vec<File>) -> Self {
        Self {
            folders,
            files,
            open_path: None,
            status: None,
            dirty: false,
        }
    }

    /// The current status message, if it hasn't expired.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(msg, _)| msg.as_str())
    }

    /// Drop the status message once it has been on screen long enough.
    pub fn expire_status(&mut self) {
        if let Some((_, shown_at)) = &self.status {
            if shown_at.elapsed().as_secs() >= STATUS_SECS {
                self.status = None;
            }
        }
    }

    /// Whether the tree data changed since the last call. The host uses
    /// this to push fresh data into the pane.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), Instant::now()));
    }
}

impl FileTreeHandler for Workspace {
    fn open_file(&mut self, path: &str) {
        self.open_path = Some(path.to_string());
    }

    fn new_file(&mut self, name: &str) {
        // The pane passes the buffer through unvalidated; rejecting bad
        // names is this side's job.
        let name = name.trim();
        if name.is_empty() {
            self.set_status("New file name can't be empty");
            return;
        }
        if self.files.iter().any(|f| f.name == name) {
            self.set_status(format!("'{name}' already exists"));
            return;
        }
        self.files.push(File::new(name));
        self.dirty = true;
        self.set_status(format!("Created '{name}'"));
    }

    fn delete_file(&mut self, name: &str) {
        let Some(pos) = self.files.iter().position(|f| f.name == name) else {
            return;
        };
        self.files.remove(pos);
        self.dirty = true;
        if self.open_path.as_deref() == Some(name) {
            self.open_path = None;
        }
        self.set_status(format!("Deleted '{name}'"));
    }
}

// ── Tests ────────────────────────────────────────────────────────────
