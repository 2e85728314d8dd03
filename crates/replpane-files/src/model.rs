// ── Tree data ────────────────────────────────────────────────────────

/// A leaf file. Identity is its name; it has no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: String,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A folder with ordered child files and child folders. Depth is unbounded;
/// the caller guarantees a finite tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    pub files: Vec<File>,
    pub folders: Vec<Folder>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            folders: Vec::new(),
        }
    }
}

// ── Flattened rows ───────────────────────────────────────────────────

/// What a flattened row stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// A folder label. Not a click target.
    Folder,
    /// A file row. `path` is the slash-joined ancestor path ending in the
    /// file name; `menu_capable` marks root-level files, the only rows that
    /// carry the actions menu.
    File { path: String, menu_capable: bool },
}

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: String,
    pub depth: usize,
    pub kind: RowKind,
}

impl Row {
    /// The open path for file rows, None for folder labels.
    pub fn file_path(&self) -> Option<&str> {
        match &self.kind {
            RowKind::File { path, .. } => Some(path),
            RowKind::Folder => None,
        }
    }

    pub fn is_menu_capable(&self) -> bool {
        matches!(&self.kind, RowKind::File { menu_capable: true, .. })
    }
}

/// Flatten the tree into display rows: for each folder one label, then its
/// child folders (path prefix `parent/child`), then its direct files; root
/// files come last. Input order is preserved exactly — nothing is sorted.
/// Paths are recomputed on every call, never cached.
pub fn rows(folders: &[Folder], files: &[File]) -> Vec<Row> {
    let mut out = Vec::new();
    for folder in folders {
        push_folder(folder, &folder.name, 0, &mut out);
    }
    for file in files {
        out.push(Row {
            name: file.name.clone(),
            depth: 0,
            kind: RowKind::File {
                path: file.name.clone(),
                menu_capable: true,
            },
        });
    }
    out
}

fn push_folder(folder: &Folder, prefix: &str, depth: usize, out: &mut Vec<Row>) {
    out.push(Row {
        name: folder.name.clone(),
        depth,
        kind: RowKind::Folder,
    });
    for inner in &folder.folders {
        let inner_prefix = format!("{prefix}/{}", inner.name);
        push_folder(inner, &inner_prefix, depth + 1, out);
    }
    for file in &folder.files {
        out.push(Row {
            name: file.name.clone(),
            depth: depth + 1,
            kind: RowKind::File {
                path: format!("{prefix}/{}", file.name),
                menu_capable: false,
            },
        });
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<Folder>, Vec<File>) {
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
        (folders, files)
    }

    #[test]
    fn test_empty_tree() {
        assert!(rows(&[], &[]).is_empty());
    }

    #[test]
    fn test_paths_are_slash_joined_ancestor_names() {
        let (folders, files) = sample();
        let rows = rows(&folders, &files);

        let paths: Vec<Option<&str>> = rows.iter().map(|r| r.file_path()).collect();
        assert_eq!(
            paths,
            vec![
                None, // src
                None, // src/components
                Some("src/components/app.ts"),
                Some("src/main.ts"),
                Some("src/utils.ts"),
                Some("index.html"),
                Some("README.md"),
            ]
        );
    }

    #[test]
    fn test_folder_emits_subfolders_before_own_files() {
        let (folders, files) = sample();
        let rows = rows(&folders, &files);

        assert_eq!(rows[0].name, "src");
        assert_eq!(rows[0].kind, RowKind::Folder);
        assert_eq!(rows[1].name, "components");
        assert_eq!(rows[1].kind, RowKind::Folder);
        assert_eq!(rows[2].name, "app.ts");
        assert_eq!(rows[3].name, "main.ts");
    }

    #[test]
    fn test_input_order_is_preserved_unsorted() {
        // Deliberately unsorted input must come out in the same order.
        let folders = vec![Folder::new("zeta"), Folder::new("alpha")];
        let files = vec![File::new("b.ts"), File::new("a.ts")];
        let rows = rows(&folders, &files);

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "b.ts", "a.ts"]);
    }

    #[test]
    fn test_only_root_files_are_menu_capable() {
        let (folders, files) = sample();
        let rows = rows(&folders, &files);

        assert!(!rows[2].is_menu_capable()); // src/components/app.ts
        assert!(!rows[3].is_menu_capable()); // src/main.ts
        assert!(rows[5].is_menu_capable()); // index.html
        assert!(rows[6].is_menu_capable()); // README.md
        assert!(!rows[0].is_menu_capable()); // folder label
    }

    #[test]
    fn test_depths() {
        let (folders, files) = sample();
        let rows = rows(&folders, &files);

        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 1, 0, 0]);
    }
}
