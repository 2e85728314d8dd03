use replpane_files::model::{File, Folder};

/// Seed the sample playground shown on startup.
pub fn seed_workspace() -> (Vec<Folder>, Vec<File>) {
    let components = Folder {
        name: "components".into(),
        files: vec![File::new("editor.ts"), File::new("output.tsx")],
        folders: Vec::new(),
    };
    let src = Folder {
        name: "src".into(),
        files: vec![File::new("main.ts"), File::new("repl.ts")],
        folders: vec![components],
    };
    let styles = Folder {
        name: "styles".into(),
        files: vec![File::new("base.css")],
        folders: Vec::new(),
    };

    let files = vec![File::new("index.html"), File::new("tsconfig.json")];

    (vec![src, styles], files)
}
