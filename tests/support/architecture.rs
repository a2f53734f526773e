//! Source scanning for the layering contract.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A source line that breaks a layering rule.
pub struct Violation {
    pub file: String,
    pub line: usize,
    pub text: String,
}

impl fmt::Debug for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.text.trim())
    }
}

/// A layer of the crate and the paths it must not name.
pub struct Layer {
    pub dir: &'static str,
    pub forbidden: &'static [&'static str],
}

pub const DOMAIN: Layer = Layer {
    dir: "src/domain",
    forbidden: &[
        "crate::adapter",
        "crate::infrastructure",
        "crate::application",
        "crate::port",
        "tokio::",
        "reqwest::",
        "diesel::",
        "axum::",
    ],
};

pub const PORTS: Layer = Layer {
    dir: "src/port",
    forbidden: &[
        "crate::adapter",
        "crate::infrastructure",
        "crate::application",
        "axum::",
        "diesel::",
        "reqwest::",
    ],
};

pub const APPLICATION: Layer = Layer {
    dir: "src/application",
    forbidden: &["crate::adapter", "crate::infrastructure", "axum::", "diesel::"],
};

pub const HTTP_ADAPTER: Layer = Layer {
    dir: "src/adapter/inbound/http",
    forbidden: &[
        "crate::adapter::outbound::sqlite",
        "crate::adapter::outbound::disk",
        "diesel::",
    ],
};

impl Layer {
    /// Lines in this layer that mention a forbidden path.
    pub fn violations(&self) -> Vec<Violation> {
        scan(self.dir, |_, line| {
            self.forbidden.iter().any(|path| line.contains(path))
        })
    }
}

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("read {}: {e}", dir.display()));
    for entry in entries.map(|entry| entry.unwrap().path()) {
        if entry.is_dir() {
            rust_files(&entry, out);
        } else if entry.extension().is_some_and(|ext| ext == "rs") {
            out.push(entry);
        }
    }
}

/// Run `flag` over every line of every `.rs` file under `relative_dir`.
/// `flag` receives the file path and the trimmed line.
fn scan(relative_dir: &str, mut flag: impl FnMut(&Path, &str) -> bool) -> Vec<Violation> {
    let mut files = Vec::new();
    rust_files(&root().join(relative_dir), &mut files);
    files.sort();

    let mut found = Vec::new();
    for file in files {
        let content = read_path(&file);
        let display = file
            .strip_prefix(root())
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        for (idx, line) in content.lines().enumerate() {
            if flag(&file, line.trim()) {
                found.push(Violation {
                    file: display.clone(),
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }
    found
}

/// Anything in a `mod.rs` besides module declarations and re-exports.
pub fn mod_rs_logic(relative_dir: &str) -> Vec<Violation> {
    let mut current: Option<PathBuf> = None;
    let mut in_reexport = false;

    scan(relative_dir, |file, line| {
        if file.file_name().and_then(|name| name.to_str()) != Some("mod.rs") {
            return false;
        }
        if current.as_deref() != Some(file) {
            current = Some(file.to_path_buf());
            in_reexport = false;
        }

        if in_reexport || line.starts_with("pub use ") {
            in_reexport = !line.ends_with(';');
            return false;
        }

        let allowed = line.is_empty()
            || line.starts_with("//")
            || line.starts_with("#!")
            || line.starts_with("#[cfg")
            || line.starts_with("pub mod ")
            || line.starts_with("mod ");
        !allowed
    })
}

fn read_path(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

pub fn read(relative_path: &str) -> String {
    read_path(&root().join(relative_path))
}

/// The `up.sql` of the named migration, if the migration exists.
pub fn migration_up(name: &str) -> Option<String> {
    let path = root().join("migrations").join(name).join("up.sql");
    path.exists().then(|| read_path(&path))
}
