//! Source scanning for layer-boundary checks.

use std::fs;
use std::path::{Path, PathBuf};

/// Top-level layers of the crate, each owning one directory under `src/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Domain,
    Port,
    Application,
    Adapter,
    Infrastructure,
}

impl Layer {
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "src/domain",
            Self::Port => "src/port",
            Self::Application => "src/application",
            Self::Adapter => "src/adapter",
            Self::Infrastructure => "src/infrastructure",
        }
    }

    /// Path prefix used when another module imports this layer.
    pub const fn import_path(self) -> &'static str {
        match self {
            Self::Domain => "crate::domain",
            Self::Port => "crate::port",
            Self::Application => "crate::application",
            Self::Adapter => "crate::adapter",
            Self::Infrastructure => "crate::infrastructure",
        }
    }
}

/// A source line that breaks a layering rule.
#[derive(Debug)]
pub struct Violation {
    pub file: String,
    pub line: usize,
    pub text: String,
}

/// One `.rs` file under the crate root.
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    fn is_mod_rs(&self) -> bool {
        self.path.ends_with("/mod.rs")
    }

    fn violations(&self, offending: impl Fn(&str) -> bool) -> Vec<Violation> {
        self.content
            .lines()
            .enumerate()
            .filter(|(_, text)| offending(text))
            .map(|(idx, text)| Violation {
                file: self.path.clone(),
                line: idx + 1,
                text: text.trim().to_string(),
            })
            .collect()
    }
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()));
    for entry in entries {
        let path = entry.expect("directory entry").path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Every source file under `dir`, relative to the crate root, sorted.
pub fn sources(dir: &str) -> Vec<SourceFile> {
    let root = crate_root();
    let mut paths = Vec::new();
    walk(&root.join(dir), &mut paths);
    paths.sort();
    paths
        .into_iter()
        .map(|path| SourceFile {
            content: fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display())),
            path: path
                .strip_prefix(&root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/"),
        })
        .collect()
}

/// Lines in `layer` that import any of `forbidden` layers.
pub fn imports_across(layer: Layer, forbidden: &[Layer]) -> Vec<Violation> {
    sources(layer.dir())
        .iter()
        .flat_map(|file| {
            file.violations(|text| forbidden.iter().any(|other| text.contains(other.import_path())))
        })
        .collect()
}

/// Lines in `layer` mentioning any of `needles`.
pub fn mentions(layer: Layer, needles: &[&str]) -> Vec<Violation> {
    sources(layer.dir())
        .iter()
        .flat_map(|file| {
            file.violations(|text| needles.iter().any(|needle| text.contains(needle)))
        })
        .collect()
}

/// Lines in `mod.rs` files that are neither module declarations, cfg
/// attributes, nor comments.
pub fn mod_rs_logic() -> Vec<Violation> {
    sources("src")
        .iter()
        .filter(|file| file.is_mod_rs())
        .flat_map(|file| {
            file.violations(|text| {
                let line = text.trim();
                !(line.is_empty()
                    || line.starts_with("//")
                    || line.starts_with("pub mod ")
                    || line.starts_with("mod ")
                    || line.starts_with("#[cfg"))
            })
        })
        .collect()
}

pub fn exists(relative: &str) -> bool {
    crate_root().join(relative).exists()
}
