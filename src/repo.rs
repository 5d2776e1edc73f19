//! Source-file discovery
//!
//! Walks an already-cloned repository and produces the candidate file
//! list the pipeline consumes: recognized source extensions only,
//! gitignore-aware, sorted for reproducible output order.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions treated as analyzable source code
pub fn is_source_extension(ext: &str) -> bool {
    matches!(
        ext,
        "py" | "js"
            | "jsx"
            | "ts"
            | "tsx"
            | "rs"
            | "go"
            | "java"
            | "kt"
            | "rb"
            | "php"
            | "c"
            | "h"
            | "cpp"
            | "hpp"
            | "cs"
            | "swift"
            | "scala"
            | "sh"
    )
}

/// Collect relative paths of source files under `root`, sorted.
pub fn collect_source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("repository path not found: {}", root.display()))?;

    let walker = ignore::WalkBuilder::new(&root)
        .git_ignore(true)
        .git_exclude(true)
        .build();

    let mut files = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !is_source_extension(ext) {
            continue;
        }
        if let Ok(rel) = path.strip_prefix(&root) {
            files.push(rel.to_path_buf());
        }
    }

    files.sort();
    debug!(count = files.len(), root = %root.display(), "collected source files");
    Ok(files)
}

/// Display name for a repository path (its base name)
pub fn repo_display_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("repository")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collects_only_source_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "main.py", "x = 1\n");
        write(dir.path(), "lib/util.rs", "fn f() {}\n");
        write(dir.path(), "README.md", "# readme\n");
        write(dir.path(), "logo.png", "binary-ish");

        let files = collect_source_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("lib/util.rs"), PathBuf::from("main.py")]
        );
    }

    #[test]
    fn test_output_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "z.py", "");
        write(dir.path(), "a.py", "");
        write(dir.path(), "m.py", "");

        let files = collect_source_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(names, vec!["a.py", "m.py", "z.py"]);
    }

    #[test]
    fn test_missing_root_is_error() {
        assert!(collect_source_files(Path::new("/definitely/not/here")).is_err());
    }

    #[test]
    fn test_repo_display_name() {
        let dir = tempfile::tempdir().unwrap();
        let name = repo_display_name(dir.path());
        assert!(!name.is_empty());
        assert_ne!(name, "repository");
    }
}
