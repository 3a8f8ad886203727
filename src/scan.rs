//! Content scanning.
//!
//! Stage 1 of the build pipeline. Walks the content directory tree and emits
//! one [`RawFileNode`] per markdown source file, in a deterministic order.
//!
//! ## Directory Structure
//!
//! Any tree of `.md`/`.mdx` files works. A typical blog looks like:
//!
//! ```text
//! content/                          # Content root
//! ├── config.toml                   # Site configuration (optional)
//! ├── assets/                       # Static assets → copied to output root
//! ├── about.md                      # Static page
//! └── blog/
//!     ├── hello-world/
//!     │   └── index.md              # Post at /blog/hello-world
//!     └── a-second-post.mdx         # Post at /blog/a-second-post
//! ```
//!
//! ## What gets scanned
//!
//! - Files with a `.md` or `.mdx` extension (case-insensitive). Everything
//!   else is silently skipped — images, stylesheets, stray editor files.
//! - Hidden files and directories (leading `.`) are skipped entirely.
//! - The `assets/` directory is skipped; the render stage copies it verbatim.
//!
//! ## Determinism
//!
//! The returned nodes are sorted lexicographically by relative path, so
//! downstream stages produce identical output across builds regardless of
//! filesystem iteration order. A fresh scan runs on every build; there is
//! no cross-build state.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Content root does not exist: {0}")]
    MissingRoot(PathBuf),
    #[error("Content root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Source file format, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SourceFormat {
    Md,
    Mdx,
}

impl SourceFormat {
    /// Map a file extension to a format. `None` means "not a content file".
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("md") {
            Some(SourceFormat::Md)
        } else if ext.eq_ignore_ascii_case("mdx") {
            Some(SourceFormat::Mdx)
        } else {
            None
        }
    }
}

/// One content file as found on disk. Produced by [`scan`], consumed by the
/// transform stage, and discarded after transformation.
#[derive(Debug, Clone)]
pub struct RawFileNode {
    /// Absolute path on disk.
    pub absolute_path: PathBuf,
    /// Path relative to the content root, normalized to forward slashes.
    /// This string is the identity of the file for the rest of the pipeline:
    /// document ids and slugs both derive from it.
    pub relative_path: String,
    /// File format from the extension.
    pub format: SourceFormat,
    /// Raw file contents.
    pub raw: String,
}

/// Normalize a relative path to a forward-slash string.
///
/// Windows separators would otherwise leak into slugs and document ids and
/// break cross-platform determinism.
fn relative_path_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Scan the content root and return every content file, sorted by relative
/// path.
///
/// Fails with [`ScanError::MissingRoot`] if the root doesn't exist. Files
/// with unsupported extensions are silently skipped.
pub fn scan(root: &Path) -> Result<Vec<RawFileNode>, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut nodes = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        // The root itself is exempt: a dot-named content directory is the
        // user's choice, only entries inside it can be hidden.
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        // Skip hidden entries and the assets directory (copied verbatim by
        // the render stage, never parsed as content).
        !name.starts_with('.')
            && !(entry.depth() == 1 && entry.file_type().is_dir() && name == "assets")
    });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(format) = path
            .extension()
            .and_then(|e| SourceFormat::from_extension(&e.to_string_lossy()))
        else {
            continue;
        };

        let relative = path
            .strip_prefix(root)
            .expect("walkdir entries are under root");

        nodes.push(RawFileNode {
            absolute_path: path.to_path_buf(),
            relative_path: relative_path_string(relative),
            format,
            raw: fs::read_to_string(path)?,
        });
    }

    // Scanning has no cross-file dependency, so traversal order is
    // irrelevant — the sort alone makes the output deterministic.
    nodes.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::MissingRoot(_))));
    }

    #[test]
    fn root_must_be_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.md");
        fs::write(&file, "# hi").unwrap();

        let result = scan(&file);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn finds_md_and_mdx_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "about.md", "about");
        write(tmp.path(), "blog/post.mdx", "post");

        let nodes = scan(tmp.path()).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].format, SourceFormat::Md);
        assert_eq!(nodes[1].format, SourceFormat::Mdx);
    }

    #[test]
    fn unsupported_extensions_silently_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "about.md", "about");
        write(tmp.path(), "photo.jpg", "not markdown");
        write(tmp.path(), "notes.txt", "plain text");
        write(tmp.path(), "config.toml", "site_title = \"x\"");

        let nodes = scan(tmp.path()).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].relative_path, "about.md");
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.MD", "a");
        write(tmp.path(), "b.Mdx", "b");

        let nodes = scan(tmp.path()).unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn output_sorted_by_relative_path() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "zebra.md", "z");
        write(tmp.path(), "blog/b/index.md", "b");
        write(tmp.path(), "blog/a/index.md", "a");
        write(tmp.path(), "about.md", "about");

        let nodes = scan(tmp.path()).unwrap();
        let rels: Vec<&str> = nodes.iter().map(|n| n.relative_path.as_str()).collect();
        assert_eq!(
            rels,
            vec!["about.md", "blog/a/index.md", "blog/b/index.md", "zebra.md"]
        );
    }

    #[test]
    fn rescan_yields_identical_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "blog/one.md", "1");
        write(tmp.path(), "blog/two.md", "2");
        write(tmp.path(), "pages/three.md", "3");

        let first: Vec<String> = scan(tmp.path())
            .unwrap()
            .into_iter()
            .map(|n| n.relative_path)
            .collect();
        let second: Vec<String> = scan(tmp.path())
            .unwrap()
            .into_iter()
            .map(|n| n.relative_path)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn hidden_files_and_dirs_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "about.md", "about");
        write(tmp.path(), ".drafts/secret.md", "hidden");
        write(tmp.path(), ".hidden.md", "hidden");

        let nodes = scan(tmp.path()).unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn dot_named_root_still_scans() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(".content");
        write(&root, "a.md", "a");
        write(&root, "blog/b.md", "b");

        let nodes = scan(&root).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].relative_path, "a.md");
    }

    #[test]
    fn assets_directory_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "about.md", "about");
        write(tmp.path(), "assets/readme.md", "not content");

        let nodes = scan(tmp.path()).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].relative_path, "about.md");
    }

    #[test]
    fn raw_contents_read_verbatim() {
        let tmp = TempDir::new().unwrap();
        let content = "---\ntitle: \"Hi\"\n---\n\n# Hello\n";
        write(tmp.path(), "blog/hi.md", content);

        let nodes = scan(tmp.path()).unwrap();
        assert_eq!(nodes[0].raw, content);
    }
}
