//! Shared test utilities for the simple-blog test suite.
//!
//! Builders for pipeline data structures so tests can state intent
//! (`document("blog/a.md", "2020-01-01")`) instead of spelling out whole
//! front-matter blocks, plus lookup helpers that panic with a clear
//! message on a miss.

use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::scan::{RawFileNode, SourceFormat};
use crate::transform::{DocumentNode, Transformer};

// =========================================================================
// Builders
// =========================================================================

/// Build a [`RawFileNode`] as the scanner would produce it, without
/// touching the filesystem. Format is inferred from the extension.
pub fn raw_node(relative_path: &str, raw: &str) -> RawFileNode {
    let extension = relative_path.rsplit('.').next().unwrap_or("");
    let format = SourceFormat::from_extension(extension)
        .unwrap_or_else(|| panic!("'{relative_path}' has no recognized content extension"));
    RawFileNode {
        absolute_path: PathBuf::from("/content").join(relative_path),
        relative_path: relative_path.to_string(),
        format,
        raw: raw.to_string(),
    }
}

/// Build a fully transformed [`DocumentNode`] with a placeholder body.
///
/// The title is the source file's stem, so `document("blog/a.md", ...)`
/// has title `a`.
pub fn document(relative_path: &str, date: &str) -> DocumentNode {
    document_with_body(relative_path, date, "Lorem ipsum dolor sit amet.")
}

/// Build a fully transformed [`DocumentNode`] from a markdown body, going
/// through the real transform so `rendered_html`, `excerpt`, and `slug`
/// are consistent with production output.
pub fn document_with_body(relative_path: &str, date: &str, body: &str) -> DocumentNode {
    let stem = relative_path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(stem, _)| stem)
        .unwrap_or(relative_path);
    let raw = format!("---\ntitle: \"{stem}\"\ndate: \"{date}\"\n---\n\n{body}\n");
    Transformer::new(&SiteConfig::default())
        .transform(&raw_node(relative_path, &raw))
        .unwrap_or_else(|err| panic!("fixture document '{relative_path}' failed: {err}"))
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a document by slug. Panics if not found.
pub fn find_document<'a>(documents: &'a [DocumentNode], slug: &str) -> &'a DocumentNode {
    documents
        .iter()
        .find(|d| d.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = documents.iter().map(|d| d.slug.as_str()).collect();
            panic!("document '{slug}' not found. Available: {slugs:?}")
        })
}
