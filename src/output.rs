//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**: the primary display
//! for every entity is its semantic identity — title, date, route — with
//! filesystem paths shown as secondary context via indented `Source:`
//! lines. The output reads as a content inventory while still letting users
//! trace every page back to its file.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Content files
//! 001 about.md
//! 002 blog/hello-world/index.md
//! ```
//!
//! ## Transform
//!
//! ```text
//! Documents
//! 001 Hello World (2020-01-01)
//!     Source: blog/hello-world/index.md
//!
//! Excluded files
//! 001 blog/broken.md
//!     Reason: missing required front-matter field 'date'
//! ```
//!
//! ## Resolve
//!
//! ```text
//! Pages
//! 001 Hello World → blog/hello-world/index.html
//! 002 About → about/index.html
//!
//! Resolved 1 post, 1 page
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use std::collections::BTreeMap;

use crate::resolve::{PageDescriptor, Template};
use crate::scan::RawFileNode;
use crate::transform::{DocumentNode, TransformError};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Pluralize a count: `1 post`, `2 posts`.
fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Scan stage
// ============================================================================

pub fn format_scan_output(nodes: &[RawFileNode]) -> Vec<String> {
    let mut lines = vec!["Content files".to_string()];
    for (idx, node) in nodes.iter().enumerate() {
        lines.push(format!("{} {}", format_index(idx + 1), node.relative_path));
    }
    lines.push(String::new());
    lines.push(format!("Found {}", count_noun(nodes.len(), "content file")));
    lines
}

pub fn print_scan_output(nodes: &[RawFileNode]) {
    for line in format_scan_output(nodes) {
        println!("{line}");
    }
}

// ============================================================================
// Transform stage
// ============================================================================

pub fn format_document_output(documents: &[DocumentNode]) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];
    for (idx, doc) in documents.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(idx + 1),
            doc.front_matter.title,
            doc.front_matter.date
        ));
        lines.push(format!("    Source: {}", doc.relative_path));
    }
    lines
}

/// The per-file error report: every malformed file with its reason.
///
/// Returns no lines when there is nothing to report, so callers can print
/// unconditionally.
pub fn format_error_report(errors: &[TransformError]) -> Vec<String> {
    if errors.is_empty() {
        return Vec::new();
    }
    let mut lines = vec!["Excluded files".to_string()];
    for (idx, error) in errors.iter().enumerate() {
        lines.push(format!("{} {}", format_index(idx + 1), error.path));
        lines.push(format!("    Reason: {}", error.kind));
    }
    lines
}

pub fn print_transform_output(documents: &[DocumentNode], errors: &[TransformError]) {
    for line in format_document_output(documents) {
        println!("{line}");
    }
    let report = format_error_report(errors);
    if !report.is_empty() {
        eprintln!();
        for line in report {
            eprintln!("{line}");
        }
    }
}

// ============================================================================
// Resolve stage
// ============================================================================

pub fn format_page_output(
    descriptors: &[PageDescriptor],
    documents: &[DocumentNode],
) -> Vec<String> {
    let by_id: BTreeMap<&str, &DocumentNode> =
        documents.iter().map(|d| (d.id.as_str(), d)).collect();

    let mut lines = vec!["Pages".to_string()];
    for (idx, descriptor) in descriptors.iter().enumerate() {
        let title = by_id
            .get(descriptor.document_id.as_str())
            .map(|d| d.front_matter.title.as_str())
            .unwrap_or("(unknown)");
        let out = if descriptor.route.is_empty() {
            "index.html".to_string()
        } else {
            format!("{}/index.html", descriptor.route)
        };
        lines.push(format!("{} {} → {}", format_index(idx + 1), title, out));
    }

    let posts = descriptors
        .iter()
        .filter(|d| d.template == Template::BlogPost)
        .count();
    let pages = descriptors.len() - posts;
    lines.push(String::new());
    lines.push(format!(
        "Resolved {}, {}",
        count_noun(posts, "post"),
        count_noun(pages, "page")
    ));
    lines
}

pub fn print_page_output(descriptors: &[PageDescriptor], documents: &[DocumentNode]) {
    for line in format_page_output(descriptors, documents) {
        println!("{line}");
    }
}
