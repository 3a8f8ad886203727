//! Document transformation.
//!
//! Stage 2 of the build pipeline. Takes the raw nodes from the scan stage
//! and produces one [`DocumentNode`] per content file: parsed front-matter,
//! rendered HTML, a plain-text excerpt, and the slug.
//!
//! ## Partial-failure semantics
//!
//! A malformed file (missing `title` or `date`, unparsable date, missing
//! front-matter block) must not abort the build. [`Transformer::transform_all`]
//! transforms every file and returns the failures alongside the successes,
//! so a single run reports *every* malformed file rather than stopping at
//! the first. The caller prints the full report and decides what is fatal.
//!
//! ## Text transforms
//!
//! Body text can be rewritten by an ordered list of pure `&str → String`
//! functions applied before markdown rendering, injected at construction.
//! There is no runtime plugin discovery — the list is fixed when the
//! [`Transformer`] is built. By default `.mdx` bodies get
//! [`strip_mdx_imports`] and `.md` bodies get nothing.
//!
//! ## MDX
//!
//! Embedded component references (`<Bio />`, `<Social handle="..." />`) are
//! opaque: pulldown-cmark emits them as raw HTML untouched, so the prose
//! around them renders normally. Their semantics belong to whatever hydrates
//! the page, not to this pipeline.
//!
//! ## Parallelism
//!
//! Files have no cross-file dependency, so transformation fans out over a
//! rayon parallel iterator. The order-preserving collect keeps the output
//! aligned with the scanner's sorted order, so builds stay deterministic.

use pulldown_cmark::{Event, Options, Parser, html};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::frontmatter::{self, FrontMatter, FrontMatterError};
use crate::scan::{RawFileNode, SourceFormat};
use crate::slug;

/// A malformed content file, excluded from the build and reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}: {kind}")]
pub struct TransformError {
    /// Relative path of the offending file.
    pub path: String,
    pub kind: FrontMatterError,
}

/// A structured document, the unit of content for the rest of the pipeline.
///
/// Serialized to `manifest.json` by the `scan` subcommand so the pipeline's
/// intermediate state stays inspectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Opaque identifier: SHA-256 of the relative path. Stable across
    /// builds as long as the file doesn't move.
    pub id: String,
    /// Source path relative to the content root, forward slashes.
    pub relative_path: String,
    pub front_matter: FrontMatter,
    /// Body markdown after text transforms, before HTML rendering.
    pub body_source: String,
    /// Rendered HTML, computed exactly once.
    pub rendered_html: String,
    /// Plain-text excerpt, cut at a word boundary.
    pub excerpt: String,
    /// URL route, derived from the relative path. See [`crate::slug`].
    pub slug: String,
}

/// An ordered body rewrite applied before markdown rendering.
pub type TextTransform = fn(&str) -> String;

/// Stage-2 worker. Holds the excerpt length and the per-format text
/// transform lists; the transform itself is a pure function of its input.
pub struct Transformer {
    excerpt_length: usize,
    md_transforms: Vec<TextTransform>,
    mdx_transforms: Vec<TextTransform>,
}

impl Transformer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            excerpt_length: config.excerpt_length,
            md_transforms: Vec::new(),
            mdx_transforms: vec![strip_mdx_imports],
        }
    }

    /// Append a text transform for one source format.
    pub fn with_transform(mut self, format: SourceFormat, transform: TextTransform) -> Self {
        match format {
            SourceFormat::Md => self.md_transforms.push(transform),
            SourceFormat::Mdx => self.mdx_transforms.push(transform),
        }
        self
    }

    /// Transform a single raw node into a document.
    pub fn transform(&self, node: &RawFileNode) -> Result<DocumentNode, TransformError> {
        let (front_matter, body) =
            frontmatter::extract(&node.raw).map_err(|kind| TransformError {
                path: node.relative_path.clone(),
                kind,
            })?;

        let transforms = match node.format {
            SourceFormat::Md => &self.md_transforms,
            SourceFormat::Mdx => &self.mdx_transforms,
        };
        let mut body_source = body.to_string();
        for transform in transforms {
            body_source = transform(&body_source);
        }

        let rendered_html = render_markdown(&body_source);
        let excerpt = excerpt(&plain_text(&body_source), self.excerpt_length);

        Ok(DocumentNode {
            id: document_id(&node.relative_path),
            relative_path: node.relative_path.clone(),
            front_matter,
            body_source,
            rendered_html,
            excerpt,
            slug: slug::slugify(&node.relative_path),
        })
    }

    /// Transform every node, accumulating failures instead of stopping.
    ///
    /// Documents come back in input order; errors come back in input order.
    pub fn transform_all(
        &self,
        nodes: &[RawFileNode],
    ) -> (Vec<DocumentNode>, Vec<TransformError>) {
        let results: Vec<Result<DocumentNode, TransformError>> =
            nodes.par_iter().map(|node| self.transform(node)).collect();

        let mut documents = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(doc) => documents.push(doc),
                Err(err) => errors.push(err),
            }
        }
        (documents, errors)
    }
}

/// SHA-256 of the relative path, hex-encoded.
pub fn document_id(relative_path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(relative_path.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
}

/// Render markdown to HTML. Inline HTML (including MDX-style component
/// tags) passes through untouched.
pub fn render_markdown(body: &str) -> String {
    let parser = Parser::new_ext(body, markdown_options());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Extract the plain prose text of a markdown body.
///
/// Raw HTML events are dropped — component tags shouldn't leak into
/// excerpts. Breaks collapse to single spaces.
pub fn plain_text(body: &str) -> String {
    let parser = Parser::new_ext(body, markdown_options());
    let mut out = String::new();
    for event in parser {
        match event {
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => out.push_str(&code),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(_) => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max_chars` characters of `text`, never splitting mid-word.
///
/// Counts characters, not bytes, so multi-byte text can't be cut inside a
/// code point. A first word longer than the budget yields an empty excerpt.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for word in text.split(' ') {
        let word_len = word.chars().count();
        let needed = if out.is_empty() { word_len } else { word_len + 1 };
        if used + needed > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        used += needed;
    }
    out
}

/// Drop the leading run of MDX `import`/`export` statements from a body.
///
/// Only the initial block is touched: once real prose starts, nothing is
/// stripped, so a code sample containing `import` survives.
pub fn strip_mdx_imports(body: &str) -> String {
    let mut lines = body.lines().peekable();
    let mut skipped = false;
    while let Some(line) = lines.peek() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("import ") || trimmed.starts_with("export ") {
            lines.next();
            skipped = true;
        } else {
            break;
        }
    }
    if !skipped {
        return body.to_string();
    }
    lines.collect::<Vec<_>>().join("\n")
}
