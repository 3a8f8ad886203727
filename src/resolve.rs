//! Page resolution.
//!
//! Stage 3 of the build pipeline. Takes the surviving documents from the
//! transform stage and produces the routable page list: one
//! [`PageDescriptor`] per document, collision-checked and ordered.
//!
//! ## Validation
//!
//! Slug derivation is lossy on purpose (case folding, dropped characters),
//! so two distinct source files can normalize to the same route —
//! `blog/a/index.md` and `Blog/a/index.md` both become `blog/a`. Ambiguous
//! routing must never silently pick a winner: a collision is a fatal
//! [`ResolutionError`] naming both source files.
//!
//! ## Templates
//!
//! Documents under the top-level `blog/` directory get the `BlogPost`
//! template; everything else gets `StaticPage`.
//!
//! ## Ordering
//!
//! The descriptor sequence is ordered by descending front-matter date with
//! a stable tie-break on ascending slug — the order a blog listing wants.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::transform::DocumentNode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("slug collision on '{slug}': {first} and {second} resolve to the same route")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },
}

/// Which page template renders a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Template {
    BlogPost,
    StaticPage,
}

/// A routable page: route, the document that backs it, and its template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// URL route, equal to the document's slug.
    pub route: String,
    /// Id of the backing [`DocumentNode`].
    pub document_id: String,
    pub template: Template,
}

/// Assign a template by document location.
fn template_for(relative_path: &str) -> Template {
    match relative_path.split('/').next() {
        Some("blog") => Template::BlogPost,
        _ => Template::StaticPage,
    }
}

/// Resolve documents into an ordered, collision-free page list.
pub fn resolve(documents: &[DocumentNode]) -> Result<Vec<PageDescriptor>, ResolutionError> {
    // Detect collisions before ordering so the error names source files,
    // not positions in some sorted sequence.
    let mut by_slug: BTreeMap<&str, &DocumentNode> = BTreeMap::new();
    for doc in documents {
        if let Some(existing) = by_slug.insert(doc.slug.as_str(), doc) {
            return Err(ResolutionError::SlugCollision {
                slug: doc.slug.clone(),
                first: existing.relative_path.clone(),
                second: doc.relative_path.clone(),
            });
        }
    }

    let mut ordered: Vec<&DocumentNode> = documents.iter().collect();
    ordered.sort_by(|a, b| {
        b.front_matter
            .date
            .cmp(&a.front_matter.date)
            .then_with(|| a.slug.cmp(&b.slug))
    });

    Ok(ordered
        .into_iter()
        .map(|doc| PageDescriptor {
            route: doc.slug.clone(),
            document_id: doc.id.clone(),
            template: template_for(&doc.relative_path),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::document;

    #[test]
    fn blog_documents_get_blog_post_template() {
        let docs = vec![document("blog/hello-world/index.md", "2020-01-01")];
        let pages = resolve(&docs).unwrap();

        assert_eq!(pages[0].route, "blog/hello-world");
        assert_eq!(pages[0].template, Template::BlogPost);
    }

    #[test]
    fn other_documents_get_static_page_template() {
        let docs = vec![document("about.md", "2020-01-01")];
        let pages = resolve(&docs).unwrap();
        assert_eq!(pages[0].template, Template::StaticPage);
    }

    #[test]
    fn descriptor_references_document_id() {
        let docs = vec![document("about.md", "2020-01-01")];
        let pages = resolve(&docs).unwrap();
        assert_eq!(pages[0].document_id, docs[0].id);
    }

    #[test]
    fn ordered_by_descending_date() {
        let docs = vec![
            document("blog/a.md", "2020-01-01"),
            document("blog/b.md", "2020-06-01"),
            document("blog/c.md", "2019-12-01"),
        ];
        let pages = resolve(&docs).unwrap();

        let routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(routes, vec!["blog/b", "blog/a", "blog/c"]);
    }

    #[test]
    fn date_ties_break_on_slug() {
        let docs = vec![
            document("blog/zeta.md", "2020-01-01"),
            document("blog/alpha.md", "2020-01-01"),
        ];
        let pages = resolve(&docs).unwrap();

        assert_eq!(pages[0].route, "blog/alpha");
        assert_eq!(pages[1].route, "blog/zeta");
    }

    #[test]
    fn collision_names_both_source_files() {
        let docs = vec![
            document("blog/a/index.md", "2020-01-01"),
            document("Blog/a/index.md", "2020-02-01"),
        ];
        let err = resolve(&docs).unwrap_err();

        match err {
            ResolutionError::SlugCollision {
                slug,
                first,
                second,
            } => {
                assert_eq!(slug, "blog/a");
                assert_eq!(first, "blog/a/index.md");
                assert_eq!(second, "Blog/a/index.md");
            }
        }
    }

    #[test]
    fn empty_input_resolves_to_empty_list() {
        assert!(resolve(&[]).unwrap().is_empty());
    }
}
