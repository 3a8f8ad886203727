//! HTML site rendering.
//!
//! Final stage of the build pipeline. Takes the resolved page list and
//! writes the static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): post listing, newest first, with dates
//!   and excerpts
//! - **Post pages** (`/blog/{slug}/index.html`): full article
//! - **Static pages** (`/{slug}/index.html`): standalone prose pages,
//!   linked from the header
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── about/
//! │   └── index.html
//! ├── blog/
//! │   └── hello-world/
//! │       └── index.html
//! └── favicon.ico              # copied from content/assets/
//! ```
//!
//! Routes map to `{route}/index.html` so published URLs stay extension-free
//! on any file server.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! type-safe templates, automatic XSS escaping, and no runtime template
//! directory to ship. Document bodies are already-rendered HTML from the
//! transform stage and are inserted with `PreEscaped`.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::resolve::{PageDescriptor, Template};
use crate::transform::DocumentNode;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("descriptor route '{0}' references unknown document id {1}")]
    UnknownDocument(String, String),
}

const CSS: &str = include_str!("../static/style.css");

/// Output file for a route: `""` is the site root, everything else nests.
pub fn route_output_path(route: &str) -> PathBuf {
    if route.is_empty() {
        PathBuf::from("index.html")
    } else {
        Path::new(route).join("index.html")
    }
}

/// Render the whole site into `output_dir`.
///
/// `descriptors` comes from the resolve stage already ordered newest-first;
/// the index listing preserves that order. `source_dir` is only used to
/// locate an optional `assets/` directory, copied verbatim to the output
/// root.
pub fn render_site(
    documents: &[DocumentNode],
    descriptors: &[PageDescriptor],
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<(), RenderError> {
    let by_id: BTreeMap<&str, &DocumentNode> =
        documents.iter().map(|d| (d.id.as_str(), d)).collect();

    fs::create_dir_all(output_dir)?;

    let assets_dir = source_dir.join("assets");
    if assets_dir.is_dir() {
        copy_dir_recursive(&assets_dir, output_dir)?;
    }

    let nav_pages = static_nav_pages(descriptors, &by_id);

    for descriptor in descriptors {
        let doc = *by_id.get(descriptor.document_id.as_str()).ok_or_else(|| {
            RenderError::UnknownDocument(descriptor.route.clone(), descriptor.document_id.clone())
        })?;

        let markup = match descriptor.template {
            Template::BlogPost => render_post(doc, config, &nav_pages),
            Template::StaticPage => render_static_page(doc, config, &nav_pages),
        };

        let out_path = output_dir.join(route_output_path(&descriptor.route));
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(out_path, markup.into_string())?;
    }

    // A document may claim the root route itself (content/index.md); only
    // generate the listing when nothing else lives there.
    let has_home = descriptors.iter().any(|d| d.route.is_empty());
    if !has_home {
        let index = render_index(descriptors, &by_id, config, &nav_pages)?;
        fs::write(output_dir.join("index.html"), index.into_string())?;
    }

    Ok(())
}

/// Static pages for the header nav, ordered by route.
fn static_nav_pages<'a>(
    descriptors: &'a [PageDescriptor],
    by_id: &BTreeMap<&str, &'a DocumentNode>,
) -> Vec<(&'a str, &'a str)> {
    let mut pages: Vec<(&str, &str)> = descriptors
        .iter()
        .filter(|d| d.template == Template::StaticPage && !d.route.is_empty())
        .filter_map(|d| {
            by_id
                .get(d.document_id.as_str())
                .map(|doc| (d.route.as_str(), doc.front_matter.title.as_str()))
        })
        .collect();
    pages.sort_by_key(|(route, _)| *route);
    pages
}

// ============================================================================
// HTML Components
// ============================================================================

/// Base HTML document structure shared by every page.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Site header: title linking home plus static page links.
fn site_header(config: &SiteConfig, nav_pages: &[(&str, &str)]) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (config.site_title) }
            nav.site-nav {
                ul {
                    @for (route, title) in nav_pages {
                        li {
                            a href={ "/" (route) "/" } { (title) }
                        }
                    }
                }
            }
        }
    }
}

fn format_date(doc: &DocumentNode) -> (String, String) {
    let date = doc.front_matter.date;
    (date.to_string(), date.format("%B %e, %Y").to_string())
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Index page: blog posts newest-first with date and summary.
fn render_index(
    descriptors: &[PageDescriptor],
    by_id: &BTreeMap<&str, &DocumentNode>,
    config: &SiteConfig,
    nav_pages: &[(&str, &str)],
) -> Result<Markup, RenderError> {
    let mut posts = Vec::new();
    for d in descriptors
        .iter()
        .filter(|d| d.template == Template::BlogPost)
    {
        let doc = *by_id.get(d.document_id.as_str()).ok_or_else(|| {
            RenderError::UnknownDocument(d.route.clone(), d.document_id.clone())
        })?;
        posts.push((d, doc));
    }

    let content = html! {
        (site_header(config, nav_pages))
        main.post-list {
            @for (descriptor, doc) in &posts {
                @let (datetime, display) = format_date(doc);
                article.post-entry {
                    h2 {
                        a href={ "/" (descriptor.route) "/" } { (doc.front_matter.title) }
                    }
                    time datetime=(datetime) { (display) }
                    // Author-written description wins over the mechanical excerpt
                    p.summary {
                        @match &doc.front_matter.description {
                            Some(description) => (description),
                            None => (doc.excerpt),
                        }
                    }
                }
            }
        }
    };

    Ok(base_document(&config.site_title, content))
}

/// Full article page for a blog post.
fn render_post(doc: &DocumentNode, config: &SiteConfig, nav_pages: &[(&str, &str)]) -> Markup {
    let (datetime, display) = format_date(doc);
    let page_title = format!("{} — {}", doc.front_matter.title, config.site_title);

    let content = html! {
        (site_header(config, nav_pages))
        main {
            article.post {
                header {
                    h1 { (doc.front_matter.title) }
                    time datetime=(datetime) { (display) }
                }
                div.post-body {
                    (PreEscaped(&doc.rendered_html))
                }
            }
        }
    };

    base_document(&page_title, content)
}

/// Standalone prose page (about, contact, ...).
fn render_static_page(
    doc: &DocumentNode,
    config: &SiteConfig,
    nav_pages: &[(&str, &str)],
) -> Markup {
    let page_title = format!("{} — {}", doc.front_matter.title, config.site_title);

    let content = html! {
        (site_header(config, nav_pages))
        main {
            article.page {
                h1 { (doc.front_matter.title) }
                div.page-body {
                    (PreEscaped(&doc.rendered_html))
                }
            }
        }
    };

    base_document(&page_title, content)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
