//! # Simple Blog
//!
//! A minimal static site generator for markdown blogs. Your filesystem is
//! the data source: `.md` and `.mdx` files under the content directory
//! become pages, front-matter supplies titles and dates, and the directory
//! layout decides the URL.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Content flows through three independent stages, each a pure function of
//! the previous stage's output:
//!
//! ```text
//! 1. Scan       content/   →  Vec<RawFileNode>      (filesystem → raw sources)
//! 2. Transform  raw nodes  →  Vec<DocumentNode>     (front-matter + markdown → HTML)
//! 3. Resolve    documents  →  Vec<PageDescriptor>   (slugs, templates, ordering)
//! ```
//!
//! A final render step writes the resolved pages to disk. The separation
//! exists for three reasons:
//!
//! - **Debuggability**: the `scan` subcommand dumps the intermediate
//!   document set as human-readable JSON you can inspect.
//! - **Error isolation**: filesystem problems are fatal scan errors, but a
//!   malformed content file only excludes that file — the transform stage
//!   accumulates failures and reports all of them in one run.
//! - **Testability**: transform and resolve never touch the filesystem, so
//!   unit tests exercise pipeline logic on in-memory fixtures.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the content directory, collects raw `.md`/`.mdx` sources in deterministic order |
//! | [`frontmatter`] | `---`-delimited front-matter splitting and parsing (title, date, description) |
//! | [`transform`] | Stage 2 — front-matter extraction, markdown rendering, excerpts; accumulates per-file errors |
//! | [`slug`] | Path → URL route derivation (lowercase, sanitized, `index` collapsing) |
//! | [`resolve`] | Stage 3 — collision-checked page list with templates and date ordering |
//! | [`render`] | Writes the HTML site from resolved pages using Maud |
//! | [`config`] | `config.toml` loading, defaults, and validation |
//! | [`output`] | CLI output formatting — information-first display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, interpolation is
//! auto-escaped, and there is no template directory to ship.
//!
//! ## Paths Decide URLs, Front-Matter Decides Content
//!
//! The slug comes from the file's relative path, never from front-matter.
//! Renaming a file changes its URL and nothing else; editing a title
//! changes the page and nothing else. There is no database, no ordering
//! file, no route registry.
//!
//! ## MDX Without a JavaScript Toolchain
//!
//! `.mdx` files are treated as markdown with opaque component tags:
//! leading `import`/`export` lines are stripped, component references pass
//! through to the HTML untouched, and whatever hydrates the page owns
//! their semantics. No Node, no bundler.
//!
//! ## Errors Are a Report, Not a Crash
//!
//! A blog build that dies on the first typo'd date is miserable to work
//! with. Malformed files are excluded and reported per file with the exact
//! reason; the `check` subcommand turns any exclusion into a failing exit
//! for CI.

pub mod config;
pub mod frontmatter;
pub mod output;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod slug;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_helpers;
