//! Slug derivation — the URL route of a page is a pure function of its
//! relative path.
//!
//! The normalization rules, applied per path segment:
//!
//! - lowercase
//! - strip the file extension
//! - whitespace and underscores become dashes
//! - characters outside `[a-z0-9-]` are dropped
//! - runs of dashes collapse to one, leading/trailing dashes are trimmed
//! - a trailing `index` segment is dropped, so `blog/hello-world/index.md`
//!   and `blog/hello-world.md` route identically
//!
//! Examples:
//!
//! - `blog/hello-world/index.md` → `blog/hello-world`
//! - `Blog/My First Post.md` → `blog/my-first-post`
//! - `notes/Café_du-Monde.mdx` → `notes/caf-du-monde`
//!
//! The function is idempotent: feeding a slug back in yields the same slug.
//! It is deliberately not injective — `Blog/a` and `blog/a` collide — which
//! is why the resolve stage checks for collisions instead of silently
//! picking a winner.

/// Derive the slug for a relative path (forward-slash separated).
pub fn slugify(relative_path: &str) -> String {
    let mut segments: Vec<String> = relative_path
        .split('/')
        .map(slugify_segment)
        .filter(|s| !s.is_empty())
        .collect();

    // Strip the extension from the final segment before re-slugging it:
    // slugify_segment has already lowercased, so find the dot on the
    // original last raw segment instead.
    if let Some(last_raw) = relative_path.rsplit('/').next() {
        let stem = match last_raw.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => last_raw,
        };
        if let Some(last) = segments.last_mut() {
            *last = slugify_segment(stem);
        }
    }

    if segments.last().map(String::as_str) == Some("index") {
        segments.pop();
    }

    segments.retain(|s| !s.is_empty());
    segments.join("/")
}

fn slugify_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut prev_dash = true; // suppress leading dashes
    for c in segment.chars() {
        let mapped = match c {
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            'a'..='z' | '0'..='9' => Some(c),
            '-' | '_' => Some('-'),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        };
        match mapped {
            Some('-') => {
                if !prev_dash {
                    out.push('-');
                    prev_dash = true;
                }
            }
            Some(c) => {
                out.push(c);
                prev_dash = false;
            }
            None => {}
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_file_routes_to_parent() {
        assert_eq!(slugify("blog/hello-world/index.md"), "blog/hello-world");
    }

    #[test]
    fn flat_file_routes_to_stem() {
        assert_eq!(slugify("blog/hello-world.md"), "blog/hello-world");
    }

    #[test]
    fn lowercases_path() {
        assert_eq!(slugify("Blog/A/index.md"), "blog/a");
    }

    #[test]
    fn spaces_and_underscores_become_dashes() {
        assert_eq!(slugify("Blog/My First_Post.md"), "blog/my-first-post");
    }

    #[test]
    fn disallowed_characters_dropped() {
        assert_eq!(slugify("notes/Café du Monde!.mdx"), "notes/caf-du-monde");
    }

    #[test]
    fn dash_runs_collapse() {
        assert_eq!(slugify("a--b---c.md"), "a-b-c");
    }

    #[test]
    fn root_page() {
        assert_eq!(slugify("about.md"), "about");
    }

    #[test]
    fn root_index_is_empty_route() {
        assert_eq!(slugify("index.md"), "");
    }

    #[test]
    fn mdx_extension_stripped() {
        assert_eq!(slugify("blog/post.mdx"), "blog/post");
    }

    #[test]
    fn idempotent_on_slugs() {
        let slug = slugify("Blog/My First Post.md");
        assert_eq!(slugify(&slug), slug);
    }

    #[test]
    fn case_variants_collide_by_design() {
        assert_eq!(slugify("blog/a/index.md"), slugify("Blog/a/index.md"));
    }

    #[test]
    fn dotfiles_keep_their_name() {
        // A stem-less name has nothing before the dot; treat the whole
        // segment as the stem rather than producing an empty slug.
        assert_eq!(slugify(".config"), "config");
    }
}
