//! Public slug resolution for posts.
//!
//! Every post has a canonical identifier (its path inside the content store,
//! e.g. `notes/first-post`). The identifier is what authors see; the slug is
//! what readers see in the URL. Two modes are supported:
//!
//! | Mode   | `notes/first-post` becomes |
//! |--------|----------------------------|
//! | `RAW`  | `notes/first-post`         |
//! | `HASH` | first 8 hex chars of `sha256("notes/first-post")` |
//!
//! ## Hash Width
//!
//! `HASH` keeps 32 bits of the digest. Short URLs are the point, so two
//! identifiers can in principle share a slug. [`find_collisions`] lets the
//! `check` command surface that case instead of silently overwriting a page.
//!
//! ## Unknown Modes
//!
//! Config values other than `RAW`/`HASH` resolve to `RAW`. A typo in
//! `slug_mode` therefore never breaks a build; it only changes URLs back to
//! the readable form.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Number of hex characters kept from the digest in `HASH` mode.
pub const HASH_SLUG_LEN: usize = 8;

/// URL prefix every post is served under.
pub const POSTS_PREFIX: &str = "/posts/";

/// How a post identifier is turned into its public slug.
///
/// Serialized as `"RAW"` / `"HASH"`. Deserialization never fails: anything
/// unrecognized becomes [`SlugMode::Raw`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlugMode {
    /// Identifier used verbatim.
    #[default]
    Raw,
    /// Truncated SHA-256 of the identifier.
    Hash,
}

impl SlugMode {
    /// Parse a mode name. Accepts the canonical upper-case spelling and its
    /// lower-case form; everything else falls back to `Raw`.
    pub fn parse(value: &str) -> Self {
        match value {
            "HASH" | "hash" => Self::Hash,
            _ => Self::Raw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::Hash => "HASH",
        }
    }
}

impl From<String> for SlugMode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<SlugMode> for String {
    fn from(mode: SlugMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for SlugMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the public slug for a post identifier.
///
/// - `Raw` → `identifier` unchanged
/// - `Hash` → lowercase hex SHA-256 of the UTF-8 bytes, first [`HASH_SLUG_LEN`] chars
pub fn resolve(identifier: &str, mode: SlugMode) -> String {
    match mode {
        SlugMode::Raw => identifier.to_string(),
        SlugMode::Hash => {
            let digest = Sha256::digest(identifier.as_bytes());
            let mut hex = format!("{:x}", digest);
            hex.truncate(HASH_SLUG_LEN);
            hex
        }
    }
}

/// Site-relative URL path of a post: `/posts/{slug}`.
pub fn post_path(identifier: &str, mode: SlugMode) -> String {
    format!("{POSTS_PREFIX}{}", resolve(identifier, mode))
}

/// A slug claimed by more than one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    pub slug: String,
    /// Colliding identifiers, sorted.
    pub ids: Vec<String>,
}

/// Group identifiers by resolved slug and return every slug with two or more
/// owners, ordered by slug.
pub fn find_collisions<'a, I>(ids: I, mode: SlugMode) -> Vec<SlugCollision>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_slug: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for id in ids {
        by_slug
            .entry(resolve(id, mode))
            .or_default()
            .push(id.to_string());
    }
    by_slug
        .into_iter()
        .filter(|(_, owners)| owners.len() > 1)
        .map(|(slug, mut ids)| {
            ids.sort();
            SlugCollision { slug, ids }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_short_hex(s: &str) -> bool {
        s.len() == HASH_SLUG_LEN && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn raw_returns_identifier_unchanged() {
        assert_eq!(resolve("hello-world", SlugMode::Raw), "hello-world");
        assert_eq!(resolve("notes/日本語", SlugMode::Raw), "notes/日本語");
    }

    #[test]
    fn raw_empty_identifier() {
        assert_eq!(resolve("", SlugMode::Raw), "");
    }

    #[test]
    fn hash_matches_sha256_prefix() {
        // Well-known SHA-256 test vectors.
        assert_eq!(resolve("abc", SlugMode::Hash), "ba7816bf");
        assert_eq!(resolve("", SlugMode::Hash), "e3b0c442");
    }

    #[test]
    fn hash_is_eight_lowercase_hex_chars() {
        let long = "x".repeat(500);
        for id in ["a", "hello-world", "posts/first-post", "日本語", long.as_str()] {
            let slug = resolve(id, SlugMode::Hash);
            assert!(is_short_hex(&slug), "{id:?} → {slug:?}");
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let first = resolve("hello-world", SlugMode::Hash);
        for _ in 0..5 {
            assert_eq!(resolve("hello-world", SlugMode::Hash), first);
        }
        assert_eq!(first, "afa27b44");
    }

    #[test]
    fn parse_known_modes() {
        assert_eq!(SlugMode::parse("RAW"), SlugMode::Raw);
        assert_eq!(SlugMode::parse("HASH"), SlugMode::Hash);
        assert_eq!(SlugMode::parse("hash"), SlugMode::Hash);
    }

    #[test]
    fn parse_unknown_mode_falls_back_to_raw() {
        assert_eq!(SlugMode::parse("SHA"), SlugMode::Raw);
        assert_eq!(SlugMode::parse(""), SlugMode::Raw);
        assert_eq!(SlugMode::parse("Hash"), SlugMode::Raw);
    }

    #[test]
    fn mode_serializes_upper_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            mode: SlugMode,
        }
        let out = toml::to_string(&Wrapper {
            mode: SlugMode::Hash,
        })
        .unwrap();
        assert_eq!(out.trim(), r#"mode = "HASH""#);

        let back: Wrapper = toml::from_str(r#"mode = "bogus""#).unwrap();
        assert_eq!(back.mode, SlugMode::Raw);
    }

    #[test]
    fn post_path_prefixes_slug() {
        assert_eq!(post_path("hello-world", SlugMode::Raw), "/posts/hello-world");
        assert_eq!(post_path("abc", SlugMode::Hash), "/posts/ba7816bf");
    }

    #[test]
    fn no_collisions_for_distinct_ids() {
        let ids = ["alpha", "beta", "gamma"];
        assert!(find_collisions(ids, SlugMode::Raw).is_empty());
        assert!(find_collisions(ids, SlugMode::Hash).is_empty());
    }

    #[test]
    fn duplicate_ids_collide() {
        let collisions = find_collisions(["beta", "alpha", "beta"], SlugMode::Raw);
        assert_eq!(
            collisions,
            vec![SlugCollision {
                slug: "beta".to_string(),
                ids: vec!["beta".to_string(), "beta".to_string()],
            }]
        );
    }
}
