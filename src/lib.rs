//! # Inkpost
//!
//! The configuration and utility layer of a static blog theme. Inkpost owns
//! the site configuration and three small derivations from it:
//!
//! ```text
//! posts/*.md ──► ContentEntry ──┬─► slug::resolve      → /posts/{slug}
//!                               ├─► cover::cover_for   → banner image
//!                               └─► feed::build_feed   → rss.xml
//! ```
//!
//! Everything downstream of the config is a pure function of its inputs: no
//! hidden state, no randomness, no global configuration. `main` loads a
//! [`config::SiteConfig`] once and passes it by reference.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`slug`] | Identifier → public slug (`RAW` passthrough or truncated SHA-256) |
//! | [`cover`] | Identifier → banner index (base-31 polynomial hash) |
//! | [`content`] | Post discovery and `+++` TOML front matter parsing |
//! | [`routes`] | Per-post public path and cover, combining `slug` and `cover` |
//! | [`feed`] | RSS 2.0 channel built from posts and site metadata |
//! | [`types`] | Value types embedded in the config (`NavLink`, `SocialLink`, …) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Short Hash Slugs
//!
//! `HASH` mode keeps 8 hex characters (32 bits) of SHA-256. URLs stay short
//! and stable across renames of the title, at the price of a possible
//! collision. `inkpost check` reports collisions rather than the URL scheme
//! trying to rule them out.
//!
//! ## Stable Covers
//!
//! A post without its own cover always gets the same banner, on every
//! machine and every build, as long as the banner list is unchanged. See
//! [`cover`] for the arithmetic options.
//!
//! ## Permissive Slug Mode
//!
//! Unknown `slug_mode` values mean `RAW`. Every other config key is strict:
//! unknown keys and empty banner lists fail at load, before any lookup runs.

pub mod config;
pub mod content;
pub mod cover;
pub mod feed;
pub mod output;
pub mod routes;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
