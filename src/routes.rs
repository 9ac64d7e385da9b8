//! Per-post public route: URL path plus cover image.
//!
//! This is where the two pure helpers meet the content store. Each visible
//! post gets its slug from [`slug::resolve`] and, unless its front matter sets
//! `cover`, a banner from [`cover::cover_for`].

use crate::config::SiteConfig;
use crate::content::{BuildProfile, ContentEntry, visible};
use crate::cover;
use crate::slug;
use serde::Serialize;

/// Where a post is served and what it shows as cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Site-relative path, `/posts/{slug}`.
    pub path: String,
    pub cover: String,
    /// True when `cover` came from the banner list.
    pub banner: bool,
    pub draft: bool,
}

/// Cover for an entry: its own `cover` if set, else the assigned banner.
///
/// `banners` is non-empty for any validated config, so the banner lookup
/// only falls through to an empty string for hand-built configs.
pub fn cover_image<'a>(entry: &'a ContentEntry, config: &'a SiteConfig) -> (&'a str, bool) {
    match entry.cover.as_deref() {
        Some(own) => (own, false),
        None => (
            cover::cover_for(&entry.id, &config.banners, config.cover_hash).unwrap_or_default(),
            true,
        ),
    }
}

/// Routes for all entries visible under `profile`, in store order.
pub fn build_routes(
    entries: &[ContentEntry],
    config: &SiteConfig,
    profile: BuildProfile,
) -> Vec<Route> {
    visible(entries, profile)
        .into_iter()
        .map(|entry| {
            let resolved = slug::resolve(&entry.id, config.slug_mode);
            let (cover, banner) = cover_image(entry, config);
            Route {
                id: entry.id.clone(),
                title: entry.title.clone(),
                path: format!("{}{resolved}", slug::POSTS_PREFIX),
                slug: resolved,
                cover: cover.to_string(),
                banner,
                draft: entry.draft,
            }
        })
        .collect()
}
