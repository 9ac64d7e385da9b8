//! RSS 2.0 feed generation.
//!
//! The feed lists every published post, newest first. Each item links to the
//! post's public URL, built from the configured slug mode:
//!
//! ```text
//! site      = https://blog.example.org/
//! id        = notes/first-post
//! slug_mode = HASH
//! link      = https://blog.example.org/posts/46d04582
//! ```
//!
//! Drafts appear only in [`BuildProfile::Development`] builds.
//!
//! Channel metadata comes straight from [`SiteConfig`]: the title is
//! `brand_title` (or `title`), the description falls back to
//! [`DEFAULT_DESCRIPTION`] when unset.

use crate::config::{ConfigError, SiteConfig};
use crate::content::{BuildProfile, ContentEntry, visible};
use crate::slug;
use rss::validation::{Validate, ValidationError};
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// File written into the output directory.
pub const FEED_FILENAME: &str = "rss.xml";

/// Channel description used when the site has none.
pub const DEFAULT_DESCRIPTION: &str = "Blog RSS Feed";

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid post URL {path}: {source}")]
    Url {
        path: String,
        source: url::ParseError,
    },
    #[error("RSS validation failed: {0}")]
    Invalid(#[from] ValidationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the feed channel for `entries` under `profile`.
pub fn build_feed(
    entries: &[ContentEntry],
    config: &SiteConfig,
    profile: BuildProfile,
) -> Result<Channel, FeedError> {
    let base = config.site_url()?;

    let mut posts = visible(entries, profile);
    posts.sort_by(|a, b| {
        b.published
            .cmp(&a.published)
            .then_with(|| a.id.cmp(&b.id))
    });

    let items = posts
        .into_iter()
        .map(|entry| entry_to_item(entry, &base, config))
        .collect::<Result<Vec<_>, _>>()?;

    let description = if config.description.is_empty() {
        DEFAULT_DESCRIPTION
    } else {
        config.description.as_str()
    };

    let channel = ChannelBuilder::default()
        .title(config.display_title())
        .link(base.as_str())
        .description(description)
        .language(config.locale.clone())
        .generator(format!("inkpost {}", env!("CARGO_PKG_VERSION")))
        .items(items)
        .build();

    channel.validate()?;
    Ok(channel)
}

/// Build and serialize the feed as an XML document.
pub fn render_feed(
    entries: &[ContentEntry],
    config: &SiteConfig,
    profile: BuildProfile,
) -> Result<String, FeedError> {
    Ok(build_feed(entries, config, profile)?.to_string())
}

/// Render the feed and write it to `<output_dir>/rss.xml`.
///
/// Returns the written path.
pub fn write_feed(
    output_dir: &Path,
    entries: &[ContentEntry],
    config: &SiteConfig,
    profile: BuildProfile,
) -> Result<PathBuf, FeedError> {
    let xml = render_feed(entries, config, profile)?;
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(FEED_FILENAME);
    fs::write(&path, xml)?;
    Ok(path)
}

/// Absolute URL of a post: the `/posts/{slug}` path placed under `site`.
///
/// A `site` with a sub-path (`https://host/blog`) keeps it.
pub fn post_url(base: &Url, entry_id: &str, config: &SiteConfig) -> Result<Url, FeedError> {
    let path = slug::post_path(entry_id, config.slug_mode);
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|source| FeedError::Url { path, source })
}

fn entry_to_item(entry: &ContentEntry, base: &Url, config: &SiteConfig) -> Result<Item, FeedError> {
    let link = post_url(base, &entry.id, config)?.to_string();
    let description = Some(entry.description.clone()).filter(|d| !d.is_empty());

    Ok(ItemBuilder::default()
        .title(entry.title.clone())
        .link(link.clone())
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(description)
        .pub_date(entry.published.to_rfc2822())
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::content::scan_posts;
    use crate::slug::SlugMode;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn fixture_feed(profile: BuildProfile, mode: SlugMode) -> Channel {
        let tmp = setup_fixtures();
        let mut config = load_config(tmp.path()).unwrap();
        config.slug_mode = mode;
        let entries = scan_posts(tmp.path()).unwrap();
        build_feed(&entries, &config, profile).unwrap()
    }

    #[test]
    fn channel_uses_brand_title_and_description() {
        let channel = fixture_feed(BuildProfile::Production, SlugMode::Raw);
        assert_eq!(channel.title(), "Fixture Brand");
        assert_eq!(channel.description(), "Posts used by the test suite");
        assert_eq!(channel.link(), "https://blog.example.org/");
        assert_eq!(channel.language(), Some("en"));
    }

    #[test]
    fn production_excludes_drafts_newest_first() {
        let channel = fixture_feed(BuildProfile::Production, SlugMode::Raw);
        assert_eq!(item_titles(&channel), vec!["First Note", "Hello, World"]);
    }

    #[test]
    fn development_includes_drafts() {
        let channel = fixture_feed(BuildProfile::Development, SlugMode::Raw);
        assert_eq!(
            item_titles(&channel),
            vec!["Unfinished", "First Note", "Hello, World"]
        );
    }

    #[test]
    fn raw_links_use_identifier() {
        let channel = fixture_feed(BuildProfile::Production, SlugMode::Raw);
        assert_eq!(
            item_links(&channel),
            vec![
                "https://blog.example.org/posts/notes/first-post",
                "https://blog.example.org/posts/hello-world",
            ]
        );
    }

    #[test]
    fn hash_links_use_digest_slug() {
        let channel = fixture_feed(BuildProfile::Production, SlugMode::Hash);
        let item = find_item(&channel, "Hello, World");
        assert_eq!(
            item.link(),
            Some("https://blog.example.org/posts/afa27b44")
        );
        let guid = item.guid().unwrap();
        assert!(guid.is_permalink());
        assert_eq!(guid.value(), "https://blog.example.org/posts/afa27b44");
    }

    #[test]
    fn item_carries_date_and_description() {
        let channel = fixture_feed(BuildProfile::Production, SlugMode::Raw);
        let item = find_item(&channel, "First Note");
        let pub_date = chrono::DateTime::parse_from_rfc2822(item.pub_date().unwrap()).unwrap();
        assert_eq!(pub_date.to_rfc3339(), "2024-03-01T09:30:00+08:00");
        assert_eq!(item.description(), Some("Short notes & small thoughts"));
    }

    #[test]
    fn title_falls_back_when_brand_empty() {
        let config = SiteConfig {
            title: "Plain".into(),
            ..SiteConfig::default()
        };
        let channel = build_feed(&[], &config, BuildProfile::Production).unwrap();
        assert_eq!(channel.title(), "Plain");
        assert_eq!(channel.description(), DEFAULT_DESCRIPTION);
        assert!(channel.items().is_empty());
    }

    #[test]
    fn post_url_keeps_site_sub_path() {
        let config = SiteConfig {
            site: "https://host.example/blog".into(),
            ..SiteConfig::default()
        };
        let base = config.site_url().unwrap();
        let url = post_url(&base, "hello-world", &config).unwrap();
        assert_eq!(url.as_str(), "https://host.example/blog/posts/hello-world");
    }

    #[test]
    fn invalid_site_is_config_error() {
        let config = SiteConfig {
            site: "nowhere".into(),
            ..SiteConfig::default()
        };
        let err = build_feed(&[], &config, BuildProfile::Production).unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }

    #[test]
    fn render_escapes_markup() {
        let tmp = setup_fixtures();
        let config = load_config(tmp.path()).unwrap();
        let entries = scan_posts(tmp.path()).unwrap();
        let xml = render_feed(&entries, &config, BuildProfile::Production).unwrap();
        assert!(xml.contains("<rss"));
        assert!(xml.contains("Short notes &amp; small thoughts"));
        assert!(!xml.contains("Unfinished"));
    }

    #[test]
    fn write_feed_creates_output_dir() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();
        let dist = out.path().join("dist");
        let config = load_config(tmp.path()).unwrap();
        let entries = scan_posts(tmp.path()).unwrap();

        let path = write_feed(&dist, &entries, &config, BuildProfile::Production).unwrap();
        assert_eq!(path, dist.join(FEED_FILENAME));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("https://blog.example.org/posts/hello-world"));
    }
}
