//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to the `posts/` directory and overrides the stock
//! defaults key by key:
//!
//! ```text
//! content/
//! ├── config.toml        # Site config (optional)
//! └── posts/
//!     ├── hello-world.md
//!     └── notes/
//!         └── first-post.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Inkpost"
//! sub_title = ""
//! brand_title = ""          # Preferred over `title` in the feed and header
//! description = ""
//! site = "https://example.com"
//! locale = "en"
//!
//! username = ""
//! sign = ""
//! avatar_url = "/avatar.png"
//!
//! banners = ["/images/1.png"]   # Must not be empty
//! slug_mode = "RAW"             # "RAW" | "HASH"
//! cover_hash = "exact"          # "exact" | "float"
//! banner_style = "loop"         # "loop" | "static" | "hidden"
//!
//! [chips]
//! sidebar_categories = 6
//! sidebar_tags = 9
//! footer_categories = 6
//! footer_tags = 24
//!
//! [[navigators]]
//! name = "Home"
//! href = "/"
//!
//! [[social_links]]
//! icon = "mingcute:github-line"
//! link = "https://github.com/someone"
//!
//! [license]
//! name = "CC BY-NC-SA 4.0"
//! url = "https://creativecommons.org/licenses/by-nc-sa/4.0/legalcode.en"
//! ```
//!
//! Unknown keys are rejected to catch typos early. `slug_mode` is the one
//! exception to strictness: an unrecognized value means `RAW`.
//!
//! The loaded [`SiteConfig`] is a plain value. `main` loads it once and passes
//! it by reference to whatever needs banners, slug mode or metadata.

use crate::cover::CoverHash;
use crate::slug::SlugMode;
use crate::types::{BannerStyle, License, NavLink, SocialLink};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// File name looked up in the content root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
    pub sub_title: String,
    /// Display title for header and feed. Falls back to `title` when empty.
    pub brand_title: String,
    pub description: String,
    /// Absolute base URL of the deployed site.
    pub site: String,
    /// Language tag for dates and the feed `<language>`.
    pub locale: String,
    /// Top navigation bar, in display order.
    pub navigators: Vec<NavLink>,
    /// Author name shown on the profile card.
    pub username: String,
    /// Short motto under the author name.
    pub sign: String,
    pub avatar_url: String,
    pub social_links: Vec<SocialLink>,
    /// How many category/tag chips the sidebar and footer show.
    pub chips: ChipLimits,
    /// Cover images assigned to posts without one. Ordered; never empty.
    pub banners: Vec<String>,
    pub slug_mode: SlugMode,
    /// Arithmetic used when mapping post ids onto `banners`.
    pub cover_hash: CoverHash,
    pub license: License,
    pub banner_style: BannerStyle,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Inkpost".to_string(),
            sub_title: String::new(),
            brand_title: String::new(),
            description: String::new(),
            site: "https://example.com".to_string(),
            locale: "en".to_string(),
            navigators: vec![
                NavLink::new("Home", "/"),
                NavLink::new("Archive", "/archive"),
                NavLink::new("About", "/about"),
            ],
            username: String::new(),
            sign: String::new(),
            avatar_url: "/avatar.png".to_string(),
            social_links: Vec::new(),
            chips: ChipLimits::default(),
            banners: vec!["/images/1.png".to_string()],
            slug_mode: SlugMode::Raw,
            cover_hash: CoverHash::Exact,
            license: License::default(),
            banner_style: BannerStyle::Loop,
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.banners.is_empty() {
            return Err(ConfigError::Validation(
                "banners must not be empty".into(),
            ));
        }
        if let Some(pos) = self.banners.iter().position(|b| b.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "banners[{pos}] must not be blank"
            )));
        }
        self.site_url()?;
        if let Some(nav) = self.navigators.iter().find(|n| n.href.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "navigator '{}' has an empty href",
                nav.name
            )));
        }
        self.chips.validate()
    }

    /// The parsed `site` base URL.
    pub fn site_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.site).map_err(|e| {
            ConfigError::Validation(format!("site must be an absolute URL ({}): {e}", self.site))
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::Validation(format!(
                "site cannot be used as a base URL: {}",
                self.site
            )));
        }
        Ok(url)
    }

    /// `brand_title` if set, otherwise `title`.
    pub fn display_title(&self) -> &str {
        if self.brand_title.is_empty() {
            &self.title
        } else {
            &self.brand_title
        }
    }
}

/// Chip counts for the sidebar and footer category/tag clouds.
///
/// Multiples of both 2 and 3 lay out evenly in the two- and three-column
/// grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChipLimits {
    pub sidebar_categories: usize,
    pub sidebar_tags: usize,
    pub footer_categories: usize,
    pub footer_tags: usize,
}

impl Default for ChipLimits {
    fn default() -> Self {
        Self {
            sidebar_categories: 6,
            sidebar_tags: 9,
            footer_categories: 6,
            footer_tags: 24,
        }
    }
}

impl ChipLimits {
    fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("sidebar_categories", self.sidebar_categories),
            ("sidebar_tags", self.sidebar_tags),
            ("footer_categories", self.footer_categories),
            ("footer_tags", self.footer_tags),
        ];
        match limits.iter().find(|(_, v)| *v == 0) {
            Some((key, _)) => Err(ConfigError::Validation(format!(
                "chips.{key} must be non-zero"
            ))),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so arrays
///   such as `banners` or `navigators` are replaced, never concatenated.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Inkpost Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root, next to the posts/ directory.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site metadata
# ---------------------------------------------------------------------------
title = "Inkpost"
sub_title = ""

# Shown in the header and used as the feed title. Falls back to `title`.
brand_title = ""

# Feed description. The feed uses "Blog RSS Feed" when this is empty.
description = ""

# Absolute base URL of the deployed site. Feed links are built on it.
site = "https://example.com"

# Language for date formatting and the feed <language> element.
locale = "en"

# ---------------------------------------------------------------------------
# Author card
# ---------------------------------------------------------------------------
username = ""
sign = ""
avatar_url = "/avatar.png"

# ---------------------------------------------------------------------------
# Covers and URLs
# ---------------------------------------------------------------------------
# Cover images for posts that don't set their own. Each post id maps to a
# fixed entry, so reordering this list reshuffles covers. Must not be empty.
banners = ["/images/1.png"]

# How post ids become URLs under /posts/:
#   "RAW"  - the id itself (/posts/notes/first-post)
#   "HASH" - first 8 hex chars of its SHA-256 (/posts/3f2a9c1d)
# Any other value is treated as "RAW".
slug_mode = "RAW"

# Arithmetic for the id -> banner mapping:
#   "exact" - exact for ids of any length
#   "float" - double-precision, matches the banners picked by the
#             JavaScript theme for long ids
cover_hash = "exact"

# Home page banner: "loop" | "static" | "hidden"
banner_style = "loop"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[[navigators]]
name = "Home"
href = "/"

[[navigators]]
name = "Archive"
href = "/archive"

[[navigators]]
name = "About"
href = "/about"

# ---------------------------------------------------------------------------
# Social links (Iconify icon names)
# ---------------------------------------------------------------------------
# [[social_links]]
# icon = "mingcute:github-line"
# link = "https://github.com/someone"

# ---------------------------------------------------------------------------
# Category / tag chips
# ---------------------------------------------------------------------------
[chips]
# A common multiple of 2 and 3 fills the grids evenly.
sidebar_categories = 6
sidebar_tags = 9
footer_categories = 6
footer_tags = 24

# ---------------------------------------------------------------------------
# License
# ---------------------------------------------------------------------------
[license]
name = "CC BY-NC-SA 4.0"
url = "https://creativecommons.org/licenses/by-nc-sa/4.0/legalcode.en"
"##
}
