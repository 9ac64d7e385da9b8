//! Shared value types for the site configuration.
//!
//! These appear inside [`SiteConfig`](crate::config::SiteConfig) and in the
//! JSON emitted by `inkpost routes --json`.

use serde::{Deserialize, Serialize};

/// Entry in the top navigation bar.
///
/// `href` is either a site path (`/archive`) or an absolute URL for
/// external links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

impl NavLink {
    pub fn new(name: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            href: href.to_string(),
        }
    }

    /// True for links that leave the site (`https://…`, `mailto:…`).
    pub fn is_external(&self) -> bool {
        !self.href.starts_with('/')
    }
}

/// Icon link shown under the author card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Iconify identifier, e.g. `mingcute:github-line`.
    pub icon: String,
    pub link: String,
}

/// Content license advertised in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct License {
    pub name: String,
    pub url: String,
}

impl Default for License {
    fn default() -> Self {
        Self {
            name: "CC BY-NC-SA 4.0".to_string(),
            url: "https://creativecommons.org/licenses/by-nc-sa/4.0/legalcode.en".to_string(),
        }
    }
}

/// How the home page banner is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerStyle {
    /// Cycle through all banners.
    #[default]
    Loop,
    /// Show the first banner only.
    Static,
    Hidden,
}
