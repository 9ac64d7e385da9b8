//! Post discovery and front matter parsing.
//!
//! Posts are markdown files under `<content>/posts/`, each opening with a
//! TOML front matter block fenced by `+++`:
//!
//! ```text
//! +++
//! title = "First Post"
//! description = "What this blog is about"
//! published = 2024-03-01T09:30:00+08:00
//! draft = false
//! cover = "/images/custom.png"   # optional
//! +++
//!
//! Markdown body…
//! ```
//!
//! The post identifier is its path relative to `posts/`, extension removed,
//! with `/` separators: `posts/notes/first-post.md` → `notes/first-post`.
//! The body is never read beyond the front matter; rendering is someone
//! else's job.
//!
//! `published` accepts a TOML date (`2024-03-01`), local datetime (taken as
//! UTC) or offset datetime.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use walkdir::WalkDir;

/// Directory under the content root holding posts.
pub const POSTS_DIR: &str = "posts";

const FENCE: &str = "+++";
const POST_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Missing +++ front matter in {0}")]
    MissingFrontMatter(PathBuf),
    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid publish date in {0}")]
    Date(PathBuf),
    #[error("Duplicate post id: {0}")]
    DuplicateId(String),
}

/// A post as loaded from the content store. Immutable after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    /// Unique identifier, e.g. `notes/first-post`.
    pub id: String,
    pub title: String,
    pub description: String,
    pub published: DateTime<FixedOffset>,
    pub draft: bool,
    /// Explicit cover image; banners are used when absent.
    pub cover: Option<String>,
}

/// Which posts a build publishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildProfile {
    /// Public build: drafts are hidden.
    #[default]
    Production,
    /// Local preview: everything is visible.
    Development,
}

impl BuildProfile {
    pub fn includes(self, entry: &ContentEntry) -> bool {
        match self {
            Self::Production => !entry.draft,
            Self::Development => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            other => Err(format!(
                "unknown profile '{other}' (expected 'production' or 'development')"
            )),
        }
    }
}

/// Entries visible under `profile`, in store order.
pub fn visible(entries: &[ContentEntry], profile: BuildProfile) -> Vec<&ContentEntry> {
    entries.iter().filter(|e| profile.includes(e)).collect()
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    #[serde(default)]
    description: String,
    published: toml::value::Datetime,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    cover: Option<String>,
}

/// Scan `<root>/posts/` for posts, sorted by id.
///
/// A missing `posts/` directory is an empty store, not an error.
pub fn scan_posts(root: &Path) -> Result<Vec<ContentEntry>, ContentError> {
    let posts_dir = root.join(POSTS_DIR);
    if !posts_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    for dir_entry in WalkDir::new(&posts_dir).sort_by_file_name() {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if !dir_entry.file_type().is_file() || !is_post_file(path) {
            continue;
        }
        let Some(id) = post_id(&posts_dir, path) else {
            continue;
        };
        if !seen.insert(id.clone()) {
            return Err(ContentError::DuplicateId(id));
        }
        let source = fs::read_to_string(path)?;
        entries.push(parse_post(id, &source, path)?);
    }
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(entries)
}

/// Parse one post's source text into an entry.
pub fn parse_post(id: String, source: &str, path: &Path) -> Result<ContentEntry, ContentError> {
    let front = split_front_matter(source)
        .ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;
    let fm: FrontMatter = toml::from_str(front).map_err(|source| ContentError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;
    let published =
        to_datetime(&fm.published).ok_or_else(|| ContentError::Date(path.to_path_buf()))?;
    Ok(ContentEntry {
        id,
        title: fm.title,
        description: fm.description,
        published,
        draft: fm.draft,
        cover: fm.cover.filter(|c| !c.is_empty()),
    })
}

/// Return the text between the opening and closing `+++` fences.
fn split_front_matter(source: &str) -> Option<&str> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != FENCE {
        return None;
    }
    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FENCE {
            return Some(&source[start..offset]);
        }
        offset += line.len();
    }
    None
}

fn is_post_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| POST_EXTENSIONS.contains(&e));
    !hidden && ext_ok
}

/// `posts/notes/first-post.md` → `notes/first-post`
fn post_id(posts_dir: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(posts_dir).ok()?.with_extension("");
    let parts: Vec<&str> = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

fn to_datetime(value: &toml::value::Datetime) -> Option<DateTime<FixedOffset>> {
    use toml::value::Offset;

    let date = value.date?;
    let date = NaiveDate::from_ymd_opt(
        i32::from(date.year),
        u32::from(date.month),
        u32::from(date.day),
    )?;
    let time = match value.time {
        Some(t) => NaiveTime::from_hms_nano_opt(
            u32::from(t.hour),
            u32::from(t.minute),
            u32::from(t.second),
            t.nanosecond,
        )?,
        None => NaiveTime::from_hms_opt(0, 0, 0)?,
    };
    let offset = match value.offset {
        Some(Offset::Custom { minutes }) => FixedOffset::east_opt(i32::from(minutes) * 60)?,
        Some(Offset::Z) | None => FixedOffset::east_opt(0)?,
    };
    date.and_time(time).and_local_timezone(offset).single()
}
