//! Shared test utilities for the inkpost test suite.
//!
//! Provides fixture setup plus lookup helpers over scanned entries and built
//! feeds.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let entries = scan_posts(tmp.path()).unwrap();
//!
//! let post = find_entry(&entries, "hello-world");
//! assert_eq!(post.title, "Hello, World");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::ContentEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Entry lookups: panic with a clear message on miss
// =========================================================================

/// Find an entry by id. Panics if not found.
pub fn find_entry<'a>(entries: &'a [ContentEntry], id: &str) -> &'a ContentEntry {
    entries.iter().find(|e| e.id == id).unwrap_or_else(|| {
        let ids = entry_ids(entries);
        panic!("entry '{id}' not found. Available: {ids:?}")
    })
}

/// All entry ids in store order.
pub fn entry_ids(entries: &[ContentEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

// =========================================================================
// Feed helpers
// =========================================================================

/// Find a feed item by title. Panics if not found.
pub fn find_item<'a>(channel: &'a rss::Channel, title: &str) -> &'a rss::Item {
    channel
        .items()
        .iter()
        .find(|i| i.title() == Some(title))
        .unwrap_or_else(|| {
            let titles = item_titles(channel);
            panic!("feed item '{title}' not found. Available: {titles:?}")
        })
}

/// All item titles in feed order.
pub fn item_titles(channel: &rss::Channel) -> Vec<&str> {
    channel.items().iter().filter_map(|i| i.title()).collect()
}

/// All item links in feed order.
pub fn item_links(channel: &rss::Channel) -> Vec<&str> {
    channel.items().iter().filter_map(|i| i.link()).collect()
}
