//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every post leads
//! with its positional index and title; its id, public path and cover follow
//! as indented context lines. The listing reads as a content inventory
//! while still letting users trace each line back to a file.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Site
//!     Fixture Brand → https://blog.example.org
//!     Slug mode: RAW
//!     Banners: 3 (exact)
//!
//! Posts
//! 001 Hello, World
//!     Source: hello-world
//!     Published: 2024-01-15
//! 002 Unfinished (draft)
//!     Source: notes/unfinished
//!     Published: 2024-05-20
//!
//! Warnings
//!     Slug 3f2a9c1d shared by: notes/a, notes/b
//! ```
//!
//! ## Routes
//!
//! ```text
//! 001 Hello, World → /posts/hello-world
//!     Source: hello-world
//!     Cover: /images/3.png (banner)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::SiteConfig;
use crate::content::ContentEntry;
use crate::cover::{self, CoverHash};
use crate::routes::Route;
use crate::slug::{self, SlugCollision};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with a draft marker.
///
/// ```text
/// 001 Hello, World
/// 002 Unfinished (draft)
/// ```
fn entity_header(index: usize, title: &str, draft: bool) -> String {
    if draft {
        format!("{} {} (draft)", format_index(index), title)
    } else {
        format!("{} {}", format_index(index), title)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn arithmetic_name(arithmetic: CoverHash) -> &'static str {
    match arithmetic {
        CoverHash::Exact => "exact",
        CoverHash::Float => "float",
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format `check` output: site summary, post inventory, and warnings.
pub fn format_check_output(
    config: &SiteConfig,
    entries: &[ContentEntry],
    collisions: &[SlugCollision],
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Site".to_string());
    lines.push(format!("{}{} → {}", indent(1), config.display_title(), config.site));
    lines.push(format!("{}Slug mode: {}", indent(1), config.slug_mode));
    lines.push(format!(
        "{}Banners: {} ({})",
        indent(1),
        config.banners.len(),
        arithmetic_name(config.cover_hash)
    ));
    if !config.navigators.is_empty() {
        let names: Vec<&str> = config.navigators.iter().map(|n| n.name.as_str()).collect();
        lines.push(format!("{}Navigation: {}", indent(1), names.join(", ")));
    }

    lines.push(String::new());
    lines.push("Posts".to_string());
    if entries.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, entry) in entries.iter().enumerate() {
        lines.push(entity_header(i + 1, &entry.title, entry.draft));
        lines.push(format!("{}Source: {}", indent(1), entry.id));
        lines.push(format!(
            "{}Published: {}",
            indent(1),
            entry.published.format("%Y-%m-%d")
        ));
        let desc = truncate_desc(entry.description.trim(), 60);
        if !desc.is_empty() {
            lines.push(format!("{}{}", indent(1), desc));
        }
    }

    if !collisions.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for collision in collisions {
            lines.push(format!(
                "{}Slug {} shared by: {}",
                indent(1),
                collision.slug,
                collision.ids.join(", ")
            ));
        }
    }

    lines
}

pub fn print_check_output(
    config: &SiteConfig,
    entries: &[ContentEntry],
    collisions: &[SlugCollision],
) {
    print_lines(format_check_output(config, entries, collisions));
}

// ============================================================================
// routes
// ============================================================================

/// Format the route table: one entity per post with path and cover.
pub fn format_routes_output(routes: &[Route]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, route) in routes.iter().enumerate() {
        lines.push(format!(
            "{} → {}",
            entity_header(i + 1, &route.title, route.draft),
            route.path
        ));
        lines.push(format!("{}Source: {}", indent(1), route.id));
        let origin = if route.banner { " (banner)" } else { "" };
        lines.push(format!("{}Cover: {}{}", indent(1), route.cover, origin));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        routes.len(),
        if routes.len() == 1 { "route" } else { "routes" }
    ));
    lines
}

pub fn print_routes_output(routes: &[Route]) {
    print_lines(format_routes_output(routes));
}

// ============================================================================
// feed
// ============================================================================

/// Format the summary printed after `rss.xml` is written.
pub fn format_feed_output(path: &Path, item_count: usize, skipped_drafts: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "Feed: {} ({} {})",
        path.display(),
        item_count,
        if item_count == 1 { "item" } else { "items" }
    )];
    if skipped_drafts > 0 {
        lines.push(format!(
            "{}Skipped {} draft{}",
            indent(1),
            skipped_drafts,
            if skipped_drafts == 1 { "" } else { "s" }
        ));
    }
    lines
}

pub fn print_feed_output(path: &Path, item_count: usize, skipped_drafts: usize) {
    print_lines(format_feed_output(path, item_count, skipped_drafts));
}

// ============================================================================
// slug / cover
// ============================================================================

/// `id → slug` per identifier under the given mode.
pub fn format_slug_lines(ids: &[String], mode: slug::SlugMode) -> Vec<String> {
    ids.iter()
        .map(|id| format!("{} → {}", id, slug::resolve(id, mode)))
        .collect()
}

/// `id → banner` per identifier, with the banner's list index.
pub fn format_cover_lines(ids: &[String], config: &SiteConfig) -> Vec<String> {
    ids.iter()
        .map(|id| {
            let index = cover::index_with(id, config.banners.len(), config.cover_hash);
            let banner = config.banners.get(index).map_or("", String::as_str);
            format!("{} → {} [{}]", id, banner, index)
        })
        .collect()
}

pub fn print_slug_lines(ids: &[String], mode: slug::SlugMode) {
    print_lines(format_slug_lines(ids, mode));
}

pub fn print_cover_lines(ids: &[String], config: &SiteConfig) {
    print_lines(format_cover_lines(ids, config));
}
