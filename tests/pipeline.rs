//! Library-level pipeline: config + posts → routes and feed.

use inkpost::config::{self, SiteConfig};
use inkpost::content::{self, BuildProfile};
use inkpost::cover::{self, CoverHash};
use inkpost::slug::{self, SlugMode};
use inkpost::{feed, routes};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_site(root: &Path, config_toml: &str, posts: &[(&str, &str)]) {
    fs::write(root.join("config.toml"), config_toml).unwrap();
    for (rel, body) in posts {
        let path = root.join("posts").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
}

fn post(title: &str, date: &str, draft: bool) -> String {
    format!("+++\ntitle = \"{title}\"\npublished = {date}\ndraft = {draft}\n+++\nbody\n")
}

#[test]
fn hash_site_feed_and_routes_agree() {
    let tmp = TempDir::new().unwrap();
    let older = post("Older", "2023-06-01", false);
    let newer = post("Newer", "2024-06-01", false);
    write_site(
        tmp.path(),
        r#"
title = "Hashed"
site = "https://hashed.example"
slug_mode = "HASH"
banners = ["/b/0.png", "/b/1.png", "/b/2.png", "/b/3.png"]
"#,
        &[("older.md", &older), ("deep/newer.md", &newer)],
    );

    let site = config::load_config(tmp.path()).unwrap();
    let entries = content::scan_posts(tmp.path()).unwrap();
    let table = routes::build_routes(&entries, &site, BuildProfile::Production);
    let channel = feed::build_feed(&entries, &site, BuildProfile::Production).unwrap();

    // Feed is newest first; every item link ends with the route path.
    let titles: Vec<&str> = channel.items().iter().filter_map(|i| i.title()).collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
    for route in &table {
        assert_eq!(route.slug, slug::resolve(&route.id, SlugMode::Hash));
        assert_eq!(route.slug.len(), 8);
        let link = format!("https://hashed.example{}", route.path);
        assert!(
            channel.items().iter().any(|i| i.link() == Some(link.as_str())),
            "missing {link}"
        );
        let expected = &site.banners[cover::index_for(&route.id, site.banners.len())];
        assert_eq!(&route.cover, expected);
    }
}

#[test]
fn drafts_follow_profile_everywhere() {
    let tmp = TempDir::new().unwrap();
    let live = post("Live", "2024-01-01", false);
    let draft = post("Draft", "2024-02-01", true);
    write_site(tmp.path(), "", &[("live.md", &live), ("draft.md", &draft)]);

    let site = config::load_config(tmp.path()).unwrap();
    let entries = content::scan_posts(tmp.path()).unwrap();

    let prod = feed::build_feed(&entries, &site, BuildProfile::Production).unwrap();
    assert_eq!(prod.items().len(), 1);
    let dev = feed::build_feed(&entries, &site, BuildProfile::Development).unwrap();
    assert_eq!(dev.items().len(), 2);

    assert_eq!(
        routes::build_routes(&entries, &site, BuildProfile::Production).len(),
        1
    );
}

#[test]
fn float_cover_hash_is_selectable() {
    let tmp = TempDir::new().unwrap();
    write_site(
        tmp.path(),
        "cover_hash = \"float\"\nbanners = [\"/x.png\", \"/y.png\"]\n",
        &[],
    );
    let site = config::load_config(tmp.path()).unwrap();
    assert_eq!(site.cover_hash, CoverHash::Float);
    // Short ids agree with exact arithmetic.
    assert_eq!(
        cover::cover_for("ab", &site.banners, site.cover_hash),
        cover::cover_for("ab", &site.banners, CoverHash::Exact)
    );
}

#[test]
fn float_cover_hash_follows_javascript_theme_for_long_ids() {
    let tmp = TempDir::new().unwrap();
    let banners: Vec<String> = (1..=10).map(|i| format!("\"/images/{i}.png\"")).collect();
    write_site(
        tmp.path(),
        &format!("cover_hash = \"float\"\nbanners = [{}]\n", banners.join(", ")),
        &[],
    );
    let site = config::load_config(tmp.path()).unwrap();
    let id = "blog/2024/borrow-borrow-tokio-memor";

    // The JavaScript theme picks index 4; exact arithmetic gives 7.
    assert_eq!(
        cover::cover_for(id, &site.banners, site.cover_hash),
        Some("/images/5.png")
    );
    assert_eq!(
        cover::cover_for(id, &site.banners, CoverHash::Exact),
        Some("/images/8.png")
    );
}

#[test]
fn index_stays_in_range_for_every_banner_count() {
    let site = SiteConfig::default();
    let ids = ["", "a", "hello-world", "notes/a-rather-long-identifier-for-a-post"];
    for n in 1..=64 {
        for id in ids {
            for arithmetic in [CoverHash::Exact, CoverHash::Float] {
                assert!(cover::index_with(id, n, arithmetic) < n);
            }
        }
    }
    assert!(site.validate().is_ok());
}
