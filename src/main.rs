use clap::{Parser, Subcommand};
use inkpost::content::{self, BuildProfile};
use inkpost::slug::{self, SlugMode};
use inkpost::{config, feed, output, routes};
use std::path::PathBuf;

/// Shared flags for commands that list posts.
#[derive(clap::Args, Clone)]
struct ProfileArgs {
    /// Build profile: "production" hides drafts, "development" shows them
    #[arg(long, default_value_t = BuildProfile::Production)]
    profile: BuildProfile,
}

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(about = "Site configuration, slugs, covers and RSS for a static blog")]
#[command(long_about = "\
Site configuration, slugs, covers and RSS for a static blog

Content structure:

  content/
  ├── config.toml              # Site config (optional)
  └── posts/
      ├── hello-world.md       # id: hello-world
      └── notes/
          └── first-post.md    # id: notes/first-post

Each post starts with TOML front matter between +++ lines:

  +++
  title = \"Hello, World\"
  description = \"The obligatory first post\"
  published = 2024-01-15
  draft = false
  +++

Post URLs are /posts/{slug}. With slug_mode = \"HASH\" the slug is the first
8 hex characters of the id's SHA-256; otherwise it is the id itself.

Run 'inkpost gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate config and posts, and report slug collisions
    Check,
    /// Write the RSS feed to <output>/rss.xml
    Feed(ProfileArgs),
    /// List each post's public path and cover image
    Routes {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Print routes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve public slugs for post ids
    Slug {
        /// Post ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Slug mode override ("RAW" or "HASH"); defaults to the config value
        #[arg(long)]
        mode: Option<String>,
    },
    /// Show the banner assigned to post ids
    Cover {
        /// Post ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = config::load_config(&cli.source)?;
            let entries = content::scan_posts(&cli.source)?;
            let collisions =
                slug::find_collisions(entries.iter().map(|e| e.id.as_str()), site.slug_mode);
            output::print_check_output(&site, &entries, &collisions);
            println!("==> Content is valid");
        }
        Command::Feed(ProfileArgs { profile }) => {
            let site = config::load_config(&cli.source)?;
            let entries = content::scan_posts(&cli.source)?;
            let path = feed::write_feed(&cli.output, &entries, &site, profile)?;
            let published = content::visible(&entries, profile).len();
            output::print_feed_output(&path, published, entries.len() - published);
        }
        Command::Routes { profile, json } => {
            let site = config::load_config(&cli.source)?;
            let entries = content::scan_posts(&cli.source)?;
            let table = routes::build_routes(&entries, &site, profile.profile);
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                output::print_routes_output(&table);
            }
        }
        Command::Slug { ids, mode } => {
            let mode = match mode {
                Some(value) => SlugMode::parse(&value),
                None => config::load_config(&cli.source)?.slug_mode,
            };
            output::print_slug_lines(&ids, mode);
        }
        Command::Cover { ids } => {
            let site = config::load_config(&cli.source)?;
            output::print_cover_lines(&ids, &site);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
