//! Atrium CLI
//!
//! Command-line interface for Atrium - local-first personal site content
//! management: blog posts, an image gallery, and profile fields.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use atrium_core::{query, Config, KeyStore, Seeder};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "atrium")]
#[command(about = "Atrium - local-first personal site content management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the device account
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Log in with the device account
    Login {
        username: String,
        password: String,
    },
    /// Log out (the account is kept)
    Logout,
    /// Show account and session status
    Status,
    /// Manage blog posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Manage the image gallery
    Gallery {
        #[command(subcommand)]
        command: GalleryCommands,
    },
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// List all tags across posts
    Tags,
    /// Show configuration
    Config,
    /// Delete all stored data, including the account
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Create the single device account (fails if one exists)
    Create {
        username: String,
        password: String,
    },
}

#[derive(Subcommand)]
enum PostCommands {
    /// Create a new post
    #[command(alias = "add")]
    Create {
        /// Post title
        title: String,
        /// Post content
        #[arg(short, long)]
        content: Option<String>,
        /// Tags to add
        #[arg(short, long)]
        tag: Vec<String>,
        /// Image URL or data URL
        #[arg(long)]
        image: Option<String>,
    },
    /// List posts (search, filter by tags, sort)
    #[command(alias = "ls")]
    List {
        /// Free-text search over title, content, and tags
        #[arg(short, long)]
        search: Option<String>,
        /// Keep only posts carrying ALL of these tags
        #[arg(short, long)]
        tag: Vec<String>,
        /// Sort order: newest or oldest
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show a single post
    Show {
        /// Post id (full or prefix)
        id: String,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post id (full or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum GalleryCommands {
    /// Add an image by URL, or embed a local file with --embed
    Add {
        /// Image URL, or a file path with --embed
        source: String,
        /// Read the file and store it as an embedded data URL
        #[arg(long)]
        embed: bool,
    },
    /// List gallery items
    #[command(alias = "ls")]
    List,
    /// Delete a gallery item
    #[command(alias = "rm")]
    Delete {
        /// Item id (full or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the profile fields
    Show,
    /// Set profile fields
    Set {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Bio text
        #[arg(long)]
        bio: Option<String>,
        /// Photo URL or data URL
        #[arg(long)]
        photo: Option<String>,
    },
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    if let Err(e) = run(cli, &output) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    if matches!(cli.command, Commands::Config) {
        return show_config(&config);
    }

    let store = KeyStore::open(config).context("Failed to open store")?;

    // Explicit first-run seeding; reads stay side-effect-free after this.
    Seeder::new(&store).ensure_seeded();

    match cli.command {
        Commands::Account { command } => match command {
            AccountCommands::Create { username, password } => {
                commands::account::create(&store, &username, &password, output)
            }
        },
        Commands::Login { username, password } => {
            commands::account::login(&store, &username, &password, output)
        }
        Commands::Logout => commands::account::logout(&store, output),
        Commands::Status => commands::account::status(&store, output),
        Commands::Post { command } => match command {
            PostCommands::Create {
                title,
                content,
                tag,
                image,
            } => commands::post::create(&store, title, content, tag, image, output),
            PostCommands::List { search, tag, sort } => {
                commands::post::list(&store, search, tag, sort, output)
            }
            PostCommands::Show { id } => commands::post::show(&store, &id, output),
            PostCommands::Delete { id } => commands::post::delete(&store, &id, output),
        },
        Commands::Gallery { command } => match command {
            GalleryCommands::Add { source, embed } => {
                commands::gallery::add(&store, source, embed, output)
            }
            GalleryCommands::List => commands::gallery::list(&store, output),
            GalleryCommands::Delete { id } => commands::gallery::delete(&store, &id, output),
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::profile::show(&store, output),
            ProfileCommands::Set { name, bio, photo } => {
                commands::profile::set(&store, name, bio, photo, output)
            }
        },
        Commands::Tags => {
            let posts = Seeder::new(&store).load_posts();
            output.print_tags(&query::tag_universe(&posts));
            Ok(())
        }
        Commands::Config => unreachable!("handled above"),
        Commands::Reset { yes } => {
            if !yes {
                bail!("This deletes the account and all content. Pass --yes to confirm.");
            }
            store.reset();
            output.success("Store reset. The next run starts from defaults.");
            Ok(())
        }
    }
}

fn show_config(config: &Config) -> Result<()> {
    println!("Config file: {:?}", Config::config_file_path());
    print!("{}", toml::to_string_pretty(config).context("Failed to render configuration")?);
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ATRIUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
