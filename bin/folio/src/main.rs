//! folio CLI
//!
//! Query a portfolio content directory from the terminal or serve it as a
//! JSON API.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use folio_catalog::{EntryQuery, FilterCriteria};
use folio_core::{ContentKind, SortKey, WorkType};

/// Command-line interface for folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Portfolio content loader, query tool and JSON API"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// List entries, optionally filtered and sorted
    List {
        /// Content kind (projects, shots)
        kind: ContentKind,
        /// Keep entries with any of these tags
        #[arg(long = "tag", value_delimiter = ',')]
        tags: Vec<String>,
        /// Keep entries in any of these categories
        #[arg(long = "category", value_delimiter = ',')]
        categories: Vec<String>,
        /// Keep entries with any of these skills
        #[arg(long = "skill", value_delimiter = ',')]
        skills: Vec<String>,
        /// Keep entries from any of these years
        #[arg(long = "year", value_delimiter = ',')]
        years: Vec<i32>,
        /// Keep entries of these work types (project, organization, competition, event)
        #[arg(long = "work", value_delimiter = ',')]
        work: Vec<WorkType>,
        /// Earliest year, inclusive
        #[arg(long)]
        from: Option<i32>,
        /// Latest year, inclusive
        #[arg(long)]
        to: Option<i32>,
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,
        /// Sort order (newest, oldest, title, featured)
        #[arg(long)]
        sort: Option<SortKey>,
        /// Maximum number of entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one entry with its rendered body
    Show {
        /// Content kind (projects, shots)
        kind: ContentKind,
        /// Entry slug
        slug: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show filter values and statistics
    Facets {
        /// Content kind (projects, shots)
        kind: ContentKind,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Create a new document from a template
    New {
        /// Content kind (projects, shots)
        kind: ContentKind,
        /// Slug and file name of the new document
        slug: String,
        /// Title (defaults to the slug in title case)
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Serve the content as a JSON API
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Open browser automatically
        #[arg(long)]
        open: bool,
        /// Do not watch the content directory
        #[arg(long)]
        no_watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::List {
            kind,
            tags,
            categories,
            skills,
            years,
            work,
            from,
            to,
            search,
            sort,
            limit,
            json,
        } => {
            let mut criteria = FilterCriteria::new()
                .with_tags(tags)
                .with_categories(categories)
                .with_skills(skills)
                .with_years(years)
                .with_work_types(work);
            criteria.from_year = from;
            criteria.to_year = to;
            criteria.search = search;

            let query = EntryQuery {
                criteria,
                sort,
                limit,
            };
            folio::cmd::list::run(&cli.config, kind, query, json)?;
        }
        Commands::Show { kind, slug, json } => {
            folio::cmd::show::run(&cli.config, kind, &slug, json)?;
        }
        Commands::Facets { kind, json } => {
            folio::cmd::facets::run(&cli.config, kind, json)?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
        Commands::New { kind, slug, title } => {
            folio::cmd::new::run(&cli.config, kind, &slug, title.as_deref())?;
        }
        Commands::Serve {
            port,
            open,
            no_watch,
        } => {
            folio::cmd::serve::run(&cli.config, port, open, !no_watch).await?;
        }
    }

    Ok(())
}
