use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use mesa_catalog::{Catalog, CatalogConfig, CatalogSnapshot, ListingParams};

#[derive(Parser)]
#[command(name = "mesa-catalog")]
#[command(about = "Browse a culinary catalog snapshot", version)]
struct Cli {
    /// JSON snapshot to load before running the command
    #[arg(long, short)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes
    Recipes {
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<String>,
    },

    /// List articles
    Articles {
        /// Article type, or "all"
        #[arg(long = "type")]
        article_type: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<String>,
    },

    /// Search recipes and articles
    Search { query: String },

    /// Show a region with its latest content
    Region { slug: String },

    /// Show one recipe
    Recipe { slug: String },

    /// Print the sitemap XML
    Sitemap,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = CatalogConfig::load()?;
    let catalog = Catalog::builder().config(config).build().await?;

    if let Some(path) = &cli.snapshot {
        let summary = CatalogSnapshot::read(path).await?.load_into(&catalog).await?;
        debug!("Snapshot {} loaded: {:?}", path.display(), summary);
    }

    match cli.command {
        Commands::Recipes {
            region,
            category,
            difficulty,
            search,
            page,
        } => {
            let params = ListingParams {
                region,
                category,
                difficulty,
                search,
                page,
                ..Default::default()
            };
            print_json(&catalog.list_recipes(&params).await?)?;
        }
        Commands::Articles {
            article_type,
            search,
            page,
        } => {
            let params = ListingParams {
                article_type,
                search,
                page,
                ..Default::default()
            };
            print_json(&catalog.list_articles(&params).await?)?;
        }
        Commands::Search { query } => print_json(&catalog.search(&query).await?)?,
        Commands::Region { slug } => print_json(&catalog.region_overview(&slug).await?)?,
        Commands::Recipe { slug } => print_json(&catalog.recipe_detail(&slug).await?)?,
        Commands::Sitemap => print!("{}", catalog.render_sitemap().await?),
    }

    Ok(())
}
