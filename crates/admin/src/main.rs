//! Marketplace admin - category assignment CLI
//!
//! Command-line front end over the category assignment use case.

use std::sync::Arc;

use admin::shared::api::ApiClient;
use admin::shared::config;
use admin::system;
use admin::usecases::u001_category_assignment::{
    CategoryAssignmentExecutor, CategoryError, HttpCategoryGateway,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::common::{AggregateId, EntityRef, EntitySummary};
use contracts::usecases::u001_category_assignment::{AssignmentSnapshot, CategoryEvent};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "marketplace-admin")]
#[command(about = "Manage marketplace categories of businesses and services")]
struct Cli {
    /// Admin API base URL (overrides config.toml)
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Category catalog operations
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Categories of a business
    Business {
        /// Business ID
        id: String,

        #[command(subcommand)]
        action: EntityAction,
    },

    /// Categories of a service
    Service {
        /// Service ID
        id: String,

        #[command(subcommand)]
        action: EntityAction,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogAction {
    /// List all categories
    List,

    /// Create a category
    Create {
        /// Category name
        name: String,
    },

    /// Delete a category
    Delete {
        /// Category ID
        id: String,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
enum EntityAction {
    /// Show assigned, available and recommended categories
    Show,

    /// Assign a category from the catalog
    Add {
        /// Category ID
        category_id: String,
    },

    /// Remove an assigned category
    Remove {
        /// Category ID
        category_id: String,
    },

    /// Show recommended categories
    Recommend,

    /// Assign a recommended category
    Accept {
        /// Category ID
        category_id: String,
    },

    /// Show category name suggestions
    Suggest {
        /// Text to build suggestions from (defaults to the description)
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Create a category from a suggestion and assign it
    Create {
        /// Category name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = config::load_config().context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config::apply_api_url(&mut config, url);
    }
    system::tracing::initialize(&config.logging)?;
    tracing::debug!("Using admin API at {}", config.api.base_url);

    let api = ApiClient::from_config(&config.api)?;
    let gateway = Arc::new(HttpCategoryGateway::new(api));

    match cli.command {
        Commands::Catalog { action } => run_catalog(&gateway, action, cli.json).await,
        Commands::Business { id, action } => {
            let entity = EntityRef::Business(parse_id(&id)?);
            run_entity(gateway, entity, action, cli.json).await
        }
        Commands::Service { id, action } => {
            let entity = EntityRef::Service(parse_id(&id)?);
            run_entity(gateway, entity, action, cli.json).await
        }
    }
}

fn parse_id<T: AggregateId>(raw: &str) -> Result<T> {
    T::from_string(raw).map_err(anyhow::Error::msg)
}

async fn run_catalog(gateway: &HttpCategoryGateway, action: CatalogAction, json: bool) -> Result<()> {
    let client = gateway.categories();
    match action {
        CatalogAction::List => {
            let categories = client.fetch_all().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                print_categories("Categories", &categories);
            }
        }
        CatalogAction::Create { name } => {
            let category = client.create(&name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&category)?);
            } else {
                println!("Created category {} ({})", category.name, category.id);
            }
        }
        CatalogAction::Delete { id } => {
            let id: CategoryId = parse_id(&id)?;
            client.delete(&id).await?;
            if !json {
                println!("Deleted category {}", id);
            }
        }
    }
    Ok(())
}

async fn run_entity(
    gateway: Arc<HttpCategoryGateway>,
    entity: EntityRef,
    action: EntityAction,
    json: bool,
) -> Result<()> {
    let (executor, mut events, summary) = CategoryAssignmentExecutor::open(entity, gateway)
        .await
        .context("Failed to open category editor")?;

    let outcome = apply_action(&executor, &summary, action).await;

    let snapshot = executor.snapshot();
    executor.shutdown();
    let events = drain(&mut events);

    if json {
        let output = serde_json::json!({
            "name": summary.name,
            "description": summary.description,
            "snapshot": snapshot,
            "events": events,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for event in &events {
            if let CategoryEvent::Failed { message, .. } = event {
                eprintln!("error: {}", message);
            }
        }
        print_snapshot(&summary, &snapshot);
    }

    outcome.map_err(anyhow::Error::from)
}

async fn apply_action(
    executor: &CategoryAssignmentExecutor<HttpCategoryGateway>,
    summary: &EntitySummary,
    action: EntityAction,
) -> Result<(), CategoryError> {
    match action {
        EntityAction::Show => Ok(()),
        EntityAction::Add { category_id } => {
            let category = find(&executor.available(), &category_id)?;
            executor.add_category(category).await
        }
        EntityAction::Remove { category_id } => {
            executor
                .remove_category(&CategoryId::new(category_id.trim()))
                .await
        }
        EntityAction::Recommend => executor.toggle_recommendations().await.map(|_| ()),
        EntityAction::Accept { category_id } => {
            executor.toggle_recommendations().await?;
            let category = find(&executor.recommended(), &category_id)?;
            executor.accept_recommendation(category).await
        }
        EntityAction::Suggest { query } => {
            let query = query
                .or_else(|| summary.description.clone())
                .unwrap_or_default();
            executor.toggle_suggestions(&query).await.map(|_| ())
        }
        EntityAction::Create { name } => executor
            .create_and_assign_from_suggestion(&name)
            .await
            .map(|_| ()),
    }
}

fn find(categories: &[Category], id: &str) -> Result<Category, CategoryError> {
    let id = id.trim();
    categories
        .iter()
        .find(|c| c.id.value() == id)
        .cloned()
        .ok_or_else(|| CategoryError::Validation(format!("category {} is not offered", id)))
}

fn drain(events: &mut mpsc::UnboundedReceiver<CategoryEvent>) -> Vec<CategoryEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

fn print_categories(title: &str, categories: &[Category]) {
    println!("{} ({}):", title, categories.len());
    for category in categories {
        println!("  {:>8}  {}", category.id, category.name);
    }
}

fn print_snapshot(summary: &EntitySummary, snapshot: &AssignmentSnapshot) {
    println!("{}: {}", snapshot.entity, summary.name);
    if let Some(description) = &summary.description {
        println!("  {}", description);
    }
    println!();
    print_categories("Assigned", &snapshot.current);

    match &snapshot.catalog_error {
        Some(error) => println!("Available: {}", error),
        None => print_categories("Available", &snapshot.available),
    }

    if snapshot.recommendations.is_shown() {
        if snapshot.recommended.is_empty() {
            println!("No recommended categories");
        } else {
            print_categories("Recommended", &snapshot.recommended);
        }
    } else if let Some(error) = &snapshot.recommendations_error {
        println!("Recommended: {}", error);
    }

    if snapshot.suggestions.is_shown() {
        if snapshot.suggestion_names.is_empty() {
            println!("No suggestions");
        } else {
            println!("Suggestions ({}):", snapshot.suggestion_names.len());
            for name in &snapshot.suggestion_names {
                println!("  {}", name);
            }
        }
    }
}
