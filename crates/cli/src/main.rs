//! FitKart CLI - Offline storefront for fitness products.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! fitkart catalog list --category protein --sort price-low
//! fitkart catalog show p1
//!
//! # Shop
//! fitkart cart add p1
//! fitkart login -e riya@gmail.com
//! fitkart checkout
//! fitkart orders
//!
//! # Manage the catalog (admin emails only)
//! fitkart login -e admin@fitkart.in
//! fitkart admin add -n "Creatine" -c protein -p 799 -o 999 -b FitLabs
//! ```
//!
//! # Commands
//!
//! - `catalog` - Browse, search and inspect products
//! - `cart` - Manage the shopping cart
//! - `login` / `logout` / `whoami` - Session
//! - `checkout` / `orders` - Place and review orders
//! - `admin` - Add, update and delete catalog products
//!
//! # Environment Variables
//!
//! - `FITKART_DATA_DIR` - Directory holding the store records (default `.fitkart`)
//! - `FITKART_STORAGE_LAYOUT` - `split` or `snapshot`
//! - `FITKART_CATALOG_FILE` - YAML catalog used when the store is first created
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Error tracking
//! - `RUST_LOG` - Log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fitkart_core::{Category, ProductId};
use fitkart_storefront::catalog::{CatalogQuery, FEATURED_LIMIT, NewProduct, SortBy};
use fitkart_storefront::{StorageLayout, Store, StorefrontConfig};
use rust_decimal::Decimal;

mod commands;
mod telemetry;

use commands::CommandError;
use commands::admin::ProductChanges;

#[derive(Parser)]
#[command(name = "fitkart")]
#[command(author, version, about = "FitKart storefront")]
struct Cli {
    /// Directory holding the store records (overrides `FITKART_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Record layout, `split` or `snapshot` (overrides `FITKART_STORAGE_LAYOUT`)
    #[arg(long, global = true)]
    layout: Option<StorageLayout>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in with an email address
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Sign out (the cart is kept)
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Place an order for the cart
    Checkout,
    /// List past orders
    Orders,
    /// Manage catalog products (admin only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only this category (e.g. protein, pre-workout)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only this brand
        #[arg(short, long)]
        brand: Option<String>,

        /// Sort order (`popular`, `price-low`, `price-high`)
        #[arg(short, long, default_value = "popular")]
        sort: SortBy,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// Search by name, brand or category
    Search {
        /// Search term
        term: String,
    },
    /// Show featured products
    Featured {
        /// Maximum number of products
        #[arg(short, long, default_value_t = FEATURED_LIMIT)]
        limit: usize,
    },
    /// List the brands in a category
    Brands {
        /// Category
        category: Category,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and bill
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },
    /// Change a product's quantity by a signed amount
    Qty {
        /// Product id
        id: String,

        /// Amount to add (negative to reduce)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add a product
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Category
        #[arg(short, long)]
        category: Category,

        /// Selling price
        #[arg(short, long)]
        price: Decimal,

        /// List price (defaults to the selling price)
        #[arg(short, long)]
        original_price: Option<Decimal>,

        /// Brand
        #[arg(short, long)]
        brand: String,

        /// Image URL
        #[arg(short, long, default_value = "")]
        image: String,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Update fields of a product
    Update {
        /// Product id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        price: Option<Decimal>,

        #[arg(long)]
        original_price: Option<Decimal>,

        #[arg(long)]
        brand: Option<String>,

        #[arg(long)]
        image: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Mark as in stock
        #[arg(long, conflicts_with = "out_of_stock")]
        in_stock: bool,

        /// Mark as out of stock
        #[arg(long)]
        out_of_stock: bool,

        /// Feature on the home page
        #[arg(long, conflicts_with = "unfeatured")]
        featured: bool,

        /// Remove from the home page
        #[arg(long)]
        unfeatured: bool,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

/// `Some(true)` / `Some(false)` for an on/off flag pair, `None` if neither was given.
const fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match StorefrontConfig::from_env() {
        Ok(mut config) => {
            if let Some(dir) = cli.data_dir.clone() {
                config.data_dir = dir;
            }
            if let Some(layout) = cli.layout {
                config.layout = layout;
            }
            config
        }
        Err(e) => {
            telemetry::init_tracing();
            tracing::error!("Command failed: {}", CommandError::from(e));
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &StorefrontConfig) -> Result<(), CommandError> {
    let mut store = Store::open_with_config(config)?;
    if let Some(user) = store.user() {
        telemetry::set_sentry_user(user);
    }

    match command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                brand,
                sort,
            } => commands::catalog::list(
                &store,
                &CatalogQuery {
                    category,
                    brand,
                    sort,
                },
            ),
            CatalogAction::Show { id } => commands::catalog::show(&store, &ProductId::new(id))?,
            CatalogAction::Search { term } => commands::catalog::search(&store, &term),
            CatalogAction::Featured { limit } => commands::catalog::featured(&store, limit),
            CatalogAction::Brands { category } => commands::catalog::brands(&store, category),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&store),
            CartAction::Add { id } => commands::cart::add(&mut store, &ProductId::new(id))?,
            CartAction::Remove { id } => commands::cart::remove(&mut store, &ProductId::new(id)),
            CartAction::Qty { id, delta } => {
                commands::cart::change_quantity(&mut store, &ProductId::new(id), delta);
            }
            CartAction::Clear => commands::cart::clear(&mut store),
        },
        Commands::Login { email } => {
            let user = commands::account::login(&mut store, &email)?;
            telemetry::set_sentry_user(&user);
        }
        Commands::Logout => {
            commands::account::logout(&mut store);
            telemetry::clear_sentry_user();
        }
        Commands::Whoami => commands::account::whoami(&store),
        Commands::Checkout => {
            commands::orders::checkout(&mut store)?;
        }
        Commands::Orders => commands::orders::list(&store)?,
        Commands::Admin { action } => match action {
            AdminAction::Add {
                name,
                category,
                price,
                original_price,
                brand,
                image,
                description,
            } => {
                let draft = NewProduct {
                    name,
                    category,
                    price,
                    original_price: original_price.unwrap_or(price),
                    image,
                    description,
                    brand,
                };
                commands::admin::add(&mut store, draft)?;
            }
            AdminAction::Update {
                id,
                name,
                category,
                price,
                original_price,
                brand,
                image,
                description,
                in_stock,
                out_of_stock,
                featured,
                unfeatured,
            } => {
                let changes = ProductChanges {
                    name,
                    category,
                    price,
                    original_price,
                    image,
                    description,
                    brand,
                    in_stock: flag_pair(in_stock, out_of_stock),
                    featured: flag_pair(featured, unfeatured),
                };
                commands::admin::update(&mut store, &ProductId::new(id), changes)?;
            }
            AdminAction::Delete { id } => commands::admin::delete(&mut store, &ProductId::new(id))?,
        },
    }

    // Every mutation already persisted; a final flush surfaces write failures
    store.flush()?;
    Ok(())
}
