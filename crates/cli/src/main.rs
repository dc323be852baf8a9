//! Stockroom CLI - inventory console and account management tools.
//!
//! # Usage
//!
//! ```bash
//! # Register an account (gets the default "user" role)
//! stockroom register --username alice --password secret
//!
//! # List the catalog
//! stockroom products list --username alice --password secret
//!
//! # Add a product
//! stockroom products add --name "Samsung TV" --barcode 106001000001 \
//!     --price 300 --quantity 8 --status "In Stock" --category Electronics \
//!     --username alice --password secret
//!
//! # Seed the built-in roles, then create the first administrative account
//! stockroom seed
//! stockroom users create --role admin --username boss --password secret
//! ```
//!
//! Credentials fall back to `STOCKROOM_USERNAME` / `STOCKROOM_PASSWORD` when
//! the flags are omitted.
//!
//! # Commands
//!
//! - `login` - Verify credentials and show the account's role
//! - `register` - Create an account with the default role
//! - `products` - List, add, update, delete, and search products
//! - `categories` - Manage category names
//! - `users` - Account management
//! - `roles` - Manage the role set
//! - `seed` - Insert the built-in roles and optional fixture data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use stockroom_server::models::NewProduct;

mod commands;

use commands::Credentials;
use commands::products::UpdateArgs;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Stockroom inventory management CLI")]
struct Cli {
    /// Account username (falls back to STOCKROOM_USERNAME)
    #[arg(long, global = true)]
    username: Option<String>,

    /// Account password (falls back to STOCKROOM_PASSWORD)
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the credentials and show the account's role
    Login,
    /// Create an account with the default "user" role
    Register,
    /// Inspect and change the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List and manage category names
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage the role set (requires an administrative role)
    Roles {
        #[command(subcommand)]
        action: RoleAction,
    },
    /// Insert the built-in roles and optional fixture data
    Seed {
        /// YAML file with extra roles, categories, and products to load
        #[arg(short, long)]
        file: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List every product in the catalog
    List,
    /// Show one product matched by name or barcode
    Get {
        /// Product name or barcode
        keyword: String,
    },
    /// Add a new product
    Add {
        /// Product name
        #[arg(long)]
        name: String,

        /// 12-digit barcode
        #[arg(long)]
        barcode: String,

        /// Price in whole currency units
        #[arg(long)]
        price: i32,

        /// Units on hand
        #[arg(long)]
        quantity: i32,

        /// Stock status (e.g. "In Stock", "Out of Stock", "Low on Stock")
        #[arg(long)]
        status: String,

        /// Category name
        #[arg(long)]
        category: String,
    },
    /// Change fields on a product matched by name or barcode
    Update {
        /// Product name or barcode
        keyword: String,

        /// New product name
        #[arg(long)]
        name: Option<String>,

        /// New 12-digit barcode
        #[arg(long)]
        barcode: Option<String>,

        /// New price; zero leaves the stored value unchanged
        #[arg(long)]
        price: Option<i32>,

        /// New quantity; zero leaves the stored value unchanged
        #[arg(long)]
        quantity: Option<i32>,

        /// New stock status
        #[arg(long)]
        status: Option<String>,

        /// New category name
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a product matched by name or barcode
    Delete {
        /// Product name or barcode
        keyword: String,
    },
    /// Search by name, status, or category substring, or exact barcode
    Search {
        /// Search term
        term: String,
    },
    /// List products whose status matches exactly
    ByStatus {
        /// Status to filter on
        status: String,
    },
    /// Show the status and quantity for one product
    Status {
        /// Product name or barcode
        keyword: String,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List every category name
    List,
    /// Add a category (requires an administrative role)
    Add {
        /// Category name
        name: String,
    },
    /// Rename a category (requires an administrative role)
    Rename {
        /// Current category name
        name: String,

        /// Replacement name
        new_name: String,
    },
    /// Delete a category (requires an administrative role)
    Delete {
        /// Category name
        name: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List every account with its role (requires an administrative role)
    List,
    /// Create an account with an explicit role (operator bootstrap)
    Create {
        /// Role name for the new account
        #[arg(short, long, default_value = "user")]
        role: String,
    },
    /// Delete the account named in the credentials
    Delete,
}

#[derive(Subcommand)]
enum RoleAction {
    /// List every role name
    List,
    /// Add a role
    Add {
        /// Role name
        name: String,
    },
    /// Delete a role
    Delete {
        /// Role name
        name: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let credentials = Credentials {
        username: cli.username,
        password: cli.password,
    };

    match cli.command {
        Commands::Login => commands::users::login(&credentials).await?,
        Commands::Register => commands::users::register(&credentials).await?,
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&credentials).await?,
            ProductAction::Get { keyword } => {
                commands::products::get(&credentials, &keyword).await?;
            }
            ProductAction::Add {
                name,
                barcode,
                price,
                quantity,
                status,
                category,
            } => {
                let input = NewProduct {
                    name,
                    barcode,
                    price,
                    quantity,
                    status,
                    category,
                };
                commands::products::add(&credentials, input).await?;
            }
            ProductAction::Update {
                keyword,
                name,
                barcode,
                price,
                quantity,
                status,
                category,
            } => {
                let args = UpdateArgs {
                    name,
                    barcode,
                    price,
                    quantity,
                    status,
                    category,
                };
                commands::products::update(&credentials, &keyword, args).await?;
            }
            ProductAction::Delete { keyword } => {
                commands::products::delete(&credentials, &keyword).await?;
            }
            ProductAction::Search { term } => {
                commands::products::search(&credentials, &term).await?;
            }
            ProductAction::ByStatus { status } => {
                commands::products::by_status(&credentials, &status).await?;
            }
            ProductAction::Status { keyword } => {
                commands::products::status(&credentials, &keyword).await?;
            }
        },
        Commands::Categories { action } => match action {
            CategoryAction::List => commands::categories::list(&credentials).await?,
            CategoryAction::Add { name } => {
                commands::categories::add(&credentials, &name).await?;
            }
            CategoryAction::Rename { name, new_name } => {
                commands::categories::rename(&credentials, &name, &new_name).await?;
            }
            CategoryAction::Delete { name } => {
                commands::categories::delete(&credentials, &name).await?;
            }
        },
        Commands::Users { action } => match action {
            UserAction::List => commands::users::list(&credentials).await?,
            UserAction::Create { role } => {
                commands::users::create(&credentials, &role).await?;
            }
            UserAction::Delete => commands::users::delete(&credentials).await?,
        },
        Commands::Roles { action } => match action {
            RoleAction::List => commands::roles::list(&credentials).await?,
            RoleAction::Add { name } => commands::roles::add(&credentials, &name).await?,
            RoleAction::Delete { name } => {
                commands::roles::delete(&credentials, &name).await?;
            }
        },
        Commands::Seed { file } => commands::seed::run(file.as_deref()).await?,
    }
    Ok(())
}
