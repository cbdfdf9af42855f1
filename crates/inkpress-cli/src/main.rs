use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use dotenvy::dotenv;
use inkpress_cli::seeder::{self, SeedConfig};
use inkpress_cli::token::{KNOWN_ROLES, is_known_role, issue_token};
use inkpress_config::JwtConfig;
use inkpress_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "inkpress-cli")]
#[command(about = "Inkpress CLI - Administrative tools for Inkpress", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign an access token for manual API calls
    IssueToken {
        /// Subject id written into the `sub` claim
        #[arg(short = 's', long)]
        subject: Option<String>,

        /// Role written into the `role` claim (prompted if omitted)
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Lifetime in seconds, overriding JWT_ACCESS_EXPIRY
        #[arg(short = 'e', long)]
        expiry: Option<i64>,
    },
    /// Seed the database with fake categories and posts
    Seed {
        /// Number of posts to create
        #[arg(short = 'p', long, default_value = "100")]
        posts: usize,

        /// Number of categories to create
        #[arg(short = 'c', long, default_value = "8")]
        categories: usize,
    },
    /// Apply pending database migrations
    Migrate,
    /// Delete all posts and categories
    ClearSeed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::IssueToken {
            subject,
            role,
            expiry,
        } => handle_issue_token(subject, role, expiry),
        Commands::Seed { posts, categories } => {
            let pool = connect().await?;
            handle_seed(&pool, posts, categories).await
        }
        Commands::Migrate => {
            let pool = connect().await?;
            run_migrations(&pool)
                .await
                .context("Failed to apply migrations")?;
            println!("✅ Migrations applied");
            Ok(())
        }
        Commands::ClearSeed => {
            let pool = connect().await?;
            seeder::clear_seed(&pool).await?;
            println!("✅ Cleared seeded data");
            Ok(())
        }
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")
}

fn handle_issue_token(
    subject: Option<String>,
    role: Option<String>,
    expiry: Option<i64>,
) -> anyhow::Result<()> {
    let subject = match subject {
        Some(subject) => subject,
        None => Input::<String>::new()
            .with_prompt("Subject id")
            .interact_text()
            .context("Failed to read subject")?,
    };

    let role = match role {
        Some(role) => role,
        None => {
            let selection = Select::new()
                .with_prompt("Role")
                .items(&KNOWN_ROLES)
                .default(0)
                .interact()
                .context("Failed to read role")?;
            KNOWN_ROLES[selection].to_string()
        }
    };

    if subject.trim().is_empty() || role.trim().is_empty() {
        bail!("subject and role must both be non-empty");
    }
    if !is_known_role(&role) {
        eprintln!("⚠️  Role '{}' is not one of {:?}", role, KNOWN_ROLES);
    }

    let jwt_config = JwtConfig::from_env();
    let token = issue_token(&subject, &role, expiry, &jwt_config)?;

    println!("{}", token);
    Ok(())
}

async fn handle_seed(pool: &PgPool, posts: usize, categories: usize) -> anyhow::Result<()> {
    let config = SeedConfig::new(posts).with_categories(categories);
    seeder::seed_all(pool, config).await
}
