//! Blog post seeder.
//!
//! Fills the configured database with generated posts.
//!
//! Usage:
//! ```bash
//! # Insert 10 random posts
//! cargo run --bin seed-posts
//!
//! # Wipe the table first, then insert 50 reproducible posts
//! cargo run --bin seed-posts -- --reset --count 50 --seed 7
//! ```

use anyhow::{Context, Result};
use clap::Parser;

use quill_api::AppConfig;
use quill_core::ports::PostRepository;
use quill_infra::database::{DatabaseConfig, DatabaseConnections, PostgresPostRepository};
use quill_infra::fixtures::{PostGenerator, seed_posts};

#[derive(Parser)]
#[command(name = "seed-posts", about = "Populate the Quill database with generated blog posts")]
struct SeedArgs {
    /// Number of posts to insert
    #[arg(long, default_value = "10")]
    count: usize,

    /// Seed for reproducible output (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Delete every existing post before seeding
    #[arg(long)]
    reset: bool,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = SeedArgs::parse();

    let db_config = match args.database_url {
        Some(url) => DatabaseConfig::new(url),
        None => AppConfig::from_env()
            .database
            .context("DATABASE_URL must be set (or pass --database-url)")?,
    };

    let connections = DatabaseConnections::init(&db_config)
        .await
        .context("Failed to connect to database")?;
    let repo = PostgresPostRepository::new(connections.main);

    if args.reset {
        let removed = repo.purge().await?;
        tracing::info!(removed, "Reset blog_posts");
    }

    let mut generator = match args.seed {
        Some(seed) => PostGenerator::seeded(seed),
        None => PostGenerator::from_entropy(),
    };

    let posts = seed_posts(&repo, &mut generator, args.count).await?;
    let total = repo.count().await?;

    tracing::info!(inserted = posts.len(), total, "Seeding complete");
    Ok(())
}
