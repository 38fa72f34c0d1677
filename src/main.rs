use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info, warn};

mod config;
mod db;
mod error;
mod logging;
mod model;
mod routes;

use config::Config;
use db::seed::{SeedPlan, DEFAULT_ASSOCIATIONS, DEFAULT_CONTACTS, DEFAULT_USERS};

#[derive(Parser, Debug)]
#[command(name = "contact-book", version, about = "Personal contact book backed by PostgreSQL")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Drop and recreate the database, then fill it with fake data
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
struct SeedArgs {
    #[arg(long, default_value_t = DEFAULT_USERS)]
    users: usize,

    #[arg(long, default_value_t = DEFAULT_CONTACTS)]
    contacts: usize,

    /// Random association draws; duplicates are skipped
    #[arg(long, default_value_t = DEFAULT_ASSOCIATIONS)]
    associations: usize,

    /// Fixed RNG seed for reproducible data
    #[arg(long)]
    rng_seed: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    logging::init_logger();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Seed(args) => seed(config, args).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    let pool = db::pool::connect(&config.database)
        .await
        .context("Failed to connect to Postgres")?;

    let app = routes::app(pool);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn seed(config: Config, args: SeedArgs) -> Result<()> {
    let plan = SeedPlan {
        users: args.users,
        contacts: args.contacts,
        associations: args.associations,
    };
    let seed = args.rng_seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    warn!(database = %config.database.name, rng_seed = seed, "Recreating database from scratch");
    let report = db::schema::bootstrap(&config.database, &plan, &mut rng)
        .await
        .context("Seeding aborted; rerun to start again from the drop")?;

    info!(
        users = report.users,
        contacts = report.contacts,
        associations = report.associations,
        duplicates_skipped = report.duplicates_skipped,
        "Database seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_defaults_match_plan_defaults() {
        let cli = Cli::try_parse_from(["contact-book", "seed"]).unwrap();
        let Some(Command::Seed(args)) = cli.command else {
            panic!("expected seed subcommand");
        };

        assert_eq!(args.users, SeedPlan::default().users);
        assert_eq!(args.contacts, SeedPlan::default().contacts);
        assert_eq!(args.associations, SeedPlan::default().associations);
        assert_eq!(args.rng_seed, None);
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["contact-book"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn seed_counts_are_overridable() {
        let cli = Cli::try_parse_from([
            "contact-book",
            "seed",
            "--users",
            "3",
            "--associations",
            "0",
            "--rng-seed",
            "9",
        ])
        .unwrap();
        let Some(Command::Seed(args)) = cli.command else {
            panic!("expected seed subcommand");
        };

        assert_eq!(args.users, 3);
        assert_eq!(args.contacts, DEFAULT_CONTACTS);
        assert_eq!(args.associations, 0);
        assert_eq!(args.rng_seed, Some(9));
    }
}
