use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use userhub_cli::admin::create_admin;
use userhub_cli::seeder::{self, DEFAULT_SEED_DOMAIN, DEFAULT_SEED_PASSWORD, SeedConfig};
use userhub_config::{DatabaseConfig, ValidationConfig, load_dotenv};
use userhub_core::ValidationRules;
use userhub_db::{PgPool, init_db_pool, revert_migrations, run_migrations};

#[derive(Parser)]
#[command(name = "userhub-cli")]
#[command(about = "userhub CLI - Administrative tools for userhub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake standard users
    Seed {
        /// Number of users to create
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,

        /// Password shared by every seeded user
        #[arg(short = 'p', long, default_value = DEFAULT_SEED_PASSWORD)]
        password: String,

        /// E-mail domain of the seeded users
        #[arg(short = 'd', long, default_value = DEFAULT_SEED_DOMAIN)]
        domain: String,
    },
    /// Apply pending database migrations
    Migrate {
        /// Revert down to this version instead (0 reverts everything)
        #[arg(long)]
        revert_to: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    load_dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let database_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&pool, first_name, last_name, email, password).await,
        Commands::Seed {
            count,
            password,
            domain,
        } => handle_seed(&pool, count, password, domain).await,
        Commands::Migrate { revert_to: None } => {
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            println!("✅ Migrations applied");
            Ok(())
        }
        Commands::Migrate {
            revert_to: Some(target),
        } => {
            revert_migrations(&pool, target)
                .await
                .context("Failed to revert migrations")?;
            println!("✅ Migrations reverted to {target}");
            Ok(())
        }
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let validation = ValidationConfig::from_env();
    let rules = ValidationRules::new(
        &validation.email_domain_pattern,
        &validation.email_pattern_name,
    )
    .context("Invalid EMAIL_DOMAIN_PATTERN")?;

    let first_name = prompt_or(first_name, "First name")?;
    let last_name = prompt_or(last_name, "Last name")?;
    let email = prompt_or(email, "Email address")?;
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let admin = create_admin(pool, &rules, &first_name, &last_name, &email, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", admin.email);
    println!("   Name: {} {}", admin.first_name, admin.last_name);
    Ok(())
}

async fn handle_seed(pool: &PgPool, count: usize, password: String, domain: String) -> Result<()> {
    println!("👥 Seeding {count} users on @{domain}...");

    let config = SeedConfig::new(count)
        .with_password(password)
        .with_domain(domain);
    let report = seeder::seed_users(pool, &config).await?;

    println!(
        "   ✓ Inserted {} of {} users in {:?}",
        report.inserted, report.requested, report.elapsed
    );
    Ok(())
}
