//! Fake user seeding for development databases.

use std::time::{Duration, Instant};

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use sqlx::PgPool;
use userhub_core::password::hash_password_with_cost;

pub const DEFAULT_SEED_PASSWORD: &str = "password1234";
pub const DEFAULT_SEED_DOMAIN: &str = "wolox.com.ar";
/// bcrypt cost for the shared fixture hash.
pub const SEED_HASH_COST: u32 = 6;

// 4 params per user
const BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub count: usize,
    pub password: String,
    pub domain: String,
}

impl SeedConfig {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            password: DEFAULT_SEED_PASSWORD.to_string(),
            domain: DEFAULT_SEED_DOMAIN.to_string(),
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SeedReport {
    pub requested: usize,
    pub inserted: usize,
    pub elapsed: Duration,
}

/// Generates `count` standard users with unique addresses on `domain`.
pub fn generate_users(count: usize, domain: &str) -> Vec<UserSeed> {
    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email = format!(
                "{}.{}{}@{}",
                email_part(&first_name),
                email_part(&last_name),
                idx,
                domain
            );

            UserSeed {
                first_name,
                last_name,
                email,
            }
        })
        .collect()
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

/// Inserts fake users sharing one bcrypt hash. E-mails that already exist
/// are skipped, so `inserted` can be lower than `requested`.
pub async fn seed_users(db: &PgPool, config: &SeedConfig) -> anyhow::Result<SeedReport> {
    let start_time = Instant::now();

    let password_hash = hash_password_with_cost(&config.password, SEED_HASH_COST)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;
    let users = generate_users(config.count, &config.domain);

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in users.chunks(BATCH_SIZE) {
        let mut query =
            String::from("INSERT INTO users (first_name, last_name, email, password) VALUES ");

        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let param_idx = i * 4;
            query.push_str(&format!(
                "(${}, ${}, ${}, ${})",
                param_idx + 1,
                param_idx + 2,
                param_idx + 3,
                param_idx + 4
            ));
        }
        query.push_str(" ON CONFLICT (email) DO NOTHING");

        let mut q = sqlx::query(&query);
        for user in chunk {
            q = q
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.email)
                .bind(&password_hash);
        }

        inserted += q.execute(&mut *tx).await?.rows_affected() as usize;
    }

    tx.commit().await?;

    Ok(SeedReport {
        requested: config.count,
        inserted,
        elapsed: start_time.elapsed(),
    })
}
