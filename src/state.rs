use anyhow::Context;
use sqlx::PgPool;
use userhub_auth::SessionCodec;
use userhub_config::{CorsConfig, DatabaseConfig, SessionConfig, ValidationConfig};
use userhub_core::ValidationRules;
use userhub_core::validation::ValidationRuleError;
use userhub_db::{init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub session: SessionCodec,
    pub validation_rules: ValidationRules,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        db: PgPool,
        session_config: &SessionConfig,
        validation_config: &ValidationConfig,
        cors_config: CorsConfig,
    ) -> Result<Self, ValidationRuleError> {
        Ok(Self {
            db,
            session: SessionCodec::new(session_config),
            validation_rules: ValidationRules::new(
                &validation_config.email_domain_pattern,
                &validation_config.email_pattern_name,
            )?,
            cors_config,
        })
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let session_config = SessionConfig::from_env().context("SESSION_SECRET must be set")?;

    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;

    if database_config.run_migrations {
        run_migrations(&db)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = AppState::new(
        db,
        &session_config,
        &ValidationConfig::from_env(),
        CorsConfig::from_env(),
    )
    .context("Invalid EMAIL_DOMAIN_PATTERN")?;

    Ok(state)
}
