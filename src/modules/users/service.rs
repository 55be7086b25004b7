use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};
use userhub_auth::SessionCodec;
use userhub_core::{AppError, PaginationParams, hash_password, verify_password};
use userhub_models::{CreateUserDto, PaginatedUsersResponse, User};

/// Outcome of [`UserService::ensure_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ensured {
    Created(User),
    Existing(User),
}

pub struct UserService;

impl UserService {
    /// Registers a standard user. A duplicate e-mail is a 409.
    ///
    /// Uniqueness is left to the `users_email_key` constraint so two
    /// concurrent registrations cannot both succeed.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, password, is_admin)
             VALUES ($1, $2, $3, $4, FALSE)
             RETURNING id, first_name, last_name, email, is_admin, created_at, updated_at",
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(anyhow!("E-mail '{}' already registered", dto.email))
            }
            other => AppError::database(other),
        })?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Creates the user unless the e-mail is already taken, in which case the
    /// existing user is returned untouched.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn ensure_user(db: &PgPool, dto: CreateUserDto) -> Result<Ensured, AppError> {
        if let Some(existing) = Self::find_by_email(db, &dto.email).await? {
            return Ok(Ensured::Existing(existing));
        }

        let hashed_password = hash_password(&dto.password)?;

        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, password, is_admin)
             VALUES ($1, $2, $3, $4, FALSE)
             ON CONFLICT (email) DO NOTHING
             RETURNING id, first_name, last_name, email, is_admin, created_at, updated_at",
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        match inserted {
            Some(user) => {
                info!(user_id = %user.id, "User created by admin");
                Ok(Ensured::Created(user))
            }
            // Lost a race with a concurrent insert of the same e-mail.
            None => Self::find_by_email(db, &dto.email)
                .await?
                .map(Ensured::Existing)
                .ok_or_else(|| AppError::internal(anyhow!("User {} vanished", dto.email))),
        }
    }

    /// Checks credentials and mints a session token for the user's e-mail.
    #[instrument(skip(db, password, codec))]
    pub async fn authenticate(
        db: &PgPool,
        email: &str,
        password: &str,
        codec: &SessionCodec,
    ) -> Result<String, AppError> {
        #[derive(sqlx::FromRow)]
        struct Credentials {
            email: String,
            password: String,
        }

        let credentials =
            sqlx::query_as::<_, Credentials>("SELECT email, password FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?
                .ok_or_else(|| AppError::bad_request(anyhow!("Cannot find user {}!", email)))?;

        if !verify_password(password, &credentials.password)? {
            return Err(AppError::bad_request(anyhow!(
                "Email or password are incorrect!"
            )));
        }

        let token = codec.encode(&credentials.email).map_err(AppError::internal)?;

        info!("Session issued");
        Ok(token)
    }

    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, is_admin, created_at, updated_at
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_users(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await
            .map_err(AppError::database)?;

        let users = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email, is_admin, created_at, updated_at
             FROM users
             ORDER BY created_at, id
             LIMIT $1 OFFSET $2",
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(PaginatedUsersResponse::new(users, params, total))
    }
}
