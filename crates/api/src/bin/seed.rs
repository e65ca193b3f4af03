//! Operator tool: create the initial admin account, or hash a password.
//!
//! ```text
//! assetdesk-seed                     create the admin from SEED_ADMIN_* (idempotent)
//! assetdesk-seed hash-password PASS  print an Argon2id hash for PASS
//! ```
//!
//! | Env Var               | Default              |
//! |-----------------------|----------------------|
//! | `DATABASE_URL`        | **required**         |
//! | `SEED_ADMIN_EMAIL`    | `admin@example.com`  |
//! | `SEED_ADMIN_PASSWORD` | **required**         |
//! | `SEED_ADMIN_NAME`     | `Administrator`      |

use anyhow::{bail, Context};
use assetdesk_api::auth::password::hash_password;
use assetdesk_core::roles::Role;
use assetdesk_db::models::user::{NewUser, MIN_PASSWORD_LENGTH};
use assetdesk_db::repositories::UserRepo;
use assetdesk_db::store::UserStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assetdesk_seed=info,assetdesk_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => seed_admin().await,
        [cmd, password] if cmd == "hash-password" => {
            let hash = hash_password(password)
                .map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;
            println!("{hash}");
            Ok(())
        }
        _ => bail!("usage: assetdesk-seed [hash-password <password>]"),
    }
}

async fn seed_admin() -> anyhow::Result<()> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let email =
        std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let name = std::env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").context("SEED_ADMIN_PASSWORD must be set")?;
    if (password.len() as u64) < MIN_PASSWORD_LENGTH {
        bail!("SEED_ADMIN_PASSWORD must be at least 8 characters");
    }

    let pool = assetdesk_db::create_pool(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    assetdesk_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let users = UserRepo::new(pool.clone());
    if let Some(existing) = users.find_by_email(&email).await? {
        tracing::info!(user_id = %existing.id, %email, "Admin already exists, nothing to do");
        return Ok(());
    }

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;
    let admin = users
        .create(&NewUser {
            name,
            email,
            password_hash,
            role: Role::Admin,
        })
        .await
        .context("Failed to create admin user")?;
    tracing::info!(user_id = %admin.id, email = %admin.email, "Admin user created");

    pool.close().await;
    Ok(())
}
