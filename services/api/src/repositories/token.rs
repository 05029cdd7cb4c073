//! Token revocation list backed by the `token_blacklist` table
//!
//! A row's existence means the token identifier is no longer honored.
//! Rows older than the refresh-token lifetime gate nothing (the token has
//! expired on its own), so a scheduled job prunes them.

use anyhow::Result;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::error::ApiResult;

/// Repository over the token revocation list
#[derive(Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    /// Create a new token repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a token identifier as revoked
    pub async fn revoke(&self, jti: &str) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO token_blacklist (jti)
            VALUES ($1)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .execute(&self.pool)
        .await?;

        info!("Revoked token {}", jti);
        Ok(())
    }

    /// Check whether a token identifier has been revoked
    pub async fn is_revoked(&self, jti: &str) -> ApiResult<bool> {
        let revoked: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM token_blacklist WHERE jti = $1)")
                .bind(jti)
                .fetch_one(&self.pool)
                .await?;

        Ok(revoked)
    }

    /// Delete revocation records older than `max_age_seconds`
    pub async fn prune_older_than(&self, max_age_seconds: u64) -> ApiResult<u64> {
        let result = sqlx::query(
            "DELETE FROM token_blacklist WHERE created_at < now() - make_interval(secs => $1)",
        )
        .bind(max_age_seconds as f64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Start the scheduled pruning job
    pub async fn start_pruning(&self, schedule: &str, max_age_seconds: u64) -> Result<()> {
        let repository = self.clone();

        let scheduler = JobScheduler::new().await?;

        let job = Job::new_async(schedule, move |_, _| {
            let repository = repository.clone();
            Box::pin(async move {
                match repository.prune_older_than(max_age_seconds).await {
                    Ok(0) => {}
                    Ok(pruned) => info!("Pruned {} expired revocation records", pruned),
                    Err(e) => error!("Failed to prune revocation records: {}", e),
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!("Started revocation pruning with schedule: {}", schedule);
        Ok(())
    }
}
