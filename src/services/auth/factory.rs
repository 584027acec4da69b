/// Factory: build the `AccessGate` and its collaborators from application `Config`.
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::error::AppError;
use crate::repos::PgUserStore;
use crate::services::auth::{AccessGate, AllowList, JwtVerifier};

pub fn build_verifier(config: &Config) -> Result<Arc<JwtVerifier>, AppError> {
    let verifier = JwtVerifier::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )
    .map_err(|e| {
        tracing::error!(error = %e, "failed to build access token verifier");
        AppError::Internal
    })?;

    Ok(Arc::new(verifier))
}

pub async fn build_access_gate(config: &Config) -> Result<Arc<AccessGate>, AppError> {
    let verifier = build_verifier(config)?;

    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to connect to user database");
            AppError::Internal
        })?;

    let allow_list = AllowList::new(config.auth_allow_list.iter().cloned());
    tracing::info!(entries = allow_list.len(), "auth allow-list loaded");

    Ok(Arc::new(AccessGate::new(
        allow_list,
        verifier,
        Arc::new(PgUserStore::new(db)),
    )))
}
