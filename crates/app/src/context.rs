//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    config::{DatabaseConfig, RendererConfig},
    database::{self, Db},
    domain::{
        documents::{ExportService, HttpDocumentRenderer, RendererError},
        products::{ProductsService, SqlProductsService},
        quotes::{QuotesService, SqlQuotesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database: {0}")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations: {0}")]
    Migration(#[source] MigrateError),

    #[error("failed to build document renderer: {0}")]
    Renderer(#[source] RendererError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub quotes: Arc<dyn QuotesService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from database settings, bringing the
    /// schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migration)?;

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(SqlProductsService::new(db.clone())),
            quotes: Arc::new(SqlQuotesService::new(db)),
        })
    }

    /// Export service reading quotes from this context.
    ///
    /// # Errors
    ///
    /// Returns an error when the renderer client cannot be built.
    pub fn exports(&self, config: &RendererConfig) -> Result<ExportService, AppInitError> {
        let renderer = HttpDocumentRenderer::new(config.renderer_url.clone(), config.timeout())
            .map_err(AppInitError::Renderer)?
            .with_margins(config.margins());

        Ok(ExportService::new(
            Arc::clone(&self.quotes),
            Arc::new(renderer),
        ))
    }
}
