//! Server state shared by every handler

use chrono_tz::Tz;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::core::Config;
use crate::db::DbService;
use crate::registers::RegisterManager;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub registers: RegisterManager,
}

impl ServerState {
    /// Open the database, run migrations and wire the services
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    pub fn with_db(config: Config, db: DbService) -> Self {
        let registers = RegisterManager::new(
            db.pool.clone(),
            Duration::from_secs(config.cache_ttl_secs),
        );
        Self {
            config,
            db,
            registers,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn tz(&self) -> Tz {
        self.config.business_timezone
    }
}
