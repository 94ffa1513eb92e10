use crate::config::AppConfig;
use crate::errors::ServiceError;
use metrics::{counter, gauge, histogram};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use sea_orm_migration::MigratorTrait;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Configuration for database connection
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Idle timeout duration
    pub idle_timeout: Duration,
    /// Acquire connection timeout
    pub acquire_timeout: Duration,
    /// Postgres search_path for cross-schema table names
    pub search_path: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            acquire_timeout: Duration::from_secs(8),
            search_path: None,
        }
    }
}

impl From<&AppConfig> for DbConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            url: cfg.database_url.clone(),
            max_connections: cfg.db_max_connections,
            min_connections: cfg.db_min_connections,
            connect_timeout: Duration::from_secs(cfg.db_connect_timeout_secs),
            idle_timeout: Duration::from_secs(cfg.db_idle_timeout_secs),
            acquire_timeout: Duration::from_secs(cfg.db_acquire_timeout_secs),
            search_path: cfg.search_path(),
        }
    }
}

/// Establishes a connection pool to the database with custom configuration
///
/// # Errors
/// Returns a `ServiceError` if the connection cannot be established
pub async fn establish_connection_with_config(config: &DbConfig) -> Result<DbPool, ServiceError> {
    debug!(
        max_connections = config.max_connections,
        search_path = ?config.search_path,
        "Configuring database connection"
    );

    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(true);

    if let Some(path) = &config.search_path {
        opt.set_schema_search_path(path.clone());
    }

    gauge!("transporter_db.max_connections", config.max_connections as f64);

    info!(
        "Connecting to database with max_connections={}",
        config.max_connections
    );

    let db_pool = Database::connect(opt).await.map_err(|e| {
        error!("Database connection establishment failed: {}", e);
        counter!("transporter_db.connection_failures", 1);
        ServiceError::DatabaseError(e)
    })?;

    info!("Database connection pool established successfully");
    Ok(db_pool)
}

/// Establish DB pool using AppConfig tuning
pub async fn establish_connection_from_app_config(cfg: &AppConfig) -> Result<DbPool, ServiceError> {
    let db_cfg: DbConfig = cfg.into();
    establish_connection_with_config(&db_cfg).await
}

/// Runs database migrations
///
/// # Errors
/// Returns a `ServiceError` if migrations fail to execute
pub async fn run_migrations(pool: &DbPool) -> Result<(), ServiceError> {
    info!("Running database migrations");
    let start = Instant::now();

    let result = crate::migrator::Migrator::up(pool, None)
        .await
        .map_err(ServiceError::DatabaseError);

    let elapsed = start.elapsed();
    match &result {
        Ok(_) => info!(
            "Database migrations completed successfully in {:?}",
            elapsed
        ),
        Err(e) => error!("Database migrations failed after {:?}: {}", elapsed, e),
    }

    result
}

/// Checks if the database connection is active
pub async fn check_connection(pool: &DbPool) -> Result<(), ServiceError> {
    let start = Instant::now();
    let result = pool.ping().await.map_err(ServiceError::DatabaseError);

    let elapsed = start.elapsed();
    match &result {
        Ok(_) => {
            debug!("Database connection check successful in {:?}", elapsed);
            gauge!(
                "transporter_db.connection_latency",
                elapsed.as_millis() as f64
            );
        }
        Err(e) => {
            error!(
                "Database connection check failed after {:?}: {}",
                elapsed, e
            );
            counter!("transporter_db.connection_failures", 1);
        }
    }

    result
}

/// Opens a transaction and records it in the transaction metrics
pub async fn begin(pool: &DbPool, operation: &'static str) -> Result<Tx, ServiceError> {
    let txn = pool.begin().await.map_err(|e| {
        error!(operation, "Failed to begin transaction: {}", e);
        ServiceError::DatabaseError(e)
    })?;
    counter!("transporter_db.transaction.started", 1, "operation" => operation);
    Ok(Tx {
        txn,
        guard: RollbackGuard {
            operation,
            armed: true,
        },
        started: Instant::now(),
    })
}

/// A database transaction tagged with the operation it belongs to.
///
/// Dropping it without calling [`Tx::commit`] rolls the work back.
pub struct Tx {
    txn: DatabaseTransaction,
    guard: RollbackGuard,
    started: Instant,
}

/// Counts a rollback for transactions dropped before commit
struct RollbackGuard {
    operation: &'static str,
    armed: bool,
}

impl RollbackGuard {
    fn disarm(&mut self) -> &'static str {
        self.armed = false;
        self.operation
    }
}

impl Drop for RollbackGuard {
    fn drop(&mut self) {
        if self.armed {
            counter!("transporter_db.transaction.rolled_back", 1, "operation" => self.operation);
            debug!(operation = self.operation, "Transaction dropped without commit");
        }
    }
}

impl Tx {
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> Result<(), ServiceError> {
        let Tx {
            txn,
            mut guard,
            started,
        } = self;
        // a failed commit is counted below
        let operation = guard.disarm();
        let result = txn.commit().await;
        let elapsed = started.elapsed();
        histogram!("transporter_db.transaction.duration", elapsed, "operation" => operation);

        match result {
            Ok(()) => {
                counter!("transporter_db.transaction.committed", 1, "operation" => operation);
                debug!(operation, "Transaction committed in {:?}", elapsed);
                Ok(())
            }
            Err(e) => {
                counter!("transporter_db.transaction.rolled_back", 1, "operation" => operation);
                warn!(operation, "Transaction commit failed after {:?}: {}", elapsed, e);
                Err(ServiceError::DatabaseError(e))
            }
        }
    }
}
