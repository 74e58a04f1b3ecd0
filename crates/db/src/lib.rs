//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the asset ledger tables
//! - Repository abstractions that commit each engine mutation atomically
//! - Database migrations
//!
//! Every event-posting method follows the same contract: begin a
//! transaction, load the snapshot, run the pure core processor,
//! compare-and-set the asset row on its `version` column, insert the
//! event record and its postings, commit, then record the audit entry.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountEntryRepository, AssetRepository, AuditRepository, DepreciationRepository,
    DisposalRepository, ImprovementRepository, ReceiptRepository, RepoError,
    RevaluationRepository, TransferRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .max_connections(max_connections)
        .min_connections(min_connections);
    Database::connect(options).await
}
