//! Database migrations.

use sea_orm_migration::prelude::*;

mod m20260807_000001_initial;

/// The migration runner for the asset ledger schema.
pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260807_000001_initial::Migration)]
    }
}
