//! Initial database migration.
//!
//! Creates the enums, tables, constraints, and indexes for the asset
//! ledger, and seeds the statutory asset-group reference data.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: REFERENCE DATA
        // ============================================================
        db.execute_unprepared(ASSET_GROUPS_SQL).await?;

        // ============================================================
        // PART 3: ASSETS
        // ============================================================
        db.execute_unprepared(ASSETS_SQL).await?;

        // ============================================================
        // PART 4: EVENT HISTORY
        // ============================================================
        db.execute_unprepared(ASSET_RECEIPTS_SQL).await?;
        db.execute_unprepared(ASSET_DISPOSALS_SQL).await?;
        db.execute_unprepared(ASSET_REVALUATIONS_SQL).await?;
        db.execute_unprepared(ASSET_IMPROVEMENTS_SQL).await?;
        db.execute_unprepared(ASSET_TRANSFERS_SQL).await?;

        // ============================================================
        // PART 5: DEPRECIATION & LEDGER
        // ============================================================
        db.execute_unprepared(DEPRECIATION_RECORDS_SQL).await?;
        db.execute_unprepared(ACCOUNT_ENTRIES_SQL).await?;

        // ============================================================
        // PART 6: AUDIT
        // ============================================================
        db.execute_unprepared(AUDIT_LOG_SQL).await?;

        // ============================================================
        // PART 7: SEED STATUTORY ASSET GROUPS
        // ============================================================
        db.execute_unprepared(SEED_GROUPS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE asset_status AS ENUM ('active', 'conserved', 'disposed');
CREATE TYPE depreciation_method AS ENUM (
    'straight_line', 'reducing_balance', 'accelerated_reducing',
    'cumulative', 'production'
);
CREATE TYPE receipt_kind AS ENUM (
    'purchase', 'free_receipt', 'contribution', 'exchange',
    'self_constructed', 'other'
);
CREATE TYPE disposal_kind AS ENUM (
    'sale', 'liquidation', 'free_transfer', 'shortage', 'other'
);
CREATE TYPE improvement_kind AS ENUM (
    'capital_repair', 'current_repair', 'modernization', 'reconstruction'
);
CREATE TYPE revaluation_kind AS ENUM ('upward', 'downward');
CREATE TYPE entry_kind AS ENUM (
    'receipt', 'depreciation', 'disposal', 'revaluation', 'improvement',
    'transfer'
);
CREATE TYPE audit_action AS ENUM (
    'create', 'update', 'receipt', 'disposal', 'depreciation',
    'revaluation', 'improvement', 'transfer', 'status_change'
);
";

const ASSET_GROUPS_SQL: &str = r"
CREATE TABLE asset_groups (
    id UUID PRIMARY KEY,
    code VARCHAR(10) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    min_useful_life_months INTEGER,
    account_number VARCHAR(10) NOT NULL,
    depreciation_account VARCHAR(10) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const ASSETS_SQL: &str = r"
CREATE TABLE assets (
    id UUID PRIMARY KEY,
    inventory_number VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(500) NOT NULL,
    group_id UUID NOT NULL REFERENCES asset_groups(id),
    status asset_status NOT NULL DEFAULT 'active',
    initial_cost NUMERIC(15, 2) NOT NULL CHECK (initial_cost >= 0.01),
    residual_value NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (residual_value >= 0),
    incoming_depreciation NUMERIC(15, 2) NOT NULL DEFAULT 0 CHECK (incoming_depreciation >= 0),
    accumulated_depreciation NUMERIC(15, 2) NOT NULL DEFAULT 0,
    current_book_value NUMERIC(15, 2) NOT NULL DEFAULT 0,
    depreciation_method depreciation_method NOT NULL DEFAULT 'straight_line',
    useful_life_months INTEGER NOT NULL CHECK (useful_life_months > 0),
    depreciation_rate NUMERIC(8, 4),
    total_production_capacity NUMERIC(15, 2),
    units_produced_to_date NUMERIC(15, 2) NOT NULL DEFAULT 0,
    commissioning_date DATE NOT NULL,
    depreciation_start_date DATE NOT NULL,
    disposal_date DATE,
    location VARCHAR(500),
    custodian VARCHAR(255),
    version BIGINT NOT NULL DEFAULT 1,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT assets_residual_within_cost CHECK (residual_value <= initial_cost),
    CONSTRAINT assets_depreciation_after_commissioning
        CHECK (depreciation_start_date >= commissioning_date)
);

CREATE INDEX idx_assets_status ON assets(status);
CREATE INDEX idx_assets_group ON assets(group_id);
";

const ASSET_RECEIPTS_SQL: &str = r"
CREATE TABLE asset_receipts (
    id UUID PRIMARY KEY,
    asset_id UUID NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    receipt_kind receipt_kind NOT NULL DEFAULT 'purchase',
    document_number VARCHAR(100) NOT NULL,
    document_date DATE NOT NULL,
    supplier VARCHAR(500),
    amount NUMERIC(15, 2) NOT NULL CHECK (amount >= 0.01),
    notes TEXT,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_asset_receipts_asset ON asset_receipts(asset_id);
";

const ASSET_DISPOSALS_SQL: &str = r"
CREATE TABLE asset_disposals (
    id UUID PRIMARY KEY,
    asset_id UUID NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    disposal_kind disposal_kind NOT NULL,
    document_number VARCHAR(100) NOT NULL,
    document_date DATE NOT NULL,
    reason TEXT NOT NULL,
    sale_amount NUMERIC(15, 2) NOT NULL DEFAULT 0,
    book_value_at_disposal NUMERIC(15, 2) NOT NULL,
    accumulated_depreciation_at_disposal NUMERIC(15, 2) NOT NULL,
    gain_loss NUMERIC(15, 2) NOT NULL DEFAULT 0,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_asset_disposals_asset ON asset_disposals(asset_id);
";

const ASSET_REVALUATIONS_SQL: &str = r"
CREATE TABLE asset_revaluations (
    id UUID PRIMARY KEY,
    asset_id UUID NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    revaluation_kind revaluation_kind NOT NULL,
    document_number VARCHAR(100) NOT NULL,
    document_date DATE NOT NULL,
    fair_value NUMERIC(15, 2) NOT NULL CHECK (fair_value >= 0.01),
    old_initial_cost NUMERIC(15, 2) NOT NULL,
    old_depreciation NUMERIC(15, 2) NOT NULL,
    old_book_value NUMERIC(15, 2) NOT NULL,
    new_initial_cost NUMERIC(15, 2) NOT NULL,
    new_depreciation NUMERIC(15, 2) NOT NULL,
    new_book_value NUMERIC(15, 2) NOT NULL,
    revaluation_amount NUMERIC(15, 2) NOT NULL,
    notes TEXT,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_asset_revaluations_asset ON asset_revaluations(asset_id);
";

const ASSET_IMPROVEMENTS_SQL: &str = r"
CREATE TABLE asset_improvements (
    id UUID PRIMARY KEY,
    asset_id UUID NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    improvement_kind improvement_kind NOT NULL,
    document_number VARCHAR(100) NOT NULL,
    document_date DATE NOT NULL,
    description TEXT NOT NULL,
    amount NUMERIC(15, 2) NOT NULL CHECK (amount >= 0.01),
    contractor VARCHAR(500),
    increases_value BOOLEAN NOT NULL DEFAULT FALSE,
    expense_account VARCHAR(10) NOT NULL DEFAULT '91',
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_asset_improvements_asset ON asset_improvements(asset_id);
";

const ASSET_TRANSFERS_SQL: &str = r"
CREATE TABLE asset_transfers (
    id UUID PRIMARY KEY,
    asset_id UUID NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    document_number VARCHAR(100) NOT NULL,
    document_date DATE NOT NULL,
    from_location VARCHAR(500),
    to_location VARCHAR(500),
    from_custodian VARCHAR(255),
    to_custodian VARCHAR(255),
    book_value NUMERIC(15, 2) NOT NULL,
    reason TEXT,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_asset_transfers_asset ON asset_transfers(asset_id);
";

const DEPRECIATION_RECORDS_SQL: &str = r"
CREATE TABLE depreciation_records (
    id UUID PRIMARY KEY,
    asset_id UUID NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    period_year INTEGER NOT NULL,
    period_month INTEGER NOT NULL CHECK (period_month BETWEEN 1 AND 12),
    depreciation_method depreciation_method NOT NULL,
    amount NUMERIC(15, 2) NOT NULL,
    book_value_before NUMERIC(15, 2) NOT NULL,
    book_value_after NUMERIC(15, 2) NOT NULL,
    production_volume NUMERIC(15, 2),
    is_posted BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT depreciation_records_one_per_period
        UNIQUE (asset_id, period_year, period_month)
);

CREATE INDEX idx_depreciation_records_period
    ON depreciation_records(period_year, period_month);
";

const ACCOUNT_ENTRIES_SQL: &str = r"
CREATE TABLE account_entries (
    id BIGSERIAL PRIMARY KEY,
    entry_kind entry_kind NOT NULL,
    date DATE NOT NULL,
    debit_account VARCHAR(10) NOT NULL,
    credit_account VARCHAR(10) NOT NULL,
    amount NUMERIC(15, 2) NOT NULL CHECK (amount >= 0.01),
    description TEXT NOT NULL,
    asset_id UUID REFERENCES assets(id) ON DELETE CASCADE,
    document_number VARCHAR(100),
    document_date DATE,
    is_posted BOOLEAN NOT NULL DEFAULT TRUE,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_account_entries_date ON account_entries(date);
CREATE INDEX idx_account_entries_asset ON account_entries(asset_id);
CREATE INDEX idx_account_entries_kind ON account_entries(entry_kind);
";

const AUDIT_LOG_SQL: &str = r"
CREATE TABLE audit_log (
    id BIGSERIAL PRIMARY KEY,
    actor UUID NOT NULL,
    action audit_action NOT NULL,
    entity_type VARCHAR(100) NOT NULL,
    entity_id UUID NOT NULL,
    entity_repr VARCHAR(500) NOT NULL,
    changes JSONB NOT NULL DEFAULT '{}',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_audit_log_entity ON audit_log(entity_type, entity_id);
CREATE INDEX idx_audit_log_created ON audit_log(created_at);
";

// Statutory groups per the tax code classification; account 10x/13x pairs
// drive the posting generator.
const SEED_GROUPS_SQL: &str = r"
INSERT INTO asset_groups (id, code, name, min_useful_life_months, account_number, depreciation_account) VALUES
    (gen_random_uuid(), '1',  'Land plots', NULL, '101', '131'),
    (gen_random_uuid(), '2',  'Capital land improvements', 180, '102', '131'),
    (gen_random_uuid(), '3',  'Buildings', 240, '103', '131'),
    (gen_random_uuid(), '4',  'Machinery and equipment', 60, '104', '131'),
    (gen_random_uuid(), '5',  'Vehicles', 60, '105', '131'),
    (gen_random_uuid(), '6',  'Tools, fixtures, furniture', 48, '106', '131'),
    (gen_random_uuid(), '7',  'Animals', 72, '107', '131'),
    (gen_random_uuid(), '8',  'Perennial plantings', 120, '108', '131'),
    (gen_random_uuid(), '9',  'Other fixed assets', 144, '109', '131'),
    (gen_random_uuid(), '10', 'Library collections', NULL, '111', '132'),
    (gen_random_uuid(), '11', 'Low-value non-current assets', NULL, '112', '132'),
    (gen_random_uuid(), '12', 'Temporary structures', 60, '113', '132'),
    (gen_random_uuid(), '13', 'Natural resources', NULL, '114', '132'),
    (gen_random_uuid(), '14', 'Returnable containers', 72, '115', '132'),
    (gen_random_uuid(), '15', 'Rental items', 60, '116', '132'),
    (gen_random_uuid(), '16', 'Long-term biological assets', 84, '161', '134')
ON CONFLICT (code) DO NOTHING;
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS audit_log;
DROP TABLE IF EXISTS account_entries;
DROP TABLE IF EXISTS depreciation_records;
DROP TABLE IF EXISTS asset_transfers;
DROP TABLE IF EXISTS asset_improvements;
DROP TABLE IF EXISTS asset_revaluations;
DROP TABLE IF EXISTS asset_disposals;
DROP TABLE IF EXISTS asset_receipts;
DROP TABLE IF EXISTS assets;
DROP TABLE IF EXISTS asset_groups;
DROP TYPE IF EXISTS audit_action;
DROP TYPE IF EXISTS entry_kind;
DROP TYPE IF EXISTS revaluation_kind;
DROP TYPE IF EXISTS improvement_kind;
DROP TYPE IF EXISTS disposal_kind;
DROP TYPE IF EXISTS receipt_kind;
DROP TYPE IF EXISTS depreciation_method;
DROP TYPE IF EXISTS asset_status;
";
