//! Initial database migration.
//!
//! Creates enums, tables, indexes, the `updated_at` trigger and the report
//! sequence counter row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(FUNCTIONS_SQL).await?;

        // ============================================================
        // PART 2: TIERS & USERS
        // ============================================================
        db.execute_unprepared(TIERS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: EXPENSES & REPORTS
        // ============================================================
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(REPORTS_SQL).await?;
        db.execute_unprepared(NOTIFICATIONS_SQL).await?;
        db.execute_unprepared(REPORT_SEQUENCES_SQL).await?;

        // ============================================================
        // PART 4: EVENTS
        // ============================================================
        db.execute_unprepared(EVENTS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE user_type AS ENUM ('staff', 'admin');

CREATE TYPE expense_status AS ENUM ('unmapped', 'mapped');

CREATE TYPE report_status AS ENUM (
    'pending',
    'approved',
    'reimbursed',
    'rejected'
);

CREATE TYPE category_status AS ENUM ('enabled', 'disabled');
";

const FUNCTIONS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
";

const TIERS_SQL: &str = r"
CREATE TABLE tiers (
    id              UUID PRIMARY KEY,
    name            VARCHAR(100) NOT NULL UNIQUE,
    -- Ceiling for approved/reimbursed spend over the rolling 30-day window
    total_amount    NUMERIC(19, 4) NOT NULL CHECK (total_amount >= 0),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE tier_categories (
    id              UUID PRIMARY KEY,
    tier_id         UUID NOT NULL REFERENCES tiers(id) ON DELETE CASCADE,
    title           VARCHAR(100) NOT NULL,
    max_amount      NUMERIC(19, 4) NOT NULL CHECK (max_amount >= 0),
    status          category_status NOT NULL DEFAULT 'enabled',
    UNIQUE (tier_id, title)
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id              UUID PRIMARY KEY,
    mobile          VARCHAR(16) NOT NULL UNIQUE,
    full_name       VARCHAR(255) NOT NULL,
    tier_id         UUID REFERENCES tiers(id),
    user_type       user_type NOT NULL DEFAULT 'staff',
    otp             VARCHAR(10),
    mpin_hash       TEXT,
    is_verified     BOOLEAN NOT NULL DEFAULT FALSE,
    is_active       BOOLEAN NOT NULL DEFAULT FALSE,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_users_tier ON users(tier_id);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id              UUID PRIMARY KEY,
    owner_id        UUID NOT NULL REFERENCES users(id),
    title           VARCHAR(200) NOT NULL,
    amount          NUMERIC(19, 4) NOT NULL CHECK (amount > 0),
    category        VARCHAR(100) NOT NULL,
    status          expense_status NOT NULL DEFAULT 'unmapped',
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_expenses_owner_created ON expenses(owner_id, created_at DESC);
";

const REPORTS_SQL: &str = r"
CREATE TABLE reports (
    id              UUID PRIMARY KEY,
    -- Rep#001, Rep#002, ... assigned from report_sequences
    report_code     VARCHAR(20) NOT NULL,
    owner_id        UUID NOT NULL REFERENCES users(id),
    title           VARCHAR(200) NOT NULL,
    report_date     DATE NOT NULL,
    status          report_status NOT NULL DEFAULT 'pending',
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE UNIQUE INDEX uq_reports_report_code ON reports(report_code);
CREATE INDEX idx_reports_owner_status_date ON reports(owner_id, status, report_date);

CREATE TABLE report_expenses (
    report_id       UUID NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
    expense_id      UUID NOT NULL REFERENCES expenses(id),
    position        INTEGER NOT NULL,
    PRIMARY KEY (report_id, expense_id)
);

CREATE INDEX idx_report_expenses_expense ON report_expenses(expense_id);
";

const NOTIFICATIONS_SQL: &str = r"
CREATE TABLE notifications (
    id              UUID PRIMARY KEY,
    report_id       UUID NOT NULL REFERENCES reports(id) ON DELETE CASCADE,
    owner_id        UUID NOT NULL REFERENCES users(id),
    status          report_status NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_notifications_owner_created ON notifications(owner_id, created_at DESC);
";

const REPORT_SEQUENCES_SQL: &str = r"
-- Single-row counter. Report creators lock this row FOR UPDATE.
CREATE TABLE report_sequences (
    id              SMALLINT PRIMARY KEY CHECK (id = 1),
    last_value      BIGINT NOT NULL DEFAULT 0 CHECK (last_value >= 0)
);

INSERT INTO report_sequences (id, last_value) VALUES (1, 0);
";

const EVENTS_SQL: &str = r"
CREATE TABLE events (
    id              UUID PRIMARY KEY,
    event_name      VARCHAR(200) NOT NULL,
    start_date      DATE NOT NULL,
    end_date        DATE NOT NULL,
    start_time      TIME NOT NULL,
    end_time        TIME NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    location        VARCHAR(255) NOT NULL DEFAULT '',
    status          VARCHAR(50) NOT NULL DEFAULT 'upcoming',
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CHECK (end_date >= start_date)
);

CREATE TABLE event_staff (
    event_id        UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
    user_id         UUID NOT NULL REFERENCES users(id),
    PRIMARY KEY (event_id, user_id)
);

CREATE INDEX idx_event_staff_user ON event_staff(user_id);
";

const TRIGGERS_SQL: &str = r"
CREATE TRIGGER trg_tiers_updated_at BEFORE UPDATE ON tiers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_users_updated_at BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_expenses_updated_at BEFORE UPDATE ON expenses
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_reports_updated_at BEFORE UPDATE ON reports
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
-- Order matters due to foreign key constraints
DROP TABLE IF EXISTS event_staff CASCADE;
DROP TABLE IF EXISTS events CASCADE;
DROP TABLE IF EXISTS report_sequences CASCADE;
DROP TABLE IF EXISTS notifications CASCADE;
DROP TABLE IF EXISTS report_expenses CASCADE;
DROP TABLE IF EXISTS reports CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TABLE IF EXISTS tier_categories CASCADE;
DROP TABLE IF EXISTS tiers CASCADE;

DROP FUNCTION IF EXISTS set_updated_at() CASCADE;

DROP TYPE IF EXISTS category_status;
DROP TYPE IF EXISTS report_status;
DROP TYPE IF EXISTS expense_status;
DROP TYPE IF EXISTS user_type;
";
