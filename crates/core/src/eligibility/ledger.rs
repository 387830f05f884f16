//! Storage port consulted by the eligibility engine.

use async_trait::async_trait;
use expensa_shared::types::{ExpenseId, UserId};
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{ConflictingReport, CreatedReport, NewReport, RollingWindow};
use crate::expense::Expense;
use crate::tier::Tier;

/// Everything the engine reads and writes during one report creation.
///
/// Implementations scope all calls to a single unit of work: the sequence
/// reserved by `next_report_sequence` must stay reserved until
/// `commit_report` succeeds, and must be released if the unit is abandoned.
#[async_trait]
pub trait ReportLedger: Send + Sync {
    /// Reserves the next report sequence number (count of reports plus one).
    async fn next_report_sequence(&self) -> Result<u64, LedgerError>;

    /// Loads the expenses with the given IDs. Unknown IDs are skipped.
    async fn load_expenses(&self, ids: &[ExpenseId]) -> Result<Vec<Expense>, LedgerError>;

    /// Loads the tier assigned to `user`.
    async fn load_tier(&self, user: UserId) -> Result<Tier, LedgerError>;

    /// Finds an approved or reimbursed report referencing any of `ids`.
    async fn find_active_report_containing(
        &self,
        ids: &[ExpenseId],
    ) -> Result<Option<ConflictingReport>, LedgerError>;

    /// Sums expense amounts across all approved and reimbursed reports whose
    /// report date falls within `window`, whoever owns them.
    async fn active_spend_between(&self, window: RollingWindow) -> Result<Decimal, LedgerError>;

    /// Maps the expenses, persists the report and raises its notification as one unit.
    ///
    /// Only expenses still unmapped may be mapped. If any candidate was
    /// mapped in the meantime the unit fails with
    /// [`LedgerError::ConcurrentModification`] and nothing is persisted.
    async fn commit_report(&self, report: NewReport) -> Result<CreatedReport, LedgerError>;
}
