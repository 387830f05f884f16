//! The report eligibility engine.

use chrono::NaiveDate;
use expensa_shared::types::UserId;
use tracing::{debug, error, info, warn};

use super::error::{EligibilityError, ErrorKind};
use super::ledger::ReportLedger;
use super::rules;
use super::types::{CreateReportRequest, CreatedReport, NewReport, RollingWindow};
use crate::report::ReportCode;

/// Runs the eligibility pipeline against a [`ReportLedger`].
pub struct ReportEligibilityEngine<'a, L: ReportLedger + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: ReportLedger + ?Sized> ReportEligibilityEngine<'a, L> {
    /// Creates an engine over `ledger`.
    pub const fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Evaluates `request` for `acting_user` and, if eligible, creates the report.
    ///
    /// `today` anchors the rolling window. Checks run in order and the first
    /// failure is returned; nothing is persisted unless every check passes.
    ///
    /// # Errors
    ///
    /// Returns the [`EligibilityError`] for the first failing rule.
    pub async fn evaluate_and_create(
        &self,
        request: CreateReportRequest,
        acting_user: UserId,
        today: NaiveDate,
    ) -> Result<CreatedReport, EligibilityError> {
        let result = self.run(request, acting_user, today).await;

        match &result {
            Ok(created) => info!(
                user_id = %acting_user,
                report_id = %created.report.id,
                report_code = %created.report.code,
                expense_count = created.report.expense_ids.len(),
                "Report created"
            ),
            Err(e) if e.kind() == ErrorKind::Internal => {
                error!(user_id = %acting_user, error = %e, "Report creation failed");
            }
            Err(e) => warn!(user_id = %acting_user, reason = %e, "Report creation rejected"),
        }

        result
    }

    async fn run(
        &self,
        request: CreateReportRequest,
        acting_user: UserId,
        today: NaiveDate,
    ) -> Result<CreatedReport, EligibilityError> {
        let request = rules::validate_request(request)?;

        let sequence = self.ledger.next_report_sequence().await?;
        let code = ReportCode::from_sequence(sequence);
        debug!(report_code = %code, "Reserved report sequence");

        let loaded = self.ledger.load_expenses(&request.expense_ids).await?;
        let expenses = rules::ensure_all_present(&request.expense_ids, loaded, acting_user)?;
        rules::ensure_unmapped(&expenses)?;

        let totals = rules::aggregate_by_category(&expenses);

        let tier = self.ledger.load_tier(acting_user).await?;
        rules::check_category_limits(&tier, &totals)?;

        if let Some(conflict) = self
            .ledger
            .find_active_report_containing(&request.expense_ids)
            .await?
        {
            debug!(report_id = %conflict.id, "Candidate expense found in active report");
            return Err(EligibilityError::ExpensesInActiveReport {
                report_title: conflict.title,
            });
        }

        let window = RollingWindow::ending(today);
        let active_spend = self.ledger.active_spend_between(window).await?;
        rules::check_rolling_ceiling(&tier, active_spend)?;

        let created = self
            .ledger
            .commit_report(NewReport {
                sequence,
                code,
                owner_id: acting_user,
                title: request.title,
                report_date: request.report_date,
                expense_ids: request.expense_ids,
            })
            .await?;

        Ok(created)
    }
}
