//! Report-creation eligibility.
//!
//! Decides whether a batch of expenses may be consolidated into a new report
//! and, if so, commits the report through a [`ReportLedger`]. The checks run
//! in a fixed order and stop at the first failure:
//!
//! 1. reserve the next report sequence
//! 2. load the candidate expenses and refuse any already mapped
//! 3. total the batch per category
//! 4. check each category against the user's tier
//! 5. refuse expenses already referenced by an active report
//! 6. check active spend over the rolling window against the tier ceiling
//! 7. commit report, mapping and notification atomically

pub mod engine;
pub mod error;
pub mod ledger;
pub mod rules;
pub mod types;

#[cfg(test)]
mod memory;
#[cfg(test)]
mod rules_props;

pub use engine::ReportEligibilityEngine;
pub use error::{EligibilityError, ErrorKind, LedgerError};
pub use ledger::ReportLedger;
pub use types::{
    CategoryTotals, ConflictingReport, CreateReportRequest, CreatedReport, NewReport,
    ROLLING_WINDOW_DAYS, RollingWindow,
};
