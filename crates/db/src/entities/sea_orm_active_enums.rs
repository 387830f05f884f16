//! `SeaORM` mappings for PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use expensa_core::auth::UserType as CoreUserType;
use expensa_core::expense::ExpenseStatus as CoreExpenseStatus;
use expensa_core::report::ReportStatus as CoreReportStatus;
use expensa_core::tier::CategoryStatus as CoreCategoryStatus;

/// `user_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_type")]
pub enum UserType {
    /// Staff member.
    #[sea_orm(string_value = "staff")]
    Staff,
    /// Administrator.
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// `expense_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_status")]
pub enum ExpenseStatus {
    /// Not in any report.
    #[sea_orm(string_value = "unmapped")]
    Unmapped,
    /// In a report.
    #[sea_orm(string_value = "mapped")]
    Mapped,
}

/// `report_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "report_status")]
pub enum ReportStatus {
    /// Awaiting review.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Paid out.
    #[sea_orm(string_value = "reimbursed")]
    Reimbursed,
    /// Rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// `category_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category_status")]
pub enum CategoryStatus {
    /// Accepts expenses.
    #[sea_orm(string_value = "enabled")]
    Enabled,
    /// Refuses expenses.
    #[sea_orm(string_value = "disabled")]
    Disabled,
}

impl From<UserType> for CoreUserType {
    fn from(value: UserType) -> Self {
        match value {
            UserType::Staff => Self::Staff,
            UserType::Admin => Self::Admin,
        }
    }
}

impl From<CoreUserType> for UserType {
    fn from(value: CoreUserType) -> Self {
        match value {
            CoreUserType::Staff => Self::Staff,
            CoreUserType::Admin => Self::Admin,
        }
    }
}

impl From<ExpenseStatus> for CoreExpenseStatus {
    fn from(value: ExpenseStatus) -> Self {
        match value {
            ExpenseStatus::Unmapped => Self::Unmapped,
            ExpenseStatus::Mapped => Self::Mapped,
        }
    }
}

impl From<ReportStatus> for CoreReportStatus {
    fn from(value: ReportStatus) -> Self {
        match value {
            ReportStatus::Pending => Self::Pending,
            ReportStatus::Approved => Self::Approved,
            ReportStatus::Reimbursed => Self::Reimbursed,
            ReportStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<CoreReportStatus> for ReportStatus {
    fn from(value: CoreReportStatus) -> Self {
        match value {
            CoreReportStatus::Pending => Self::Pending,
            CoreReportStatus::Approved => Self::Approved,
            CoreReportStatus::Reimbursed => Self::Reimbursed,
            CoreReportStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<CategoryStatus> for CoreCategoryStatus {
    fn from(value: CategoryStatus) -> Self {
        match value {
            CategoryStatus::Enabled => Self::Enabled,
            CategoryStatus::Disabled => Self::Disabled,
        }
    }
}
