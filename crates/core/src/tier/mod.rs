//! Spending tiers assigned to users.

use expensa_shared::types::TierId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a tier category accepts expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    /// Expenses in this category are allowed up to the cap.
    #[default]
    Enabled,
    /// Expenses in this category are refused.
    Disabled,
}

/// A per-category cap within a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCategory {
    /// Category title, matched exactly against expense categories.
    pub title: String,
    /// Largest total allowed for this category within one report.
    pub max_amount: Decimal,
    /// Enabled or disabled.
    pub status: CategoryStatus,
}

impl TierCategory {
    /// Returns true if the category is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.status == CategoryStatus::Disabled
    }
}

/// A spending tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Tier ID.
    pub id: TierId,
    /// Display name.
    pub name: String,
    /// Category caps.
    pub categories: Vec<TierCategory>,
    /// Ceiling for active-report spend over the rolling window.
    pub total_amount: Decimal,
}

impl Tier {
    /// Looks up a category by exact title.
    #[must_use]
    pub fn category(&self, title: &str) -> Option<&TierCategory> {
        self.categories.iter().find(|c| c.title == title)
    }
}
