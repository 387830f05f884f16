//! Property-based tests for the eligibility rules.

use chrono::Utc;
use expensa_shared::types::{ExpenseId, TierId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::EligibilityError;
use super::rules;
use super::types::CategoryTotals;
use crate::expense::{Expense, ExpenseStatus};
use crate::tier::{CategoryStatus, Tier, TierCategory};

/// Strategy for amounts with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Travel".to_string()),
        Just("Food".to_string()),
        Just("Lodging".to_string()),
        Just("Misc".to_string()),
    ]
}

fn arb_expenses() -> impl Strategy<Value = Vec<Expense>> {
    prop::collection::vec((arb_amount(), arb_category()), 1..20).prop_map(|items| {
        let owner = UserId::new();
        items
            .into_iter()
            .map(|(amount, category)| Expense {
                id: ExpenseId::new(),
                owner_id: owner,
                title: format!("{category} expense"),
                amount,
                category,
                status: ExpenseStatus::Unmapped,
                created_at: Utc::now(),
            })
            .collect()
    })
}

fn tier_with(category: &str, max_amount: Decimal, total_amount: Decimal) -> Tier {
    Tier {
        id: TierId::new(),
        name: "Generated".to_string(),
        categories: vec![TierCategory {
            title: category.to_string(),
            max_amount,
            status: CategoryStatus::Enabled,
        }],
        total_amount,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Aggregation preserves the batch total and creates one key per category.
    #[test]
    fn prop_aggregation_preserves_total(expenses in arb_expenses()) {
        let totals = rules::aggregate_by_category(&expenses);

        let batch_total: Decimal = expenses.iter().map(|e| e.amount).sum();
        let aggregated: Decimal = totals.values().copied().sum();
        prop_assert_eq!(batch_total, aggregated);

        for expense in &expenses {
            prop_assert!(totals.contains_key(&expense.category));
        }
        let distinct: std::collections::HashSet<_> = expenses.iter().map(|e| &e.category).collect();
        prop_assert_eq!(totals.len(), distinct.len());
    }

    /// A category passes iff its total is at most the cap.
    #[test]
    fn prop_category_cap_threshold(total in arb_amount(), cap in arb_amount()) {
        let tier = tier_with("Travel", cap, Decimal::MAX);
        let totals = CategoryTotals::from([("Travel".to_string(), total)]);

        let result = rules::check_category_limits(&tier, &totals);
        if total > cap {
            prop_assert_eq!(
                result,
                Err(EligibilityError::CategoryLimitExceeded { category: "Travel".to_string() })
            );
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Categories missing from the tier never fail.
    #[test]
    fn prop_undefined_category_always_passes(total in arb_amount()) {
        let tier = tier_with("Travel", Decimal::ZERO, Decimal::ZERO);
        let totals = CategoryTotals::from([("Stationery".to_string(), total)]);
        prop_assert!(rules::check_category_limits(&tier, &totals).is_ok());
    }

    /// The rolling ceiling rejects only spend strictly above it.
    #[test]
    fn prop_rolling_ceiling_is_strict(spend in arb_amount(), ceiling in arb_amount()) {
        let tier = tier_with("Travel", Decimal::MAX, ceiling);
        let result = rules::check_rolling_ceiling(&tier, spend);
        prop_assert_eq!(result.is_err(), spend > ceiling);
        prop_assert!(rules::check_rolling_ceiling(&tier, ceiling).is_ok());
    }
}
