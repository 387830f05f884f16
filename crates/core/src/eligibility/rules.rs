//! Pure eligibility rules.
//!
//! Each function checks one stage of the pipeline and returns the first
//! violation it finds.

use std::collections::{HashMap, HashSet};

use expensa_shared::types::{ExpenseId, UserId};
use rust_decimal::Decimal;

use super::error::EligibilityError;
use super::types::{CategoryTotals, CreateReportRequest};
use crate::expense::Expense;
use crate::tier::Tier;

/// Checks request shape and normalizes it.
///
/// Trims the title and drops duplicate expense IDs, keeping first-seen order.
pub fn validate_request(
    request: CreateReportRequest,
) -> Result<CreateReportRequest, EligibilityError> {
    let title = request.title.trim().to_string();
    if title.is_empty() {
        return Err(EligibilityError::BlankTitle);
    }

    let mut seen = HashSet::with_capacity(request.expense_ids.len());
    let expense_ids: Vec<ExpenseId> = request
        .expense_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect();

    if expense_ids.is_empty() {
        return Err(EligibilityError::EmptyBatch);
    }

    Ok(CreateReportRequest {
        title,
        report_date: request.report_date,
        expense_ids,
    })
}

/// Matches loaded expenses to the requested IDs.
///
/// Returns the expenses in request order. An ID with no loaded expense, or
/// whose expense belongs to another user, fails with `ExpenseNotFound`.
pub fn ensure_all_present(
    requested: &[ExpenseId],
    loaded: Vec<Expense>,
    owner: UserId,
) -> Result<Vec<Expense>, EligibilityError> {
    let mut by_id: HashMap<ExpenseId, Expense> = loaded.into_iter().map(|e| (e.id, e)).collect();

    requested
        .iter()
        .map(|id| {
            by_id
                .remove(id)
                .filter(|e| e.owner_id == owner)
                .ok_or(EligibilityError::ExpenseNotFound(*id))
        })
        .collect()
}

/// Refuses the whole batch if any expense is already mapped.
pub fn ensure_unmapped(expenses: &[Expense]) -> Result<(), EligibilityError> {
    match expenses.iter().find(|e| e.is_mapped()) {
        Some(mapped) => Err(EligibilityError::ExpenseAlreadyMapped {
            title: mapped.title.clone(),
        }),
        None => Ok(()),
    }
}

/// Totals the batch per category in one pass.
#[must_use]
pub fn aggregate_by_category(expenses: &[Expense]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(Decimal::ZERO) += expense.amount;
    }
    totals
}

/// Checks category totals against the tier, in category-title order.
///
/// Categories the tier does not define pass with any amount.
pub fn check_category_limits(tier: &Tier, totals: &CategoryTotals) -> Result<(), EligibilityError> {
    for (category, total) in totals {
        let Some(limit) = tier.category(category) else {
            continue;
        };

        if limit.is_disabled() {
            return Err(EligibilityError::CategoryDisabled {
                category: category.clone(),
            });
        }

        if *total > limit.max_amount {
            return Err(EligibilityError::CategoryLimitExceeded {
                category: category.clone(),
            });
        }
    }

    Ok(())
}

/// Checks prior active spend against the tier ceiling.
///
/// Spend equal to the ceiling passes. The candidate batch is not included.
pub fn check_rolling_ceiling(tier: &Tier, active_spend: Decimal) -> Result<(), EligibilityError> {
    if active_spend > tier.total_amount {
        return Err(EligibilityError::RollingLimitExceeded {
            limit: tier.total_amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseStatus;
    use crate::tier::{CategoryStatus, TierCategory};
    use chrono::{NaiveDate, Utc};
    use expensa_shared::types::TierId;
    use rust_decimal_macros::dec;

    fn expense(owner: UserId, title: &str, amount: Decimal, category: &str) -> Expense {
        Expense {
            id: ExpenseId::new(),
            owner_id: owner,
            title: title.to_string(),
            amount,
            category: category.to_string(),
            status: ExpenseStatus::Unmapped,
            created_at: Utc::now(),
        }
    }

    fn tier() -> Tier {
        Tier {
            id: TierId::new(),
            name: "Standard".to_string(),
            categories: vec![
                TierCategory {
                    title: "Travel".to_string(),
                    max_amount: dec!(5000),
                    status: CategoryStatus::Enabled,
                },
                TierCategory {
                    title: "Alcohol".to_string(),
                    max_amount: dec!(1000),
                    status: CategoryStatus::Disabled,
                },
                TierCategory {
                    title: "Food".to_string(),
                    max_amount: dec!(500),
                    status: CategoryStatus::Enabled,
                },
            ],
            total_amount: dec!(10000),
        }
    }

    #[test]
    fn test_validate_request_dedupes_in_order() {
        let (a, b) = (ExpenseId::new(), ExpenseId::new());
        let request = CreateReportRequest {
            title: "  Trip ".to_string(),
            report_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            expense_ids: vec![b, a, b, a],
        };

        let request = validate_request(request).unwrap();
        assert_eq!(request.title, "Trip");
        assert_eq!(request.expense_ids, vec![b, a]);
    }

    #[test]
    fn test_validate_request_rejects_empty() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let empty = CreateReportRequest {
            title: "Trip".to_string(),
            report_date: date,
            expense_ids: vec![],
        };
        assert_eq!(validate_request(empty), Err(EligibilityError::EmptyBatch));

        let untitled = CreateReportRequest {
            title: " ".to_string(),
            report_date: date,
            expense_ids: vec![ExpenseId::new()],
        };
        assert_eq!(validate_request(untitled), Err(EligibilityError::BlankTitle));
    }

    #[test]
    fn test_ensure_all_present_keeps_request_order() {
        let owner = UserId::new();
        let first = expense(owner, "Taxi", dec!(10), "Travel");
        let second = expense(owner, "Lunch", dec!(20), "Food");
        let requested = [second.id, first.id];

        let ordered =
            ensure_all_present(&requested, vec![first.clone(), second.clone()], owner).unwrap();
        assert_eq!(ordered, vec![second, first]);
    }

    #[test]
    fn test_ensure_all_present_rejects_missing_and_foreign() {
        let owner = UserId::new();
        let mine = expense(owner, "Taxi", dec!(10), "Travel");
        let theirs = expense(UserId::new(), "Hotel", dec!(10), "Travel");
        let missing = ExpenseId::new();

        assert_eq!(
            ensure_all_present(&[mine.id, missing], vec![mine.clone()], owner),
            Err(EligibilityError::ExpenseNotFound(missing))
        );
        assert_eq!(
            ensure_all_present(&[mine.id, theirs.id], vec![mine, theirs.clone()], owner),
            Err(EligibilityError::ExpenseNotFound(theirs.id))
        );
    }

    #[test]
    fn test_ensure_unmapped_names_first_mapped_title() {
        let owner = UserId::new();
        let mut taxi = expense(owner, "Taxi", dec!(10), "Travel");
        let mut hotel = expense(owner, "Hotel", dec!(10), "Travel");
        taxi.status = ExpenseStatus::Mapped;
        hotel.status = ExpenseStatus::Mapped;

        assert_eq!(
            ensure_unmapped(&[expense(owner, "Lunch", dec!(5), "Food"), taxi, hotel]),
            Err(EligibilityError::ExpenseAlreadyMapped {
                title: "Taxi".to_string()
            })
        );
    }

    #[test]
    fn test_aggregate_by_category() {
        let owner = UserId::new();
        let totals = aggregate_by_category(&[
            expense(owner, "Taxi", dec!(100.25), "Travel"),
            expense(owner, "Lunch", dec!(40), "Food"),
            expense(owner, "Train", dec!(200.75), "Travel"),
        ]);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Travel"], dec!(301.00));
        assert_eq!(totals["Food"], dec!(40));
    }

    #[test]
    fn test_category_cap_boundary() {
        let at_cap = CategoryTotals::from([("Travel".to_string(), dec!(5000))]);
        assert!(check_category_limits(&tier(), &at_cap).is_ok());

        let over = CategoryTotals::from([("Travel".to_string(), dec!(5000.01))]);
        assert_eq!(
            check_category_limits(&tier(), &over),
            Err(EligibilityError::CategoryLimitExceeded {
                category: "Travel".to_string()
            })
        );
    }

    #[test]
    fn test_disabled_category_rejected_at_any_amount() {
        let totals = CategoryTotals::from([("Alcohol".to_string(), dec!(1))]);
        assert_eq!(
            check_category_limits(&tier(), &totals),
            Err(EligibilityError::CategoryDisabled {
                category: "Alcohol".to_string()
            })
        );
    }

    #[test]
    fn test_undefined_category_passes() {
        let totals = CategoryTotals::from([("Stationery".to_string(), dec!(1_000_000))]);
        assert!(check_category_limits(&tier(), &totals).is_ok());
    }

    #[test]
    fn test_first_failing_category_is_alphabetical() {
        let totals = CategoryTotals::from([
            ("Travel".to_string(), dec!(9000)),
            ("Food".to_string(), dec!(900)),
        ]);
        assert_eq!(
            check_category_limits(&tier(), &totals),
            Err(EligibilityError::CategoryLimitExceeded {
                category: "Food".to_string()
            })
        );
    }

    #[test]
    fn test_rolling_ceiling_is_strict() {
        assert!(check_rolling_ceiling(&tier(), dec!(10000)).is_ok());
        assert_eq!(
            check_rolling_ceiling(&tier(), dec!(10001)),
            Err(EligibilityError::RollingLimitExceeded { limit: dec!(10000) })
        );
    }
}
