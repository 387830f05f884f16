//! Integration tests for transactional report creation.
//!
//! Runs against the database at `DATABASE_URL` with migrations applied.

mod common;

use common::{
    ROLLING_SPEND, connect, expense, review_report, rolling_spend, roomy_ceiling, sequence_of,
    today, user_with_tier,
};
use expensa_core::eligibility::{CreateReportRequest, EligibilityError, ErrorKind};
use expensa_core::expense::ExpenseStatus;
use expensa_core::report::ReportStatus as CoreReportStatus;
use expensa_db::entities::{
    expenses, notifications,
    sea_orm_active_enums::{ExpenseStatus as DbExpenseStatus, ReportStatus},
};
use expensa_db::{ExpenseRepository, ReportRepository};
use expensa_shared::types::{ExpenseId, UserId};
use futures::future::join_all;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
};

fn request(title: &str, ids: Vec<ExpenseId>) -> CreateReportRequest {
    CreateReportRequest {
        title: title.to_string(),
        report_date: today(),
        expense_ids: ids,
    }
}

#[tokio::test]
async fn test_create_report_maps_expenses_and_notifies() {
    let db = connect().await;
    let user = user_with_tier(&db, roomy_ceiling()).await;
    let taxi = expense(&db, user, "Taxi", dec!(120.50), "Travel").await;
    let lunch = expense(&db, user, "Lunch", dec!(45), "Food").await;

    let created = ReportRepository::new(db.clone())
        .create_report(request("Client visit", vec![taxi.id, lunch.id]), user, today())
        .await
        .expect("report should be created");

    assert!(created.report.code.as_str().starts_with("Rep#"));
    assert_eq!(created.report.status, CoreReportStatus::Pending);
    assert_eq!(created.notification.report_id, created.report.id);

    let expenses = ExpenseRepository::new(db.clone());
    for id in [taxi.id, lunch.id] {
        let stored = expenses.find_owned(id, user).await.unwrap().unwrap();
        assert_eq!(stored.status, ExpenseStatus::Mapped);
    }

    let notification_count = notifications::Entity::find()
        .filter(notifications::Column::ReportId.eq(created.report.id.into_inner()))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(notification_count, 1);
}

#[tokio::test]
async fn test_report_codes_increase() {
    let db = connect().await;
    let user = user_with_tier(&db, roomy_ceiling()).await;
    let repo = ReportRepository::new(db.clone());

    let first = expense(&db, user, "Taxi", dec!(10), "Travel").await;
    let second = expense(&db, user, "Bus", dec!(5), "Travel").await;

    let a = repo
        .create_report(request("One", vec![first.id]), user, today())
        .await
        .unwrap();
    let b = repo
        .create_report(request("Two", vec![second.id]), user, today())
        .await
        .unwrap();

    assert!(sequence_of(b.report.code.as_str()) > sequence_of(a.report.code.as_str()));
}

#[tokio::test]
async fn test_rejected_report_leaves_no_trace() {
    let db = connect().await;
    let user = user_with_tier(&db, roomy_ceiling()).await;
    let flight = expense(&db, user, "Flight", dec!(4000), "Travel").await;
    let hotel = expense(&db, user, "Hotel", dec!(2000), "Travel").await;

    let err = ReportRepository::new(db.clone())
        .create_report(request("Too much", vec![flight.id, hotel.id]), user, today())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EligibilityError::CategoryLimitExceeded {
            category: "Travel".to_string()
        }
    );

    let expenses = ExpenseRepository::new(db.clone());
    for id in [flight.id, hotel.id] {
        let stored = expenses.find_owned(id, user).await.unwrap().unwrap();
        assert_eq!(stored.status, ExpenseStatus::Unmapped);
    }
}

#[tokio::test]
async fn test_mapped_expense_cannot_be_reused() {
    let db = connect().await;
    let user = user_with_tier(&db, roomy_ceiling()).await;
    let repo = ReportRepository::new(db.clone());
    let taxi = expense(&db, user, "Taxi", dec!(10), "Travel").await;

    repo.create_report(request("First", vec![taxi.id]), user, today())
        .await
        .unwrap();
    let err = repo
        .create_report(request("Second", vec![taxi.id]), user, today())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EligibilityError::ExpenseAlreadyMapped {
            title: "Taxi".to_string()
        }
    );
}

#[tokio::test]
async fn test_foreign_expense_is_not_found() {
    let db = connect().await;
    let owner = user_with_tier(&db, roomy_ceiling()).await;
    let intruder = user_with_tier(&db, roomy_ceiling()).await;
    let taxi = expense(&db, owner, "Taxi", dec!(10), "Travel").await;

    let err = ReportRepository::new(db.clone())
        .create_report(request("Not mine", vec![taxi.id]), intruder, today())
        .await
        .unwrap_err();

    assert_eq!(err, EligibilityError::ExpenseNotFound(taxi.id));
}

#[tokio::test]
async fn test_rolling_ceiling_counts_approved_reports() {
    let _guard = ROLLING_SPEND.lock().await;
    let db = connect().await;
    let ceiling = rolling_spend(&db, today()).await + dec!(100);
    let user = user_with_tier(&db, ceiling).await;
    let repo = ReportRepository::new(db.clone());

    let at_ceiling = expense(&db, user, "Printer", dec!(100), "Office").await;
    let prior = repo
        .create_report(request("Office kit", vec![at_ceiling.id]), user, today())
        .await
        .unwrap();
    review_report(&db, prior.report.id, ReportStatus::Approved, today()).await;

    // Spend equal to the ceiling still passes.
    let small = expense(&db, user, "Pens", dec!(1), "Office").await;
    let next = repo
        .create_report(request("More kit", vec![small.id]), user, today())
        .await
        .unwrap();
    review_report(&db, next.report.id, ReportStatus::Reimbursed, today()).await;

    let another = expense(&db, user, "Paper", dec!(1), "Office").await;
    let err = repo
        .create_report(request("Even more", vec![another.id]), user, today())
        .await
        .unwrap_err();

    assert_eq!(err, EligibilityError::RollingLimitExceeded { limit: ceiling });
}

#[tokio::test]
async fn test_rolling_ceiling_counts_other_users_reports() {
    let _guard = ROLLING_SPEND.lock().await;
    let db = connect().await;
    let ceiling = rolling_spend(&db, today()).await + dec!(50);
    let user = user_with_tier(&db, ceiling).await;
    let colleague = user_with_tier(&db, roomy_ceiling()).await;
    let repo = ReportRepository::new(db.clone());

    let hotel = expense(&db, colleague, "Hotel", dec!(51), "Lodging").await;
    let theirs = repo
        .create_report(request("Colleague trip", vec![hotel.id]), colleague, today())
        .await
        .unwrap();
    review_report(&db, theirs.report.id, ReportStatus::Approved, today()).await;

    let taxi = expense(&db, user, "Taxi", dec!(10), "Travel").await;
    let err = repo
        .create_report(request("My trip", vec![taxi.id]), user, today())
        .await
        .unwrap_err();

    assert_eq!(err, EligibilityError::RollingLimitExceeded { limit: ceiling });
    let stored = ExpenseRepository::new(db.clone())
        .find_owned(taxi.id, user)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ExpenseStatus::Unmapped);
}

#[tokio::test]
async fn test_rolling_window_ignores_reports_older_than_thirty_days() {
    let _guard = ROLLING_SPEND.lock().await;
    let db = connect().await;
    let ceiling = rolling_spend(&db, today()).await + dec!(100);
    let user = user_with_tier(&db, ceiling).await;
    let repo = ReportRepository::new(db.clone());

    let old = expense(&db, user, "Laptop", dec!(900), "Office").await;
    let prior = repo
        .create_report(request("Old kit", vec![old.id]), user, today())
        .await
        .unwrap();
    let long_ago = today() - chrono::Days::new(31);
    review_report(&db, prior.report.id, ReportStatus::Approved, long_ago).await;

    let fresh = expense(&db, user, "Mouse", dec!(20), "Office").await;
    assert!(
        repo.create_report(request("New kit", vec![fresh.id]), user, today())
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_expense_in_active_report_conflicts() {
    // Approving the report adds to the window spend other tests measure.
    let _guard = ROLLING_SPEND.lock().await;
    let db = connect().await;
    let user = user_with_tier(&db, roomy_ceiling()).await;
    let repo = ReportRepository::new(db.clone());

    let taxi = expense(&db, user, "Taxi", dec!(10), "Travel").await;
    let created = repo
        .create_report(request("Approved trip", vec![taxi.id]), user, today())
        .await
        .unwrap();
    review_report(&db, created.report.id, ReportStatus::Approved, today()).await;

    // Simulate a stale mapping flag on an expense already in an approved report.
    expenses::ActiveModel {
        id: Set(taxi.id.into_inner()),
        status: Set(DbExpenseStatus::Unmapped),
        ..Default::default()
    }
    .update(&db)
    .await
    .unwrap();

    let err = repo
        .create_report(request("Again", vec![taxi.id]), user, today())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EligibilityError::ExpensesInActiveReport {
            report_title: "Approved trip".to_string()
        }
    );
}

#[tokio::test]
async fn test_concurrent_creators_get_distinct_codes() {
    let db = connect().await;
    let user = user_with_tier(&db, roomy_ceiling()).await;
    let repo = ReportRepository::new(db.clone());

    let mut ids = Vec::new();
    for i in 0..8 {
        ids.push(expense(&db, user, &format!("Taxi {i}"), dec!(10), "Travel").await.id);
    }

    let results = join_all(ids.into_iter().enumerate().map(|(i, id)| {
        let repo = repo.clone();
        async move {
            repo.create_report(request(&format!("Trip {i}"), vec![id]), user, today())
                .await
        }
    }))
    .await;

    let mut codes: Vec<u64> = results
        .into_iter()
        .map(|r| sequence_of(r.expect("each report should be created").report.code.as_str()))
        .collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 8);
}

#[tokio::test]
async fn test_concurrent_creators_cannot_share_an_expense() {
    let db = connect().await;
    let user: UserId = user_with_tier(&db, roomy_ceiling()).await;
    let repo = ReportRepository::new(db.clone());
    let taxi = expense(&db, user, "Taxi", dec!(10), "Travel").await;

    let results = join_all((0..4).map(|i| {
        let repo = repo.clone();
        async move {
            repo.create_report(request(&format!("Claim {i}"), vec![taxi.id]), user, today())
                .await
        }
    }))
    .await;

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for err in results.into_iter().filter_map(Result::err) {
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
