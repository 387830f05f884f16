//! Database seeder for Expensa development and testing.
//!
//! Provisions tiers, a staff user and an admin, a few unmapped expenses and an
//! event roster. Users cannot self-register, so a fresh database needs this
//! before anyone can request an OTP.
//!
//! Usage: cargo run --bin seeder

use chrono::{Days, NaiveTime, Utc};
use expensa_core::event::Event;
use expensa_db::EventRepository;
use expensa_db::entities::{
    events, expenses,
    sea_orm_active_enums::{CategoryStatus, ExpenseStatus, UserType},
    tier_categories, tiers, users,
};
use expensa_shared::types::EventId;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

const STANDARD_TIER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0101);
const EXECUTIVE_TIER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0102);
const STAFF_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0201);
const ADMIN_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0202);
const KICKOFF_EVENT_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0301);

/// Staff login number for local testing.
const STAFF_MOBILE: &str = "9000000001";
/// Admin login number for local testing.
const ADMIN_MOBILE: &str = "9000000002";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("EXPENSA__DATABASE__URL"))
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    println!("Connecting to database...");
    let db = expensa_db::connect(&database_url).await?;

    println!("Seeding tiers...");
    seed_tier(
        &db,
        STANDARD_TIER_ID,
        "Standard",
        Decimal::from(10_000),
        &[
            ("Travel", 5_000, CategoryStatus::Enabled),
            ("Food", 2_000, CategoryStatus::Enabled),
            ("Lodging", 8_000, CategoryStatus::Enabled),
            ("Entertainment", 1_000, CategoryStatus::Disabled),
        ],
    )
    .await?;
    seed_tier(
        &db,
        EXECUTIVE_TIER_ID,
        "Executive",
        Decimal::from(50_000),
        &[
            ("Travel", 20_000, CategoryStatus::Enabled),
            ("Food", 5_000, CategoryStatus::Enabled),
            ("Lodging", 25_000, CategoryStatus::Enabled),
            ("Entertainment", 5_000, CategoryStatus::Enabled),
        ],
    )
    .await?;

    println!("Seeding users...");
    seed_user(
        &db,
        STAFF_USER_ID,
        STAFF_MOBILE,
        "Test Staff",
        Some(STANDARD_TIER_ID),
        UserType::Staff,
    )
    .await?;
    seed_user(
        &db,
        ADMIN_USER_ID,
        ADMIN_MOBILE,
        "Test Admin",
        Some(EXECUTIVE_TIER_ID),
        UserType::Admin,
    )
    .await?;

    println!("Seeding expenses...");
    seed_expenses(&db).await?;

    println!("Seeding events...");
    seed_events(&db).await?;

    println!("Seeding complete!");
    println!("  Staff mobile: {STAFF_MOBILE}");
    println!("  Admin mobile: {ADMIN_MOBILE}");
    Ok(())
}

async fn seed_tier(
    db: &DatabaseConnection,
    id: Uuid,
    name: &str,
    total_amount: Decimal,
    categories: &[(&str, i64, CategoryStatus)],
) -> anyhow::Result<()> {
    if tiers::Entity::find_by_id(id).one(db).await?.is_some() {
        println!("  Tier {name} already exists, skipping...");
        return Ok(());
    }

    let now = Utc::now().into();
    tiers::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        total_amount: Set(total_amount),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    for (title, max_amount, status) in categories {
        tier_categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            tier_id: Set(id),
            title: Set((*title).to_string()),
            max_amount: Set(Decimal::from(*max_amount)),
            status: Set(*status),
        }
        .insert(db)
        .await?;
    }

    println!("  Created tier {name} ({} categories)", categories.len());
    Ok(())
}

async fn seed_user(
    db: &DatabaseConnection,
    id: Uuid,
    mobile: &str,
    full_name: &str,
    tier_id: Option<Uuid>,
    user_type: UserType,
) -> anyhow::Result<()> {
    if users::Entity::find_by_id(id).one(db).await?.is_some() {
        println!("  User {mobile} already exists, skipping...");
        return Ok(());
    }

    let now = Utc::now().into();
    users::ActiveModel {
        id: Set(id),
        mobile: Set(mobile.to_string()),
        full_name: Set(full_name.to_string()),
        tier_id: Set(tier_id),
        user_type: Set(user_type),
        otp: Set(None),
        mpin_hash: Set(None),
        is_verified: Set(false),
        is_active: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    println!("  Created user {mobile}");
    Ok(())
}

async fn seed_expenses(db: &DatabaseConnection) -> anyhow::Result<()> {
    let samples = [
        ("Airport taxi", Decimal::new(1_250, 0), "Travel"),
        ("Client lunch", Decimal::new(84_050, 2), "Food"),
        ("Hotel, two nights", Decimal::new(4_800, 0), "Lodging"),
        ("Printer paper", Decimal::new(320, 0), "Office"),
    ];

    for (index, (title, amount, category)) in samples.into_iter().enumerate() {
        let id = Uuid::from_u128(0x0401 + index as u128);
        if expenses::Entity::find_by_id(id).one(db).await?.is_some() {
            continue;
        }

        let now = Utc::now().into();
        expenses::ActiveModel {
            id: Set(id),
            owner_id: Set(STAFF_USER_ID),
            title: Set(title.to_string()),
            amount: Set(amount),
            category: Set(category.to_string()),
            status: Set(ExpenseStatus::Unmapped),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;
        println!("  Created expense {title}");
    }

    Ok(())
}

async fn seed_events(db: &DatabaseConnection) -> anyhow::Result<()> {
    if events::Entity::find_by_id(KICKOFF_EVENT_ID).one(db).await?.is_some() {
        println!("  Event already exists, skipping...");
        return Ok(());
    }

    let repo = EventRepository::new(db.clone());
    let today = Utc::now().date_naive();
    let start = today.checked_add_days(Days::new(7)).unwrap_or(today);

    let event = Event {
        id: EventId::from(KICKOFF_EVENT_ID),
        event_name: "Quarterly kickoff".to_string(),
        start_date: start,
        end_date: start,
        start_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
        end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
        description: "Planning session for the coming quarter.".to_string(),
        location: "Head office".to_string(),
        status: "upcoming".to_string(),
        staff: vec![STAFF_USER_ID.into(), ADMIN_USER_ID.into()],
    };

    let event = repo.create(event).await?;
    println!("  Created event {}", event.event_name);
    Ok(())
}
