//! Synthetic users, contacts and associations for a freshly created schema.

use fake::faker::internet::raw::{Password, SafeEmail, Username};
use fake::faker::name::raw::{FirstName, LastName};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::EN;
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::Rng;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::db::{contacts, users};
use crate::error::StoreResult;
use crate::model::{ContactId, NewContact, NewUser, UserId};

pub const DEFAULT_USERS: usize = 15;
pub const DEFAULT_CONTACTS: usize = 50;
pub const DEFAULT_ASSOCIATIONS: usize = 50;

const BIRTH_YEARS: std::ops::RangeInclusive<i32> = 1940..=2010;
/// Every value in this range has exactly 11 digits.
const OIB_RANGE: std::ops::Range<i64> = 10_000_000_000..100_000_000_000;
/// Counts come straight from the CLI; larger id lists grow as rows arrive.
const PREALLOCATE_MAX: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub users: usize,
    pub contacts: usize,
    /// Number of random draws, not a guaranteed number of rows.
    pub associations: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            users: DEFAULT_USERS,
            contacts: DEFAULT_CONTACTS,
            associations: DEFAULT_ASSOCIATIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub contacts: usize,
    pub associations: usize,
    pub duplicates_skipped: usize,
}

pub fn fake_user<R: Rng + ?Sized>(rng: &mut R) -> NewUser {
    NewUser {
        username: Username(EN).fake_with_rng(rng),
        email: SafeEmail(EN).fake_with_rng(rng),
        first_name: FirstName(EN).fake_with_rng(rng),
        last_name: LastName(EN).fake_with_rng(rng),
        birth_year: rng.random_range(BIRTH_YEARS),
        password: Password(EN, 8..16).fake_with_rng(rng),
        oib: rng.random_range(OIB_RANGE),
    }
}

pub fn fake_contact<R: Rng + ?Sized>(rng: &mut R) -> NewContact {
    NewContact {
        first_name: FirstName(EN).fake_with_rng(rng),
        last_name: LastName(EN).fake_with_rng(rng),
        contact_number: PhoneNumber(EN).fake_with_rng(rng),
        email: SafeEmail(EN).fake_with_rng(rng),
    }
}

/// Picks a uniformly random (user, contact) pair, or `None` if either side is empty.
pub fn draw_pair<R: Rng + ?Sized>(
    rng: &mut R,
    user_ids: &[UserId],
    contact_ids: &[ContactId],
) -> Option<(UserId, ContactId)> {
    let user_id = *user_ids.choose(rng)?;
    let contact_id = *contact_ids.choose(rng)?;
    Some((user_id, contact_id))
}

pub async fn insert_users<R: Rng + ?Sized>(
    pool: &PgPool,
    count: usize,
    rng: &mut R,
) -> StoreResult<Vec<UserId>> {
    let mut ids = Vec::with_capacity(count.min(PREALLOCATE_MAX));
    for _ in 0..count {
        let user = fake_user(rng);
        ids.push(users::add_user(pool, &user).await?);
    }
    Ok(ids)
}

pub async fn insert_contacts<R: Rng + ?Sized>(
    pool: &PgPool,
    count: usize,
    rng: &mut R,
) -> StoreResult<Vec<ContactId>> {
    let mut ids = Vec::with_capacity(count.min(PREALLOCATE_MAX));
    for _ in 0..count {
        let contact = fake_contact(rng);
        ids.push(contacts::insert_contact(pool, &contact).await?);
    }
    Ok(ids)
}

/// Fills already-created tables according to `plan`.
///
/// Each association draw is checked against the table first and skipped if
/// the pair is already linked, so the result is duplicate-free but may hold
/// fewer rows than `plan.associations`.
pub async fn populate<R: Rng + ?Sized>(
    pool: &PgPool,
    plan: &SeedPlan,
    rng: &mut R,
) -> StoreResult<SeedReport> {
    let user_ids = insert_users(pool, plan.users, rng).await?;
    info!(count = user_ids.len(), "Inserted users");

    let contact_ids = insert_contacts(pool, plan.contacts, rng).await?;
    info!(count = contact_ids.len(), "Inserted contacts");

    let mut report = SeedReport {
        users: user_ids.len(),
        contacts: contact_ids.len(),
        ..SeedReport::default()
    };

    for _ in 0..plan.associations {
        let Some((user_id, contact_id)) = draw_pair(rng, &user_ids, &contact_ids) else {
            break;
        };

        if contacts::association_exists(pool, user_id, contact_id).await? {
            debug!(user_id, contact_id, "Pair already linked, skipping");
            report.duplicates_skipped += 1;
            continue;
        }

        contacts::insert_association(pool, user_id, contact_id).await?;
        report.associations += 1;
    }

    info!(
        associations = report.associations,
        duplicates_skipped = report.duplicates_skipped,
        "Inserted user contacts"
    );
    Ok(report)
}
