// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use placetrust_core::{
    entities::*,
    helpfulness::HelpfulnessDelta,
    repositories::{self as repo, *},
};

use super::*;

mod place;
mod review;
mod user;
mod vote;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn read_only_access() -> repo::Error {
    repo::Error::Other(anyhow!("Write access on a read-only connection"))
}

fn resolve_place_rowid(conn: &mut SqliteConnection, id: &str) -> Result<i64> {
    use schema::place::dsl;
    schema::place::table
        .select(dsl::rowid)
        .filter(dsl::id.eq(id))
        .first::<i64>(conn)
        .map_err(|e| {
            log::warn!("Failed to resolve place id '{}': {}", id, e);
            e
        })
        .map_err(from_diesel_err)
}

fn resolve_review_rowid(conn: &mut SqliteConnection, id: &str) -> Result<i64> {
    use schema::review::dsl;
    schema::review::table
        .select(dsl::rowid)
        .filter(dsl::id.eq(id))
        .first::<i64>(conn)
        .map_err(|e| {
            log::warn!("Failed to resolve review id '{}': {}", id, e);
            e
        })
        .map_err(from_diesel_err)
}

fn load_dietary_type(dietary_type: &str) -> Option<DietaryType> {
    DietaryType::parse(dietary_type)
        .map_err(|err| {
            // This should never happen if dietary types have been validated properly on insert
            log::error!("Failed to load dietary type: {}", err);
            err
        })
        .ok()
}

fn to_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

fn from_count(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
