use std::collections::BTreeMap;

use crate::entities::{DietaryAccuracy, DietaryType};

mod adjust_reputation;
mod change_review_status;
mod create_new_place;
mod create_new_user;
mod create_review;
mod delete_review;
mod error;
mod rate_place;
mod reverify_review_check_in;
mod search;
mod update_review;
mod vote_review;

#[cfg(test)]
pub mod tests;

pub use self::{
    adjust_reputation::*, change_review_status::*, create_new_place::*, create_new_user::*,
    create_review::*, delete_review::*, error::*, rate_place::*, reverify_review_check_in::*,
    search::*, update_review::*, vote_review::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, repositories::*};
    pub use crate::repositories::Error as RepoError;
}

// Raw dietary judgments as (type, accuracy) pairs
fn parse_dietary_accuracy(
    raw: &[(String, String)],
) -> prelude::Result<BTreeMap<DietaryType, DietaryAccuracy>> {
    raw.iter()
        .map(|(key, value)| -> prelude::Result<_> {
            Ok((DietaryType::parse(key)?, DietaryAccuracy::parse(value)?))
        })
        .collect()
}
