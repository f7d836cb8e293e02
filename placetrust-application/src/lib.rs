#[macro_use]
extern crate log;

mod adjust_reputation;
mod change_review_status;
mod create_place;
mod create_review;
mod delete_review;
mod rate_place;
mod reconcile_ratings;
mod reverify_review;
mod search;
mod settings;
mod update_review;
mod vote_review;

pub mod prelude {
    pub use super::{
        adjust_reputation::*, change_review_status::*, create_place::*, create_review::*,
        delete_review::*, rate_place::*, reconcile_ratings::*, reverify_review::*, search::*,
        settings::*, update_review::*, vote_review::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use placetrust_core::{entities::*, repositories::*, usecases};
pub(crate) use self::{
    adjust_reputation::post_adjust_reputation, rate_place::post_apply_rating_change, settings::*,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use placetrust_db_sqlite::Connections;
}
