//! # placetrust-core
//!
//! The place discovery and review trust engine: geospatial search,
//! GPS check-in verification, rating aggregation, helpfulness votes
//! and user reputation.
//!
//! This crate performs no I/O. Storage is accessed through the
//! repository traits in [`repositories`].

pub mod db;
pub mod geo;
pub mod helpfulness;
pub mod integrity;
pub mod rating;
pub mod reputation;
pub mod repositories;
pub mod search;
pub mod text;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use placetrust_entities::{
        dietary::*, geo::*, id::*, place::*, rating::*, review::*, time::*, user::*, vote::*,
    };
}
