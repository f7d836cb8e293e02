#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # placetrust-entities
//!
//! Reusable, agnostic domain entities for places, reviews and the
//! trust signals derived from them.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod dietary;
pub mod geo;
pub mod id;
pub mod place;
pub mod rating;
pub mod review;
pub mod time;
pub mod user;
pub mod vote;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
