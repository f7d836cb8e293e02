use crate::repositories::*;

/// Access to all repositories through a single connection.
pub trait Db: PlaceRepo + ReviewRepo + HelpfulnessVoteRepo + UserRepo {}

impl<T> Db for T where T: PlaceRepo + ReviewRepo + HelpfulnessVoteRepo + UserRepo {}
