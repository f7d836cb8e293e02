use placetrust_entities::{place::Place, review::Review};
use thiserror::Error;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

fn is_valid_photo_reference(s: &str) -> bool {
    // NOTE:
    // The referenced file is stored by an external
    // service and not checked here.
    !s.trim().is_empty()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceInvalidation {
    #[error("Invalid name")]
    Name,
    #[error("Invalid id")]
    Id,
    #[error("The average rating is inconsistent with the review count")]
    RatingAggregate,
}

impl Validate for Place {
    type Error = PlaceInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.id.is_valid() {
            return Err(Self::Error::Id);
        }
        if self.name.trim().is_empty() {
            return Err(Self::Error::Name);
        }
        if !self.rating.is_valid() {
            return Err(Self::Error::RatingAggregate);
        }
        Ok(())
    }
}

impl AutoCorrect for Place {
    fn auto_correct(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.address = self.address.trim().to_owned();
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewInvalidation {
    #[error("Empty review text")]
    EmptyText,
    #[error("Invalid photo reference at position {0}")]
    PhotoReference(usize),
    #[error("Missing author or place reference")]
    Reference,
}

impl Validate for Review {
    type Error = ReviewInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.author_id.is_valid() || !self.place_id.is_valid() {
            return Err(Self::Error::Reference);
        }
        if self.text.trim().is_empty() {
            return Err(Self::Error::EmptyText);
        }
        if let Some(pos) = self
            .photos
            .iter()
            .position(|p| !is_valid_photo_reference(p))
        {
            return Err(Self::Error::PhotoReference(pos));
        }
        // The rating value is valid by construction
        debug_assert!(self.rating.is_valid());
        Ok(())
    }
}

impl AutoCorrect for Review {
    fn auto_correct(mut self) -> Self {
        self.text = self.text.trim().to_owned();
        self.photos = self
            .photos
            .into_iter()
            .map(|p| p.trim().to_owned())
            .collect();
        self
    }
}
