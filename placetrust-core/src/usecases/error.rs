use crate::{
    entities::*,
    geo::GeoError,
    repositories,
    util::validate::{PlaceInvalidation, ReviewInvalidation},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),
    #[error("The radius must be positive")]
    InvalidRadius,
    #[error("The name is invalid")]
    Name,
    #[error("Invalid id")]
    Id,
    #[error("Rating value out of range")]
    RatingValue,
    #[error("Price range out of range")]
    PriceRange,
    #[error("Empty review text")]
    EmptyText,
    #[error("Invalid photo reference")]
    PhotoReference,
    #[error("Invalid dietary type: {0}")]
    DietaryType(String),
    #[error("Invalid dietary accuracy: {0}")]
    DietaryAccuracy(String),
    #[error("Invalid opening hours")]
    InvalidOpeningHours,
    #[error("Invalid place reference")]
    PlaceReference,
    #[error("The place does not accept reviews")]
    PlaceNotActive,
    #[error("The user does not exist")]
    UserDoesNotExist,
    #[error("The user already exists")]
    UserExists,
    #[error("The author already reviewed this place")]
    ReviewExists,
    #[error("The review status cannot change from {from:?} to {to:?}")]
    InvalidStatusTransition { from: ReviewStatus, to: ReviewStatus },
    #[error("This is not allowed")]
    Forbidden,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

/// Coarse classification of errors for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCoordinate,
    InvalidArgument,
    NotFound,
    ConflictAlreadyExists,
    Forbidden,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCoordinate(_) => ErrorKind::InvalidCoordinate,
            Self::InvalidRadius
            | Self::Name
            | Self::Id
            | Self::RatingValue
            | Self::PriceRange
            | Self::EmptyText
            | Self::PhotoReference
            | Self::DietaryType(_)
            | Self::DietaryAccuracy(_)
            | Self::InvalidOpeningHours
            | Self::PlaceReference
            | Self::PlaceNotActive
            | Self::InvalidStatusTransition { .. } => ErrorKind::InvalidArgument,
            Self::UserDoesNotExist | Self::Repo(repositories::Error::NotFound) => {
                ErrorKind::NotFound
            }
            Self::UserExists
            | Self::ReviewExists
            | Self::Repo(repositories::Error::AlreadyExists) => ErrorKind::ConflictAlreadyExists,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl From<GeoError> for Error {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::InvalidCoordinate(err) => err.into(),
            GeoError::InvalidRadius(_) => Self::InvalidRadius,
        }
    }
}

impl From<InvalidRatingValue> for Error {
    fn from(_: InvalidRatingValue) -> Self {
        Self::RatingValue
    }
}

impl From<InvalidPriceRange> for Error {
    fn from(_: InvalidPriceRange) -> Self {
        Self::PriceRange
    }
}

impl From<UnknownDietaryType> for Error {
    fn from(err: UnknownDietaryType) -> Self {
        Self::DietaryType(err.0)
    }
}

impl From<UnknownDietaryAccuracy> for Error {
    fn from(err: UnknownDietaryAccuracy) -> Self {
        Self::DietaryAccuracy(err.0)
    }
}

impl From<OpeningHoursParseError> for Error {
    fn from(_: OpeningHoursParseError) -> Self {
        Self::InvalidOpeningHours
    }
}

impl From<PlaceInvalidation> for Error {
    fn from(err: PlaceInvalidation) -> Self {
        match err {
            PlaceInvalidation::Name => Self::Name,
            PlaceInvalidation::Id => Self::Id,
            PlaceInvalidation::RatingAggregate => Self::RatingValue,
        }
    }
}

impl From<ReviewInvalidation> for Error {
    fn from(err: ReviewInvalidation) -> Self {
        match err {
            ReviewInvalidation::EmptyText => Self::EmptyText,
            ReviewInvalidation::PhotoReference(_) => Self::PhotoReference,
            ReviewInvalidation::Reference => Self::PlaceReference,
        }
    }
}
