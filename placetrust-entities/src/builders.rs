pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{place_builder::*, review_builder::*};

pub mod place_builder {

    use super::*;
    use crate::{dietary::*, geo::*, id::*, place::*, rating::*, time::*};

    #[derive(Debug)]
    pub struct PlaceBuild {
        place: Place,
    }

    impl PlaceBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.place.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.place.name = name.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.place.address = address.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.place.pos = pos;
            self
        }
        pub fn price_range(mut self, price_range: u8) -> Self {
            self.place.price_range = PriceRange::new(price_range).unwrap();
            self
        }
        pub fn cuisines(mut self, cuisines: Vec<&str>) -> Self {
            self.place.cuisines = normalize_cuisines(cuisines);
            self
        }
        pub fn dietary(mut self, dietary_type: DietaryType, available: bool) -> Self {
            self.place.dietary_tags.insert(dietary_type, available);
            self
        }
        pub fn rating(mut self, avg_hundredths: i64, count: u64) -> Self {
            self.place.rating = RatingAggregate {
                avg: AvgRatingValue::from_hundredths(avg_hundredths),
                count,
            };
            self
        }
        pub fn status(mut self, status: PlaceStatus) -> Self {
            self.place.status = status;
            self
        }
        pub fn deleted(mut self, deleted: bool) -> Self {
            self.place.deleted = deleted;
            self
        }
        pub fn opening_hours(mut self, opening_hours: &str) -> Self {
            self.place.opening_hours = Some(opening_hours.parse().unwrap());
            self
        }
        pub fn finish(self) -> Place {
            self.place
        }
    }

    impl Builder for Place {
        type Build = PlaceBuild;
        fn build() -> PlaceBuild {
            let now = Timestamp::now();
            PlaceBuild {
                place: Place {
                    id: Id::new(),
                    name: "".into(),
                    address: "".into(),
                    pos: MapPoint::from_lat_lng_deg(0.0, 0.0),
                    price_range: PriceRange::min(),
                    cuisines: Default::default(),
                    dietary_tags: Default::default(),
                    dietary_scores: Default::default(),
                    opening_hours: None,
                    rating: RatingAggregate::empty(),
                    status: PlaceStatus::Active,
                    deleted: false,
                    claimed_by: None,
                    verified: false,
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}

pub mod review_builder {

    use super::*;
    use crate::{dietary::*, geo::*, id::*, rating::*, review::*, time::*};

    #[derive(Debug)]
    pub struct ReviewBuild {
        review: Review,
    }

    impl ReviewBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.review.id = id.into();
            self
        }
        pub fn author(mut self, author_id: &str) -> Self {
            self.review.author_id = author_id.into();
            self
        }
        pub fn place(mut self, place_id: &str) -> Self {
            self.review.place_id = place_id.into();
            self
        }
        pub fn rating(mut self, rating: u8) -> Self {
            self.review.rating = RatingValue::new(rating).unwrap();
            self
        }
        pub fn text(mut self, text: &str) -> Self {
            self.review.text = text.into();
            self
        }
        pub fn photos(mut self, photos: Vec<&str>) -> Self {
            self.review.photos = photos.into_iter().map(Into::into).collect();
            self
        }
        pub fn dietary_accuracy(
            mut self,
            dietary_type: DietaryType,
            accuracy: DietaryAccuracy,
        ) -> Self {
            self.review.dietary_accuracy.insert(dietary_type, accuracy);
            self
        }
        pub fn check_in(mut self, check_in: MapPoint) -> Self {
            self.review.gps = GpsVerification::Verified { check_in };
            self
        }
        pub fn counters(mut self, helpful: u64, not_helpful: u64) -> Self {
            self.review.helpful_count = helpful;
            self.review.not_helpful_count = not_helpful;
            self
        }
        pub fn status(mut self, status: ReviewStatus) -> Self {
            self.review.status = status;
            self
        }
        pub fn deleted(mut self, deleted: bool) -> Self {
            self.review.deleted = deleted;
            self
        }
        pub fn finish(self) -> Review {
            self.review
        }
    }

    impl Builder for Review {
        type Build = ReviewBuild;
        fn build() -> ReviewBuild {
            let now = Timestamp::now();
            ReviewBuild {
                review: Review {
                    id: Id::new(),
                    author_id: Id::new(),
                    place_id: Id::new(),
                    rating: RatingValue::max(),
                    text: "Great food".into(),
                    photos: vec![],
                    dietary_accuracy: Default::default(),
                    gps: GpsVerification::Unverified,
                    helpful_count: 0,
                    not_helpful_count: 0,
                    status: ReviewStatus::Active,
                    deleted: false,
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{place::*, review::*};

    #[test]
    fn build_place_with_defaults() {
        let place = Place::build()
            .id("p1")
            .name("Green Bowl")
            .cuisines(vec!["Thai"])
            .finish();
        assert_eq!("p1", place.id.as_str());
        assert!(place.is_listed());
        assert!(place.cuisines.contains("thai"));
        assert!(place.rating.is_empty());
    }

    #[test]
    fn build_review_with_defaults() {
        let review = Review::build().place("p1").rating(3).finish();
        assert_eq!("p1", review.place_id.as_str());
        assert_eq!(3, review.rating.get());
        assert!(review.is_live());
        assert!(review.counts_for_rating());
        assert!(!review.gps.is_verified());
    }
}
