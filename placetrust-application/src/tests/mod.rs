mod review_lifecycle;

pub mod prelude {

    pub use placetrust_core::{
        entities::*,
        repositories::{Error as RepoError, *},
        reputation::{ReputationEvent, ReputationRules},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::prelude as flows;

    pub fn new_place(name: &str, lat: f64, lng: f64) -> usecases::NewPlace {
        usecases::NewPlace {
            name: name.into(),
            address: "Main Street 1".into(),
            lat,
            lng,
            price_range: 2,
            cuisines: vec![],
            dietary_tags: vec![],
            dietary_scores: vec![],
            opening_hours: None,
            claimed_by: None,
            verified: false,
        }
    }

    pub fn new_review(author_id: &str, place_id: &str, rating: i64) -> usecases::NewReview {
        usecases::NewReview {
            author_id: author_id.into(),
            place_id: place_id.into(),
            rating,
            text: format!("Rated {rating} stars"),
            photos: vec![],
            dietary_accuracy: vec![],
            check_in: None,
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub settings: flows::ReviewSettings,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            placetrust_db_sqlite::run_embedded_database_migrations(
                db_connections.exclusive().unwrap(),
            )
            .unwrap();
            Self {
                db_connections,
                settings: Default::default(),
            }
        }

        pub fn create_place(&self, name: &str, lat: f64, lng: f64) -> String {
            flows::create_place(&self.db_connections, new_place(name, lat, lng))
                .unwrap()
                .id
                .into()
        }

        pub fn create_user(&self, id: &str) {
            flows::create_user(&self.db_connections, Some(id.into())).unwrap();
        }

        pub fn create_review(&self, author_id: &str, place_id: &str, rating: i64) -> Review {
            flows::create_review(
                &self.db_connections,
                &self.settings,
                new_review(author_id, place_id, rating),
            )
            .unwrap()
            .review
        }

        pub fn get_place(&self, id: &str) -> Place {
            self.db_connections.shared().unwrap().get_place(id).unwrap()
        }

        pub fn get_review(&self, id: &str) -> Review {
            self.db_connections.shared().unwrap().get_review(id).unwrap()
        }

        pub fn get_user(&self, id: &str) -> User {
            self.db_connections.shared().unwrap().get_user(id).unwrap()
        }
    }
}
