use super::*;
use placetrust_core::{
    entities::*,
    helpfulness::HelpfulnessDelta,
    repositories::{Error as RepoError, *},
};
use placetrust_entities::builders::*;

fn setup() -> Connections {
    let connections = Connections::init(":memory:", 1).unwrap();
    run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
    connections
}

fn pt(lat: f64, lng: f64) -> MapPoint {
    MapPoint::from_lat_lng_deg(lat, lng)
}

fn new_user(id: &str) -> User {
    User {
        id: id.into(),
        points: 0,
        review_count: 0,
        created_at: Timestamp::from_millis(1_000),
    }
}

#[test]
fn create_and_load_place() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    let place = Place {
        created_at: Timestamp::from_millis(1_000),
        updated_at: Timestamp::from_millis(2_000),
        dietary_scores: [(DietaryType::Vegan, 0.75)].into_iter().collect(),
        claimed_by: Some("owner".into()),
        ..Place::build()
            .id("p1")
            .name("Green Bowl")
            .address("Market Square 3")
            .pos(pt(48.0, 9.0))
            .price_range(2)
            .cuisines(vec!["Thai", "vegetarian"])
            .dietary(DietaryType::Vegan, true)
            .dietary(DietaryType::Halal, false)
            .opening_hours("Mo-Fr 10:00-18:00")
            .rating(425, 4)
            .finish()
    };
    db.create_place(&place).unwrap();
    assert_eq!(place, db.get_place("p1").unwrap());
    assert!(matches!(db.create_place(&place), Err(RepoError::AlreadyExists)));
    assert!(matches!(db.get_place("p2"), Err(RepoError::NotFound)));
}

#[test]
fn query_places_with_attribute_filters() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    for place in [
        Place::build()
            .id("a")
            .pos(pt(48.0, 9.0))
            .price_range(1)
            .cuisines(vec!["thai"])
            .dietary(DietaryType::Vegan, true)
            .rating(450, 2)
            .finish(),
        Place::build()
            .id("b")
            .pos(pt(48.01, 9.0))
            .price_range(3)
            .cuisines(vec!["american"])
            .dietary(DietaryType::Vegan, false)
            .rating(300, 1)
            .finish(),
        Place::build()
            .id("c")
            .pos(pt(48.0, 9.0))
            .status(PlaceStatus::Closed)
            .finish(),
        Place::build().id("d").pos(pt(48.0, 9.0)).deleted(true).finish(),
    ] {
        db.create_place(&place).unwrap();
    }

    let ids = |query: &PlaceQuery| -> Vec<String> {
        db.query_places(query)
            .unwrap()
            .into_iter()
            .map(|p| p.id.into())
            .collect()
    };

    assert_eq!(vec!["a", "b"], ids(&PlaceQuery::default()));
    assert_eq!(
        vec!["a"],
        ids(&PlaceQuery {
            cuisines: vec!["thai".into()],
            ..Default::default()
        })
    );
    assert_eq!(
        vec!["a"],
        ids(&PlaceQuery {
            dietary_tags: vec![DietaryType::Vegan],
            ..Default::default()
        })
    );
    assert_eq!(
        vec!["b"],
        ids(&PlaceQuery {
            min_price: Some(PriceRange::new(2).unwrap()),
            ..Default::default()
        })
    );
    assert_eq!(
        vec!["a"],
        ids(&PlaceQuery {
            min_rating: Some(AvgRatingValue::from_hundredths(400)),
            ..Default::default()
        })
    );
    let bbox = MapBbox::around(pt(48.0, 9.0), Distance::from_meters(500.0));
    assert_eq!(
        vec!["a"],
        db.nearby_place_candidates(&bbox)
            .unwrap()
            .into_iter()
            .map(|p| p.id.into())
            .collect::<Vec<String>>()
    );
}

#[test]
fn nearby_place_candidates_across_the_antimeridian() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    db.create_place(&Place::build().id("east").pos(pt(0.0, 179.99)).finish())
        .unwrap();
    db.create_place(&Place::build().id("west").pos(pt(0.0, -179.99)).finish())
        .unwrap();
    db.create_place(&Place::build().id("far").pos(pt(0.0, 0.0)).finish())
        .unwrap();
    let bbox = MapBbox::around(pt(0.0, 180.0), Distance::from_km(5.0));
    assert!(bbox.is_inverse());
    let mut ids: Vec<String> = db
        .nearby_place_candidates(&bbox)
        .unwrap()
        .into_iter()
        .map(|p| p.id.into())
        .collect();
    ids.sort();
    assert_eq!(vec!["east", "west"], ids);
}

#[test]
fn place_ids_in_batches() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    for id in ["c", "a", "b"] {
        db.create_place(&Place::build().id(id).finish()).unwrap();
    }
    let first: Vec<String> = db
        .place_ids_after(None, 2)
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    assert_eq!(vec!["a", "b"], first);
    let rest: Vec<String> = db
        .place_ids_after(Some("b"), 2)
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    assert_eq!(vec!["c"], rest);
}

#[test]
fn conditional_rating_aggregate_update() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    db.create_place(&Place::build().id("p").finish()).unwrap();
    let empty = RatingAggregate::empty();
    let one = RatingAggregate {
        avg: AvgRatingValue::from_hundredths(400),
        count: 1,
    };
    db.update_rating_aggregate("p", Some(&empty), &one).unwrap();
    assert!(matches!(
        db.update_rating_aggregate("p", Some(&empty), &one),
        Err(RepoError::InvalidVersion)
    ));
    assert!(matches!(
        db.update_rating_aggregate("x", Some(&empty), &one),
        Err(RepoError::NotFound)
    ));
    db.update_rating_aggregate("p", None, &empty).unwrap();
    assert_eq!(empty, db.get_place("p").unwrap().rating);
}

#[test]
fn create_update_and_delete_review() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    db.create_place(&Place::build().id("p").finish()).unwrap();
    let review = Review {
        created_at: Timestamp::from_millis(1_000),
        updated_at: Timestamp::from_millis(1_000),
        ..Review::build()
            .id("r")
            .author("u")
            .place("p")
            .rating(4)
            .photos(vec!["https://example.com/1.jpg", "https://example.com/0.jpg"])
            .dietary_accuracy(DietaryType::Vegan, DietaryAccuracy::Accurate)
            .check_in(pt(48.0, 9.0))
            .finish()
    };
    db.create_review(&review).unwrap();
    assert_eq!(review, db.get_review("r").unwrap());
    assert_eq!(
        Some(review.clone()),
        db.find_live_review("u", "p").unwrap()
    );

    let updated = Review {
        rating: RatingValue::new(2).unwrap(),
        photos: vec![],
        dietary_accuracy: Default::default(),
        gps: GpsVerification::Unverified,
        updated_at: Timestamp::from_millis(2_000),
        ..review.clone()
    };
    db.update_review(&updated).unwrap();
    assert_eq!(updated, db.get_review("r").unwrap());
    assert_eq!(1, db.active_reviews_of_place("p").unwrap().len());

    db.delete_review("r", Timestamp::from_millis(3_000)).unwrap();
    let deleted = db.get_review("r").unwrap();
    assert!(deleted.deleted);
    assert_eq!(Timestamp::from_millis(3_000), deleted.updated_at);
    assert!(db.active_reviews_of_place("p").unwrap().is_empty());
    assert_eq!(None, db.find_live_review("u", "p").unwrap());
    assert!(matches!(
        db.delete_review("r", Timestamp::now()),
        Err(RepoError::NotFound)
    ));
}

#[test]
fn only_one_live_review_per_author_and_place() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    db.create_place(&Place::build().id("p").finish()).unwrap();
    let first = Review::build().id("r1").author("u").place("p").finish();
    db.create_review(&first).unwrap();
    let second = Review::build().id("r2").author("u").place("p").finish();
    assert!(matches!(
        db.create_review(&second),
        Err(RepoError::AlreadyExists)
    ));
    db.delete_review("r1", Timestamp::now()).unwrap();
    db.create_review(&second).unwrap();
    // Removed reviews do not block a new review
    let removed = Review {
        status: ReviewStatus::Removed,
        ..second.clone()
    };
    db.update_review(&removed).unwrap();
    db.create_review(&Review::build().id("r3").author("u").place("p").finish())
        .unwrap();
}

#[test]
fn helpfulness_counters_never_become_negative() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    db.create_place(&Place::build().id("p").finish()).unwrap();
    db.create_review(&Review::build().id("r").place("p").counters(1, 0).finish())
        .unwrap();
    db.apply_helpfulness_delta(
        "r",
        HelpfulnessDelta {
            helpful: -1,
            not_helpful: 1,
        },
    )
    .unwrap();
    db.apply_helpfulness_delta(
        "r",
        HelpfulnessDelta {
            helpful: -1,
            not_helpful: 0,
        },
    )
    .unwrap();
    let review = db.get_review("r").unwrap();
    assert_eq!((0, 1), (review.helpful_count, review.not_helpful_count));

    // Updates leave the counters untouched
    db.update_review(&Review::build().id("r").place("p").counters(9, 9).finish())
        .unwrap();
    let review = db.get_review("r").unwrap();
    assert_eq!((0, 1), (review.helpful_count, review.not_helpful_count));
}

#[test]
fn helpfulness_deltas_are_added_to_the_stored_counters() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    db.create_place(&Place::build().id("p").finish()).unwrap();
    db.create_review(&Review::build().id("r").place("p").counters(2, 3).finish())
        .unwrap();
    let delta = HelpfulnessDelta {
        helpful: 1,
        not_helpful: -1,
    };
    db.apply_helpfulness_delta("r", delta).unwrap();
    db.apply_helpfulness_delta("r", delta).unwrap();
    let review = db.get_review("r").unwrap();
    assert_eq!((4, 1), (review.helpful_count, review.not_helpful_count));
    assert!(matches!(
        db.apply_helpfulness_delta("unknown", delta),
        Err(RepoError::NotFound)
    ));
}

#[test]
fn unique_votes_per_voter() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    db.create_place(&Place::build().id("p").finish()).unwrap();
    db.create_review(&Review::build().id("r").place("p").finish())
        .unwrap();
    let vote = HelpfulnessVote {
        id: "v1".into(),
        review_id: "r".into(),
        voter_id: "u".into(),
        helpful: true,
        created_at: Timestamp::from_millis(1_000),
        updated_at: Timestamp::from_millis(1_000),
    };
    db.create_vote(&vote).unwrap();
    assert!(matches!(
        db.create_vote(&HelpfulnessVote {
            id: "v2".into(),
            ..vote.clone()
        }),
        Err(RepoError::AlreadyExists)
    ));
    let changed = HelpfulnessVote {
        helpful: false,
        updated_at: Timestamp::from_millis(2_000),
        ..vote.clone()
    };
    db.update_vote(&changed).unwrap();
    assert_eq!(Some(changed), db.get_vote("r", "u").unwrap());
    assert_eq!(None, db.get_vote("r", "x").unwrap());
}

#[test]
fn create_and_update_user() {
    let connections = setup();
    let db = connections.exclusive().unwrap();
    let mut user = new_user("u");
    db.create_user(&user).unwrap();
    assert!(matches!(db.create_user(&user), Err(RepoError::AlreadyExists)));
    user.points = 42;
    user.review_count = 3;
    db.update_user(&user).unwrap();
    assert_eq!(user, db.get_user("u").unwrap());
    assert_eq!(None, db.try_get_user("x").unwrap());
    assert!(matches!(
        db.update_user(&new_user("x")),
        Err(RepoError::NotFound)
    ));
}

#[test]
fn read_only_access_rejects_writes() {
    let connections = setup();
    {
        let db = connections.exclusive().unwrap();
        db.create_user(&new_user("u")).unwrap();
    }
    let db = connections.shared().unwrap();
    assert_eq!(new_user("u"), db.get_user("u").unwrap());
    assert!(matches!(
        db.create_user(&new_user("x")),
        Err(RepoError::Other(_))
    ));
}

#[test]
fn rollback_transaction_on_error() {
    let connections = setup();
    let mut db = connections.exclusive().unwrap();
    let res = db.transaction(|conn| {
        conn.create_user(&new_user("u"))?;
        Err::<(), _>(uc::Error::Forbidden)
    });
    assert!(matches!(res, Err(uc::Error::Forbidden)));
    assert!(matches!(db.get_user("u"), Err(RepoError::NotFound)));

    db.transaction(|conn| conn.create_user(&new_user("u")))
        .unwrap();
    assert!(db.get_user("u").is_ok());
}
