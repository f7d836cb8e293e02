use super::prelude::*;
use std::sync::atomic::AtomicBool;

#[test]
fn incremental_aggregate_agrees_with_reconciliation() {
    let fixture = BackendFixture::new();
    let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
    let mut reviews = vec![];
    for (user, rating) in [("u1", 5), ("u2", 3), ("u3", 4), ("u4", 1)] {
        fixture.create_user(user);
        reviews.push(fixture.create_review(user, &place_id, rating));
    }
    flows::update_review(
        &fixture.db_connections,
        "u1",
        reviews[0].id.as_str(),
        usecases::ReviewUpdate {
            rating: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    flows::delete_review(
        &fixture.db_connections,
        &fixture.settings,
        "u2",
        reviews[1].id.as_str(),
    )
    .unwrap();
    flows::change_review_status(
        &fixture.db_connections,
        &fixture.settings,
        reviews[3].id.as_str(),
        ReviewStatus::Flagged,
    )
    .unwrap();

    // Remaining active ratings: 2 and 4
    let incremental = fixture.get_place(&place_id).rating;
    assert_eq!(AvgRatingValue::from_hundredths(300), incremental.avg);
    assert_eq!(2, incremental.count);

    let summary = flows::reconcile_all_ratings(
        &fixture.db_connections,
        &Default::default(),
        None,
        &AtomicBool::new(false),
    )
    .unwrap();
    assert_eq!(1, summary.processed);
    assert_eq!(incremental, fixture.get_place(&place_id).rating);
}

#[test]
fn reputation_follows_review_activity() {
    let fixture = BackendFixture::new();
    let place_id = fixture.create_place("Green Bowl", 48.0, 9.0);
    let other_place_id = fixture.create_place("Burger Barn", 48.0, 9.0);
    fixture.create_user("author");
    fixture.create_user("voter");

    let verified = flows::create_review(
        &fixture.db_connections,
        &fixture.settings,
        usecases::NewReview {
            check_in: Some((48.0, 9.0)),
            ..new_review("author", &place_id, 5)
        },
    )
    .unwrap()
    .review;
    let unverified = fixture.create_review("author", &other_place_id, 2);
    flows::vote_review(
        &fixture.db_connections,
        &fixture.settings,
        verified.id.as_str(),
        "voter",
        true,
    )
    .unwrap();
    let (user, tier) = flows::get_reputation(&fixture.db_connections, "author").unwrap();
    assert_eq!(10 + 5 + 10 + 2, user.points);
    assert_eq!(2, user.review_count);
    assert_eq!(ReputationTier::Bronze, tier);

    flows::change_review_status(
        &fixture.db_connections,
        &fixture.settings,
        unverified.id.as_str(),
        ReviewStatus::Removed,
    )
    .unwrap();
    assert_eq!(7, fixture.get_user("author").points);

    // Votes on removed reviews are rejected
    let err = flows::vote_review(
        &fixture.db_connections,
        &fixture.settings,
        unverified.id.as_str(),
        "voter",
        true,
    )
    .unwrap_err();
    assert_eq!(Some(usecases::ErrorKind::NotFound), err.kind());

    flows::delete_review(
        &fixture.db_connections,
        &fixture.settings,
        "author",
        verified.id.as_str(),
    )
    .unwrap();
    let user = fixture.get_user("author");
    assert_eq!(0, user.points);
    assert_eq!(1, user.review_count);
}
