use super::prelude::*;
use crate::reputation::{apply_event, ReputationEvent, ReputationRules};

/// Applies a reputation event to the stored user.
pub fn adjust_reputation<R: UserRepo>(
    repo: &R,
    user_id: &str,
    rules: &ReputationRules,
    event: ReputationEvent,
) -> Result<User> {
    let mut user = repo.try_get_user(user_id)?.ok_or(Error::UserDoesNotExist)?;
    let tier = user.tier();
    apply_event(&mut user, rules, event);
    repo.update_user(&user)?;
    log::debug!(
        "Reputation of user {} after {:?}: {} points",
        user.id,
        event,
        user.points
    );
    if user.tier() != tier {
        log::info!(
            "User {} changed tier from {:?} to {:?}",
            user.id,
            tier,
            user.tier()
        );
    }
    Ok(user)
}

pub fn get_reputation<R: UserRepo>(repo: &R, user_id: &str) -> Result<(User, ReputationTier)> {
    let user = repo.try_get_user(user_id)?.ok_or(Error::UserDoesNotExist)?;
    let tier = user.tier();
    Ok((user, tier))
}

#[cfg(test)]
mod tests {
    use super::{super::tests::*, *};

    #[test]
    fn accumulate_points_and_tiers() {
        let db = MockDb::default();
        db.add_user("u1");
        let rules = ReputationRules::default();
        for _ in 0..3 {
            adjust_reputation(
                &db,
                "u1",
                &rules,
                ReputationEvent::ReviewCreated { gps_verified: true },
            )
            .unwrap();
        }
        let user = adjust_reputation(&db, "u1", &rules, ReputationEvent::HelpfulVoteAdded).unwrap();
        assert_eq!(47, user.points);
        assert_eq!(3, user.review_count);
        assert_eq!(ReputationTier::Bronze, user.tier());

        let user = adjust_reputation(&db, "u1", &rules, ReputationEvent::HelpfulVoteAdded).unwrap();
        assert_eq!(49, user.points);
        let user = adjust_reputation(&db, "u1", &rules, ReputationEvent::HelpfulVoteAdded).unwrap();
        assert_eq!(51, user.points);
        let (stored, tier) = get_reputation(&db, "u1").unwrap();
        assert_eq!(user, stored);
        assert_eq!(ReputationTier::Silver, tier);
    }

    #[test]
    fn moderation_penalty_never_goes_below_zero() {
        let db = MockDb::default();
        db.add_user("u1");
        let rules = ReputationRules::default();
        adjust_reputation(
            &db,
            "u1",
            &rules,
            ReputationEvent::ReviewCreated {
                gps_verified: false,
            },
        )
        .unwrap();
        let user = adjust_reputation(
            &db,
            "u1",
            &rules,
            ReputationEvent::ReviewRemovedByModeration,
        )
        .unwrap();
        assert_eq!(0, user.points);
        assert_eq!(1, user.review_count);
    }

    #[test]
    fn unknown_user() {
        let db = MockDb::default();
        assert!(matches!(
            adjust_reputation(
                &db,
                "nobody",
                &ReputationRules::default(),
                ReputationEvent::HelpfulVoteAdded
            ),
            Err(Error::UserDoesNotExist)
        ));
        assert!(matches!(
            get_reputation(&db, "nobody"),
            Err(Error::UserDoesNotExist)
        ));
    }
}
