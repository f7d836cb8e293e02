use crate::entities::*;

/// Adds a (possibly negative) delta with a floor at zero.
pub fn apply_delta(current_points: u32, delta: i64) -> u32 {
    let points = i64::from(current_points).saturating_add(delta);
    points.clamp(0, i64::from(u32::MAX)) as u32
}

pub const fn tier_of(points: u32) -> ReputationTier {
    ReputationTier::from_points(points)
}

/// Point deltas awarded for review activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReputationRules {
    pub review_created: u32,
    pub gps_verified_bonus: u32,
    pub helpful_vote: u32,
    pub moderation_penalty: u32,
}

impl Default for ReputationRules {
    fn default() -> Self {
        Self {
            review_created: 10,
            gps_verified_bonus: 5,
            helpful_vote: 2,
            moderation_penalty: 20,
        }
    }
}

/// An event that changes the reputation of a review's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReputationEvent {
    ReviewCreated { gps_verified: bool },
    ReviewDeleted { gps_verified: bool },
    HelpfulVoteAdded,
    HelpfulVoteWithdrawn,
    ReviewRemovedByModeration,
}

impl ReputationRules {
    fn review_points(&self, gps_verified: bool) -> i64 {
        let bonus = if gps_verified {
            self.gps_verified_bonus
        } else {
            0
        };
        i64::from(self.review_created) + i64::from(bonus)
    }

    pub fn points_delta(&self, event: ReputationEvent) -> i64 {
        match event {
            ReputationEvent::ReviewCreated { gps_verified } => self.review_points(gps_verified),
            ReputationEvent::ReviewDeleted { gps_verified } => -self.review_points(gps_verified),
            ReputationEvent::HelpfulVoteAdded => i64::from(self.helpful_vote),
            ReputationEvent::HelpfulVoteWithdrawn => -i64::from(self.helpful_vote),
            ReputationEvent::ReviewRemovedByModeration => -i64::from(self.moderation_penalty),
        }
    }

    pub const fn review_count_delta(event: ReputationEvent) -> i64 {
        match event {
            ReputationEvent::ReviewCreated { .. } => 1,
            ReputationEvent::ReviewDeleted { .. } => -1,
            _ => 0,
        }
    }
}

/// Applies the event to a user's reputation slice.
pub fn apply_event(user: &mut User, rules: &ReputationRules, event: ReputationEvent) {
    user.points = apply_delta(user.points, rules.points_delta(event));
    user.review_count = apply_delta(
        user.review_count,
        ReputationRules::review_count_delta(event),
    );
}
