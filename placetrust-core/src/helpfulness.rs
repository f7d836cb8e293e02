/// Adjustment of a review's helpfulness counters caused by a single vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelpfulnessDelta {
    pub helpful: i8,
    pub not_helpful: i8,
}

impl HelpfulnessDelta {
    pub const fn none() -> Self {
        Self {
            helpful: 0,
            not_helpful: 0,
        }
    }

    pub const fn is_none(self) -> bool {
        self.helpful == 0 && self.not_helpful == 0
    }

    const fn add(helpful: bool) -> Self {
        if helpful {
            Self {
                helpful: 1,
                not_helpful: 0,
            }
        } else {
            Self {
                helpful: 0,
                not_helpful: 1,
            }
        }
    }

    const fn switch(to_helpful: bool) -> Self {
        if to_helpful {
            Self {
                helpful: 1,
                not_helpful: -1,
            }
        } else {
            Self {
                helpful: -1,
                not_helpful: 1,
            }
        }
    }

    /// Applies the delta to a pair of counters that never become negative.
    pub fn apply_to(self, helpful: u64, not_helpful: u64) -> (u64, u64) {
        (
            helpful.saturating_add_signed(i64::from(self.helpful)),
            not_helpful.saturating_add_signed(i64::from(self.not_helpful)),
        )
    }
}

/// Counter delta for a (re-)vote given the voter's existing vote, if any.
pub const fn vote_delta(existing: Option<bool>, helpful: bool) -> HelpfulnessDelta {
    match existing {
        None => HelpfulnessDelta::add(helpful),
        Some(previous) if previous == helpful => HelpfulnessDelta::none(),
        Some(_) => HelpfulnessDelta::switch(helpful),
    }
}
