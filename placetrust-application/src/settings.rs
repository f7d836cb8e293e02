use super::*;
use placetrust_core::{integrity::DEFAULT_MAX_CHECK_IN_DISTANCE, reputation::ReputationRules};

/// Parameters of the review lifecycle flows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewSettings {
    pub max_check_in_distance: Distance,
    pub reputation: ReputationRules,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            max_check_in_distance: DEFAULT_MAX_CHECK_IN_DISTANCE,
            reputation: ReputationRules::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationSettings {
    /// Number of place ids that are loaded at once
    pub batch_size: u64,
    /// Additional attempts for a place that failed to reconcile
    pub max_retries: u32,
}

impl Default for ReconciliationSettings {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_retries: 3,
        }
    }
}
