use super::*;
use placetrust_core::reputation::{ReputationEvent, ReputationRules};

pub fn create_user(connections: &sqlite::Connections, id: Option<Id>) -> Result<User> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_new_user(conn, id, Timestamp::now()))?)
}

pub fn get_reputation(
    connections: &sqlite::Connections,
    user_id: &str,
) -> Result<(User, ReputationTier)> {
    Ok(usecases::get_reputation(&connections.shared()?, user_id)?)
}

pub fn adjust_reputation(
    connections: &sqlite::Connections,
    rules: &ReputationRules,
    user_id: &str,
    event: ReputationEvent,
) -> Result<User> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::adjust_reputation(conn, user_id, rules, event))?)
}

pub(crate) fn post_adjust_reputation(
    connections: &sqlite::Connections,
    rules: &ReputationRules,
    user_id: &Id,
    event: ReputationEvent,
) {
    if let Err(err) = adjust_reputation(connections, rules, user_id.as_str(), event) {
        error!(
            "Failed to adjust the reputation of user {} ({:?}): {}",
            user_id, event, err
        );
    }
}
