use super::prelude::*;

pub fn create_new_user<R: UserRepo>(repo: &R, id: Option<Id>, now: Timestamp) -> Result<User> {
    let id = id.unwrap_or_else(Id::new);
    if !id.is_valid() {
        return Err(Error::Id);
    }
    if repo.try_get_user(id.as_str())?.is_some() {
        return Err(Error::UserExists);
    }
    let user = User {
        id,
        points: 0,
        review_count: 0,
        created_at: now,
    };
    log::debug!("Creating new user {}", user.id);
    repo.create_user(&user).map_err(|err| match err {
        RepoError::AlreadyExists => Error::UserExists,
        err => err.into(),
    })?;
    Ok(user)
}
