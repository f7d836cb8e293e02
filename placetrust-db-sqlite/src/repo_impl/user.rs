use super::*;

impl UserRepo for DbReadOnly<'_> {
    fn create_user(&self, _user: &User) -> Result<()> {
        Err(read_only_access())
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        Err(read_only_access())
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
}

impl UserRepo for DbReadWrite<'_> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
}

impl UserRepo for DbConnection<'_> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
}

impl<'a> From<&'a User> for models::NewUser<'a> {
    fn from(from: &'a User) -> Self {
        let User {
            id,
            points,
            review_count,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            points: i64::from(*points),
            review_count: i64::from(*review_count),
            created_at: created_at.as_millis(),
        }
    }
}

impl From<models::UserEntity> for User {
    fn from(from: models::UserEntity) -> Self {
        let models::UserEntity {
            rowid: _,
            id,
            points,
            review_count,
            created_at,
        } = from;
        Self {
            id: id.into(),
            points: u32::try_from(points).unwrap_or_default(),
            review_count: u32::try_from(review_count).unwrap_or_default(),
            created_at: Timestamp::from_millis(created_at),
        }
    }
}

fn create_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    diesel::insert_into(schema::users::table)
        .values(&models::NewUser::from(user))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    use schema::users::dsl;
    let count = diesel::update(dsl::users.filter(dsl::id.eq(user.id.as_str())))
        .set((
            dsl::points.eq(i64::from(user.points)),
            dsl::review_count.eq(i64::from(user.review_count)),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, id: &str) -> Result<User> {
    use schema::users::dsl;
    Ok(dsl::users
        .filter(dsl::id.eq(id))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}
