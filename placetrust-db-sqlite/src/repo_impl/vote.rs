use super::*;

impl HelpfulnessVoteRepo for DbReadOnly<'_> {
    fn create_vote(&self, _vote: &HelpfulnessVote) -> Result<()> {
        Err(read_only_access())
    }
    fn update_vote(&self, _vote: &HelpfulnessVote) -> Result<()> {
        Err(read_only_access())
    }

    fn get_vote(&self, review_id: &str, voter_id: &str) -> Result<Option<HelpfulnessVote>> {
        get_vote(&mut self.conn.borrow_mut(), review_id, voter_id)
    }
}

impl HelpfulnessVoteRepo for DbReadWrite<'_> {
    fn create_vote(&self, vote: &HelpfulnessVote) -> Result<()> {
        create_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn update_vote(&self, vote: &HelpfulnessVote) -> Result<()> {
        update_vote(&mut self.conn.borrow_mut(), vote)
    }

    fn get_vote(&self, review_id: &str, voter_id: &str) -> Result<Option<HelpfulnessVote>> {
        get_vote(&mut self.conn.borrow_mut(), review_id, voter_id)
    }
}

impl HelpfulnessVoteRepo for DbConnection<'_> {
    fn create_vote(&self, vote: &HelpfulnessVote) -> Result<()> {
        create_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn update_vote(&self, vote: &HelpfulnessVote) -> Result<()> {
        update_vote(&mut self.conn.borrow_mut(), vote)
    }

    fn get_vote(&self, review_id: &str, voter_id: &str) -> Result<Option<HelpfulnessVote>> {
        get_vote(&mut self.conn.borrow_mut(), review_id, voter_id)
    }
}

impl<'a> From<&'a HelpfulnessVote> for models::NewHelpfulnessVote<'a> {
    fn from(from: &'a HelpfulnessVote) -> Self {
        let HelpfulnessVote {
            id,
            review_id,
            voter_id,
            helpful,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.as_str(),
            review_id: review_id.as_str(),
            voter_id: voter_id.as_str(),
            helpful: *helpful,
            created_at: created_at.as_millis(),
            updated_at: updated_at.as_millis(),
        }
    }
}

impl From<models::HelpfulnessVoteEntity> for HelpfulnessVote {
    fn from(from: models::HelpfulnessVoteEntity) -> Self {
        let models::HelpfulnessVoteEntity {
            rowid: _,
            id,
            review_id,
            voter_id,
            helpful,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.into(),
            review_id: review_id.into(),
            voter_id: voter_id.into(),
            helpful,
            created_at: Timestamp::from_millis(created_at),
            updated_at: Timestamp::from_millis(updated_at),
        }
    }
}

fn create_vote(conn: &mut SqliteConnection, vote: &HelpfulnessVote) -> Result<()> {
    diesel::insert_into(schema::helpfulness_vote::table)
        .values(&models::NewHelpfulnessVote::from(vote))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_vote(conn: &mut SqliteConnection, vote: &HelpfulnessVote) -> Result<()> {
    use schema::helpfulness_vote::dsl;
    let count = diesel::update(schema::helpfulness_vote::table.filter(dsl::id.eq(vote.id.as_str())))
        .set((
            dsl::helpful.eq(vote.helpful),
            dsl::updated_at.eq(vote.updated_at.as_millis()),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_vote(
    conn: &mut SqliteConnection,
    review_id: &str,
    voter_id: &str,
) -> Result<Option<HelpfulnessVote>> {
    use schema::helpfulness_vote::dsl;
    Ok(schema::helpfulness_vote::table
        .filter(dsl::review_id.eq(review_id))
        .filter(dsl::voter_id.eq(voter_id))
        .first::<models::HelpfulnessVoteEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}
