use super::*;

impl ReviewRepo for DbReadOnly<'_> {
    fn create_review(&self, _review: &Review) -> Result<()> {
        Err(read_only_access())
    }
    fn update_review(&self, _review: &Review) -> Result<()> {
        Err(read_only_access())
    }
    fn delete_review(&self, _id: &str, _deleted_at: Timestamp) -> Result<()> {
        Err(read_only_access())
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn active_reviews_of_place(&self, place_id: &str) -> Result<Vec<Review>> {
        active_reviews_of_place(&mut self.conn.borrow_mut(), place_id)
    }
    fn find_live_review(&self, author_id: &str, place_id: &str) -> Result<Option<Review>> {
        find_live_review(&mut self.conn.borrow_mut(), author_id, place_id)
    }

    fn apply_helpfulness_delta(&self, _id: &str, _delta: HelpfulnessDelta) -> Result<()> {
        Err(read_only_access())
    }
}

impl ReviewRepo for DbReadWrite<'_> {
    fn create_review(&self, review: &Review) -> Result<()> {
        create_review(&mut self.conn.borrow_mut(), review)
    }
    fn update_review(&self, review: &Review) -> Result<()> {
        update_review(&mut self.conn.borrow_mut(), review)
    }
    fn delete_review(&self, id: &str, deleted_at: Timestamp) -> Result<()> {
        delete_review(&mut self.conn.borrow_mut(), id, deleted_at)
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn active_reviews_of_place(&self, place_id: &str) -> Result<Vec<Review>> {
        active_reviews_of_place(&mut self.conn.borrow_mut(), place_id)
    }
    fn find_live_review(&self, author_id: &str, place_id: &str) -> Result<Option<Review>> {
        find_live_review(&mut self.conn.borrow_mut(), author_id, place_id)
    }

    fn apply_helpfulness_delta(&self, id: &str, delta: HelpfulnessDelta) -> Result<()> {
        apply_helpfulness_delta(&mut self.conn.borrow_mut(), id, delta)
    }
}

impl ReviewRepo for DbConnection<'_> {
    fn create_review(&self, review: &Review) -> Result<()> {
        create_review(&mut self.conn.borrow_mut(), review)
    }
    fn update_review(&self, review: &Review) -> Result<()> {
        update_review(&mut self.conn.borrow_mut(), review)
    }
    fn delete_review(&self, id: &str, deleted_at: Timestamp) -> Result<()> {
        delete_review(&mut self.conn.borrow_mut(), id, deleted_at)
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn active_reviews_of_place(&self, place_id: &str) -> Result<Vec<Review>> {
        active_reviews_of_place(&mut self.conn.borrow_mut(), place_id)
    }
    fn find_live_review(&self, author_id: &str, place_id: &str) -> Result<Option<Review>> {
        find_live_review(&mut self.conn.borrow_mut(), author_id, place_id)
    }

    fn apply_helpfulness_delta(&self, id: &str, delta: HelpfulnessDelta) -> Result<()> {
        apply_helpfulness_delta(&mut self.conn.borrow_mut(), id, delta)
    }
}

fn into_new_review(review: &Review) -> models::NewReview<'_> {
    let Review {
        id,
        author_id,
        place_id,
        rating,
        text,
        gps,
        helpful_count,
        not_helpful_count,
        status,
        deleted,
        created_at,
        updated_at,
        ..
    } = review;
    let check_in = gps.check_in().map(MapPoint::to_lat_lng_deg);
    models::NewReview {
        id: id.as_str(),
        author_id: author_id.as_str(),
        place_id: place_id.as_str(),
        rating: i16::from(rating.get()),
        text,
        check_in_lat: check_in.map(|(lat, _)| lat),
        check_in_lng: check_in.map(|(_, lng)| lng),
        helpful_count: from_count(*helpful_count),
        not_helpful_count: from_count(*not_helpful_count),
        status: ReviewStatusPrimitive::from(*status),
        deleted: *deleted,
        created_at: created_at.as_millis(),
        updated_at: updated_at.as_millis(),
    }
}

fn insert_review_details(
    conn: &mut SqliteConnection,
    parent_rowid: i64,
    review: &Review,
) -> Result<()> {
    let photos: Vec<_> = review
        .photos
        .iter()
        .enumerate()
        .map(|(position, url)| models::ReviewPhoto {
            parent_rowid,
            position: position as i64,
            url: url.clone(),
        })
        .collect();
    if !photos.is_empty() {
        diesel::insert_into(schema::review_photo::table)
            .values(&photos)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    let dietary_accuracy: Vec<_> = review
        .dietary_accuracy
        .iter()
        .map(|(dietary_type, accuracy)| models::ReviewDietaryAccuracy {
            parent_rowid,
            dietary_type: dietary_type.to_string(),
            accuracy: accuracy.to_string(),
        })
        .collect();
    if !dietary_accuracy.is_empty() {
        diesel::insert_into(schema::review_dietary_accuracy::table)
            .values(&dietary_accuracy)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    Ok(())
}

fn create_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    diesel::insert_into(schema::review::table)
        .values(&into_new_review(review))
        .execute(conn)
        .map_err(from_diesel_err)?;
    let rowid = resolve_review_rowid(conn, review.id.as_str())?;
    insert_review_details(conn, rowid, review)
}

fn update_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    use schema::review::dsl;
    let models::NewReview {
        rating,
        text,
        check_in_lat,
        check_in_lng,
        status,
        deleted,
        updated_at,
        ..
    } = into_new_review(review);
    // The helpfulness counters are only modified by `apply_helpfulness_delta`
    let count = diesel::update(schema::review::table.filter(dsl::id.eq(review.id.as_str())))
        .set((
            dsl::rating.eq(rating),
            dsl::text.eq(text),
            dsl::check_in_lat.eq(check_in_lat),
            dsl::check_in_lng.eq(check_in_lng),
            dsl::status.eq(status),
            dsl::deleted.eq(deleted),
            dsl::updated_at.eq(updated_at),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    let rowid = resolve_review_rowid(conn, review.id.as_str())?;
    diesel::delete(
        schema::review_photo::table.filter(schema::review_photo::parent_rowid.eq(rowid)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    diesel::delete(
        schema::review_dietary_accuracy::table
            .filter(schema::review_dietary_accuracy::parent_rowid.eq(rowid)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    insert_review_details(conn, rowid, review)
}

fn delete_review(conn: &mut SqliteConnection, id: &str, deleted_at: Timestamp) -> Result<()> {
    use schema::review::dsl;
    let count = diesel::update(
        schema::review::table
            .filter(dsl::id.eq(id))
            .filter(dsl::deleted.eq(false)),
    )
    .set((
        dsl::deleted.eq(true),
        dsl::updated_at.eq(deleted_at.as_millis()),
    ))
    .execute(conn)
    .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn load_review(conn: &mut SqliteConnection, entity: models::ReviewEntity) -> Result<Review> {
    let models::ReviewEntity {
        rowid,
        id,
        author_id,
        place_id,
        rating,
        text,
        check_in_lat,
        check_in_lng,
        helpful_count,
        not_helpful_count,
        status,
        deleted,
        created_at,
        updated_at,
    } = entity;

    let photos = {
        use schema::review_photo::dsl;
        schema::review_photo::table
            .select(dsl::url)
            .filter(dsl::parent_rowid.eq(rowid))
            .order_by(dsl::position)
            .load::<String>(conn)
            .map_err(from_diesel_err)?
    };

    let dietary_accuracy = {
        use schema::review_dietary_accuracy::dsl;
        schema::review_dietary_accuracy::table
            .filter(dsl::parent_rowid.eq(rowid))
            .load::<models::ReviewDietaryAccuracy>(conn)
            .map_err(from_diesel_err)?
            .into_iter()
            .filter_map(
                |models::ReviewDietaryAccuracy {
                     parent_rowid: _,
                     dietary_type,
                     accuracy,
                 }| {
                    let accuracy = DietaryAccuracy::parse(&accuracy)
                        .map_err(|err| {
                            log::error!("Failed to load dietary accuracy: {}", err);
                            err
                        })
                        .ok()?;
                    load_dietary_type(&dietary_type).map(|t| (t, accuracy))
                },
            )
            .collect()
    };

    let gps = match (check_in_lat, check_in_lng) {
        (Some(lat), Some(lng)) => GpsVerification::Verified {
            check_in: MapPoint::try_from_lat_lng_deg(lat, lng).map_err(anyhow::Error::from)?,
        },
        _ => GpsVerification::Unverified,
    };

    Ok(Review {
        rating: RatingValue::new(rating).map_err(anyhow::Error::from)?,
        status: ReviewStatus::try_from(status).map_err(anyhow::Error::from)?,
        id: id.into(),
        author_id: author_id.into(),
        place_id: place_id.into(),
        text,
        photos,
        dietary_accuracy,
        gps,
        helpful_count: to_count(helpful_count),
        not_helpful_count: to_count(not_helpful_count),
        deleted,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}

fn load_reviews(
    conn: &mut SqliteConnection,
    rows: Vec<models::ReviewEntity>,
) -> Result<Vec<Review>> {
    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        results.push(load_review(conn, row)?);
    }
    Ok(results)
}

fn get_review(conn: &mut SqliteConnection, id: &str) -> Result<Review> {
    use schema::review::dsl;
    let entity = schema::review::table
        .filter(dsl::id.eq(id))
        .first::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_review(conn, entity)
}

fn active_reviews_of_place(conn: &mut SqliteConnection, place_id: &str) -> Result<Vec<Review>> {
    use schema::review::dsl;
    let rows = schema::review::table
        .filter(dsl::place_id.eq(place_id))
        .filter(dsl::deleted.eq(false))
        .filter(dsl::status.eq(ReviewStatusPrimitive::from(ReviewStatus::Active)))
        .order_by(dsl::rowid)
        .load::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_reviews(conn, rows)
}

fn find_live_review(
    conn: &mut SqliteConnection,
    author_id: &str,
    place_id: &str,
) -> Result<Option<Review>> {
    use schema::review::dsl;
    let entity = schema::review::table
        .filter(dsl::author_id.eq(author_id))
        .filter(dsl::place_id.eq(place_id))
        .filter(dsl::deleted.eq(false))
        .filter(dsl::status.ne(ReviewStatusPrimitive::from(ReviewStatus::Removed)))
        .first::<models::ReviewEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?;
    entity.map(|entity| load_review(conn, entity)).transpose()
}

fn apply_helpfulness_delta(
    conn: &mut SqliteConnection,
    id: &str,
    delta: HelpfulnessDelta,
) -> Result<()> {
    use diesel::{dsl::sql, sql_types::BigInt};
    use schema::review::dsl;
    if delta.is_none() {
        return Ok(());
    }
    // SQLite's scalar MAX keeps the counters at or above zero
    let count = diesel::update(schema::review::table.filter(dsl::id.eq(id)))
        .set((
            dsl::helpful_count.eq(sql::<BigInt>("MAX(0, helpful_count + ")
                .bind::<BigInt, _>(i64::from(delta.helpful))
                .sql(")")),
            dsl::not_helpful_count.eq(sql::<BigInt>("MAX(0, not_helpful_count + ")
                .bind::<BigInt, _>(i64::from(delta.not_helpful))
                .sql(")")),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}
