use super::*;

impl PlaceRepo for DbReadOnly<'_> {
    fn create_place(&self, _place: &Place) -> Result<()> {
        Err(read_only_access())
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }

    fn nearby_place_candidates(&self, bbox: &MapBbox) -> Result<Vec<Place>> {
        nearby_place_candidates(&mut self.conn.borrow_mut(), bbox)
    }
    fn query_places(&self, query: &PlaceQuery) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), query)
    }

    fn place_ids_after(&self, after: Option<&str>, limit: u64) -> Result<Vec<Id>> {
        place_ids_after(&mut self.conn.borrow_mut(), after, limit)
    }

    fn update_rating_aggregate(
        &self,
        _id: &str,
        _expected: Option<&RatingAggregate>,
        _aggregate: &RatingAggregate,
    ) -> Result<()> {
        Err(read_only_access())
    }
}

impl PlaceRepo for DbReadWrite<'_> {
    fn create_place(&self, place: &Place) -> Result<()> {
        create_place(&mut self.conn.borrow_mut(), place)
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }

    fn nearby_place_candidates(&self, bbox: &MapBbox) -> Result<Vec<Place>> {
        nearby_place_candidates(&mut self.conn.borrow_mut(), bbox)
    }
    fn query_places(&self, query: &PlaceQuery) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), query)
    }

    fn place_ids_after(&self, after: Option<&str>, limit: u64) -> Result<Vec<Id>> {
        place_ids_after(&mut self.conn.borrow_mut(), after, limit)
    }

    fn update_rating_aggregate(
        &self,
        id: &str,
        expected: Option<&RatingAggregate>,
        aggregate: &RatingAggregate,
    ) -> Result<()> {
        update_rating_aggregate(&mut self.conn.borrow_mut(), id, expected, aggregate)
    }
}

impl PlaceRepo for DbConnection<'_> {
    fn create_place(&self, place: &Place) -> Result<()> {
        create_place(&mut self.conn.borrow_mut(), place)
    }

    fn get_place(&self, id: &str) -> Result<Place> {
        get_place(&mut self.conn.borrow_mut(), id)
    }

    fn nearby_place_candidates(&self, bbox: &MapBbox) -> Result<Vec<Place>> {
        nearby_place_candidates(&mut self.conn.borrow_mut(), bbox)
    }
    fn query_places(&self, query: &PlaceQuery) -> Result<Vec<Place>> {
        query_places(&mut self.conn.borrow_mut(), query)
    }

    fn place_ids_after(&self, after: Option<&str>, limit: u64) -> Result<Vec<Id>> {
        place_ids_after(&mut self.conn.borrow_mut(), after, limit)
    }

    fn update_rating_aggregate(
        &self,
        id: &str,
        expected: Option<&RatingAggregate>,
        aggregate: &RatingAggregate,
    ) -> Result<()> {
        update_rating_aggregate(&mut self.conn.borrow_mut(), id, expected, aggregate)
    }
}

fn into_new_place(place: &Place) -> models::NewPlace<'_> {
    let Place {
        id,
        name,
        address,
        pos,
        price_range,
        opening_hours,
        rating,
        status,
        deleted,
        claimed_by,
        verified,
        created_at,
        updated_at,
        ..
    } = place;
    models::NewPlace {
        id: id.as_str(),
        name,
        address,
        lat: pos.lat().to_deg(),
        lng: pos.lng().to_deg(),
        price_range: i16::from(price_range.get()),
        opening_hours: opening_hours.as_ref().map(OpeningHours::as_str),
        status: PlaceStatusPrimitive::from(*status),
        deleted: *deleted,
        claimed_by: claimed_by.as_ref().map(Id::as_str),
        verified: *verified,
        avg_rating: rating.avg.to_hundredths(),
        rating_count: from_count(rating.count),
        created_at: created_at.as_millis(),
        updated_at: updated_at.as_millis(),
    }
}

fn create_place(conn: &mut SqliteConnection, place: &Place) -> Result<()> {
    debug_assert!(place.pos.is_valid());
    diesel::insert_into(schema::place::table)
        .values(&into_new_place(place))
        .execute(conn)
        .map_err(from_diesel_err)?;
    let parent_rowid = resolve_place_rowid(conn, place.id.as_str())?;

    let cuisines: Vec<_> = place
        .cuisines
        .iter()
        .map(|cuisine| models::PlaceCuisine {
            parent_rowid,
            cuisine: cuisine.clone(),
        })
        .collect();
    if !cuisines.is_empty() {
        diesel::insert_into(schema::place_cuisine::table)
            .values(&cuisines)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }

    let dietary_tags: Vec<_> = place
        .dietary_tags
        .iter()
        .map(|(dietary_type, available)| models::PlaceDietaryTag {
            parent_rowid,
            dietary_type: dietary_type.to_string(),
            available: *available,
        })
        .collect();
    if !dietary_tags.is_empty() {
        diesel::insert_into(schema::place_dietary_tag::table)
            .values(&dietary_tags)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }

    let dietary_scores: Vec<_> = place
        .dietary_scores
        .iter()
        .map(|(dietary_type, score)| models::PlaceDietaryScore {
            parent_rowid,
            dietary_type: dietary_type.to_string(),
            score: *score,
        })
        .collect();
    if !dietary_scores.is_empty() {
        diesel::insert_into(schema::place_dietary_score::table)
            .values(&dietary_scores)
            .execute(conn)
            .map_err(from_diesel_err)?;
    }
    Ok(())
}

fn load_place(conn: &mut SqliteConnection, entity: models::PlaceEntity) -> Result<Place> {
    let models::PlaceEntity {
        rowid,
        id,
        name,
        address,
        lat,
        lng,
        price_range,
        opening_hours,
        status,
        deleted,
        claimed_by,
        verified,
        avg_rating,
        rating_count,
        created_at,
        updated_at,
    } = entity;

    let cuisines = {
        use schema::place_cuisine::dsl;
        schema::place_cuisine::table
            .select(dsl::cuisine)
            .filter(dsl::parent_rowid.eq(rowid))
            .load::<String>(conn)
            .map_err(from_diesel_err)?
            .into_iter()
            .collect()
    };

    let dietary_tags = {
        use schema::place_dietary_tag::dsl;
        schema::place_dietary_tag::table
            .filter(dsl::parent_rowid.eq(rowid))
            .load::<models::PlaceDietaryTag>(conn)
            .map_err(from_diesel_err)?
            .into_iter()
            .filter_map(
                |models::PlaceDietaryTag {
                     parent_rowid: _,
                     dietary_type,
                     available,
                 }| load_dietary_type(&dietary_type).map(|t| (t, available)),
            )
            .collect()
    };

    let dietary_scores = {
        use schema::place_dietary_score::dsl;
        schema::place_dietary_score::table
            .filter(dsl::parent_rowid.eq(rowid))
            .load::<models::PlaceDietaryScore>(conn)
            .map_err(from_diesel_err)?
            .into_iter()
            .filter_map(
                |models::PlaceDietaryScore {
                     parent_rowid: _,
                     dietary_type,
                     score,
                 }| load_dietary_type(&dietary_type).map(|t| (t, score)),
            )
            .collect()
    };

    let opening_hours = opening_hours.and_then(|opening_hours| {
        opening_hours
            .parse::<OpeningHours>()
            .map_err(|err| {
                log::warn!("Failed to load opening hours of place {}: {}", id, err);
                err
            })
            .ok()
    });

    Ok(Place {
        pos: MapPoint::try_from_lat_lng_deg(lat, lng).map_err(anyhow::Error::from)?,
        price_range: PriceRange::new(price_range).map_err(anyhow::Error::from)?,
        status: PlaceStatus::try_from(status).map_err(anyhow::Error::from)?,
        id: id.into(),
        name,
        address,
        cuisines,
        dietary_tags,
        dietary_scores,
        opening_hours,
        rating: RatingAggregate {
            avg: AvgRatingValue::from_hundredths(avg_rating),
            count: to_count(rating_count),
        },
        deleted,
        claimed_by: claimed_by.map(Into::into),
        verified,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}

fn load_places(conn: &mut SqliteConnection, rows: Vec<models::PlaceEntity>) -> Result<Vec<Place>> {
    let mut results = Vec::with_capacity(rows.len());
    for row in rows {
        results.push(load_place(conn, row)?);
    }
    Ok(results)
}

fn get_place(conn: &mut SqliteConnection, id: &str) -> Result<Place> {
    use schema::place::dsl;
    let entity = schema::place::table
        .filter(dsl::id.eq(id))
        .first::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?;
    load_place(conn, entity)
}

fn nearby_place_candidates(conn: &mut SqliteConnection, bbox: &MapBbox) -> Result<Vec<Place>> {
    let query = PlaceQuery {
        bbox: Some(*bbox),
        ..Default::default()
    };
    query_places(conn, &query)
}

fn query_places(conn: &mut SqliteConnection, query: &PlaceQuery) -> Result<Vec<Place>> {
    use schema::place::dsl;
    let mut sql_query = schema::place::table
        .filter(dsl::deleted.eq(false))
        .filter(dsl::status.eq(PlaceStatusPrimitive::from(PlaceStatus::Active)))
        .into_boxed();

    if let Some(bbox) = &query.bbox {
        let sw = bbox.southwest();
        let ne = bbox.northeast();
        sql_query = sql_query.filter(dsl::lat.between(sw.lat().to_deg(), ne.lat().to_deg()));
        sql_query = if bbox.is_inverse() {
            sql_query.filter(
                dsl::lng
                    .ge(sw.lng().to_deg())
                    .or(dsl::lng.le(ne.lng().to_deg())),
            )
        } else {
            sql_query.filter(dsl::lng.between(sw.lng().to_deg(), ne.lng().to_deg()))
        };
    }

    if let Some(min_price) = query.min_price {
        sql_query = sql_query.filter(dsl::price_range.ge(i16::from(min_price.get())));
    }
    if let Some(max_price) = query.max_price {
        sql_query = sql_query.filter(dsl::price_range.le(i16::from(max_price.get())));
    }
    if let Some(min_rating) = query.min_rating {
        sql_query = sql_query.filter(dsl::avg_rating.ge(min_rating.to_hundredths()));
    }

    if !query.cuisines.is_empty() {
        use schema::place_cuisine::dsl as cuisine_dsl;
        sql_query = sql_query.filter(
            dsl::rowid.eq_any(
                schema::place_cuisine::table
                    .select(cuisine_dsl::parent_rowid)
                    .filter(cuisine_dsl::cuisine.eq_any(&query.cuisines)),
            ),
        );
    }

    for dietary_type in &query.dietary_tags {
        use schema::place_dietary_tag::dsl as tag_dsl;
        let dietary_type: &str = dietary_type.as_ref();
        sql_query = sql_query.filter(
            dsl::rowid.eq_any(
                schema::place_dietary_tag::table
                    .select(tag_dsl::parent_rowid)
                    .filter(tag_dsl::dietary_type.eq(dietary_type))
                    .filter(tag_dsl::available.eq(true)),
            ),
        );
    }

    let rows = sql_query
        .order_by(dsl::rowid)
        .load::<models::PlaceEntity>(conn)
        .map_err(from_diesel_err)?;
    log::debug!("Loading {} place candidates", rows.len());
    load_places(conn, rows)
}

fn place_ids_after(conn: &mut SqliteConnection, after: Option<&str>, limit: u64) -> Result<Vec<Id>> {
    use schema::place::dsl;
    let mut query = schema::place::table
        .select(dsl::id)
        .order_by(dsl::id)
        .limit(i64::try_from(limit).unwrap_or(i64::MAX))
        .into_boxed();
    if let Some(after) = after {
        query = query.filter(dsl::id.gt(after));
    }
    Ok(query
        .load::<String>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn update_rating_aggregate(
    conn: &mut SqliteConnection,
    id: &str,
    expected: Option<&RatingAggregate>,
    aggregate: &RatingAggregate,
) -> Result<()> {
    use schema::place::dsl;
    debug_assert!(aggregate.is_valid());
    let new_values = (
        dsl::avg_rating.eq(aggregate.avg.to_hundredths()),
        dsl::rating_count.eq(from_count(aggregate.count)),
    );
    let count = if let Some(expected) = expected {
        // Optimistic locking on the previous aggregate
        diesel::update(
            schema::place::table
                .filter(dsl::id.eq(id))
                .filter(dsl::avg_rating.eq(expected.avg.to_hundredths()))
                .filter(dsl::rating_count.eq(from_count(expected.count))),
        )
        .set(new_values)
        .execute(conn)
    } else {
        diesel::update(schema::place::table.filter(dsl::id.eq(id)))
            .set(new_values)
            .execute(conn)
    }
    .map_err(from_diesel_err)?;
    debug_assert!(count <= 1);
    if count == 0 {
        // Either the place does not exist or the aggregate
        // has been modified concurrently
        resolve_place_rowid(conn, id)?;
        return Err(repo::Error::InvalidVersion);
    }
    Ok(())
}
