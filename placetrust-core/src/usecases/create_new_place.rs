use std::collections::BTreeMap;

use super::prelude::*;
use crate::util::validate::{AutoCorrect, Validate};

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub name           : String,
    pub address        : String,
    pub lat            : f64,
    pub lng            : f64,
    pub price_range    : i64,
    pub cuisines       : Vec<String>,
    pub dietary_tags   : Vec<(String, bool)>,
    pub dietary_scores : Vec<(String, f64)>,
    pub opening_hours  : Option<String>,
    pub claimed_by     : Option<String>,
    pub verified       : bool,
}

pub fn prepare_new_place(new_place: NewPlace, now: Timestamp) -> Result<Place> {
    let NewPlace {
        name,
        address,
        lat,
        lng,
        price_range,
        cuisines,
        dietary_tags,
        dietary_scores,
        opening_hours,
        claimed_by,
        verified,
    } = new_place;
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng)?;
    let price_range = PriceRange::new(price_range)?;
    let dietary_tags = dietary_tags
        .iter()
        .map(|(key, available)| -> Result<_> { Ok((DietaryType::parse(key)?, *available)) })
        .collect::<Result<BTreeMap<_, _>>>()?;
    let dietary_scores = dietary_scores
        .iter()
        .map(|(key, score)| -> Result<_> { Ok((DietaryType::parse(key)?, *score)) })
        .collect::<Result<BTreeMap<_, _>>>()?;
    let opening_hours = opening_hours
        .as_deref()
        .map(str::parse::<OpeningHours>)
        .transpose()?;
    let place = Place {
        id: Id::new(),
        name,
        address,
        pos,
        price_range,
        cuisines: normalize_cuisines(cuisines.iter().map(String::as_str)),
        dietary_tags,
        dietary_scores,
        opening_hours,
        rating: RatingAggregate::empty(),
        status: PlaceStatus::Active,
        deleted: false,
        claimed_by: claimed_by.map(Id::from),
        verified,
        created_at: now,
        updated_at: now,
    }
    .auto_correct();
    place.validate()?;
    Ok(place)
}

pub fn create_new_place<R: PlaceRepo>(repo: &R, new_place: NewPlace, now: Timestamp) -> Result<Place> {
    let place = prepare_new_place(new_place, now)?;
    log::debug!("Creating new place {} ({})", place.id, place.name);
    repo.create_place(&place)?;
    Ok(place)
}
