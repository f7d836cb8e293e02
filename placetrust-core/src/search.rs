//! Filtering, geospatial ranking and pagination of places.
//!
//! All functions operate on a candidate set that has been
//! pre-filtered by the storage and re-apply every predicate.

use std::cmp::Ordering;

use crate::{entities::*, repositories::PlaceQuery, text};

pub const DEFAULT_MAX_NEARBY_RESULTS: usize = 50;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
    pub center: MapPoint,
    pub radius: Distance,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub search_term  : Option<String>,
    pub cuisines     : Vec<String>,
    /// All given tags must be offered (AND)
    pub dietary_tags : Vec<DietaryType>,
    pub min_price    : Option<i64>,
    pub max_price    : Option<i64>,
    pub min_rating   : Option<f64>,
    pub geo          : Option<GeoFilter>,
    /// 1-based
    pub page         : i64,
    pub page_size    : i64,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            search_term: None,
            cuisines: vec![],
            dietary_tags: vec![],
            min_price: None,
            max_price: None,
            min_rating: None,
            geo: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchCriteria {
    /// Criteria that no place can ever match.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!((self.min_price, self.max_price), (Some(min), Some(max)) if min > max)
            || self.min_rating.is_some_and(f64::is_nan)
    }

    fn normalized_cuisines(&self) -> Vec<String> {
        self.cuisines
            .iter()
            .filter_map(|c| normalize_cuisine(c))
            .collect()
    }

    /// The storage-side pre-filter for these criteria.
    pub fn place_query(&self) -> PlaceQuery {
        PlaceQuery {
            bbox: self
                .geo
                .map(|GeoFilter { center, radius }| MapBbox::around(center, radius)),
            cuisines: self.normalized_cuisines(),
            dietary_tags: self.dietary_tags.clone(),
            min_price: self.min_price.and_then(|p| PriceRange::new(p).ok()),
            max_price: self.max_price.and_then(|p| PriceRange::new(p).ok()),
            // Rounded down to keep the pre-filter inclusive
            min_rating: self
                .min_rating
                .filter(|r| r.is_finite() && *r > 0.0)
                .map(|r| AvgRatingValue::from_hundredths((r * 100.0).floor() as i64)),
        }
    }

    fn offset_and_limit(&self) -> (usize, usize) {
        let page = self.page.max(1) as u64;
        let page_size = self.page_size.max(1) as u64;
        let offset = (page - 1).saturating_mul(page_size);
        (
            usize::try_from(offset).unwrap_or(usize::MAX),
            usize::try_from(page_size).unwrap_or(usize::MAX),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    pub place: Place,
    pub distance: Distance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub place: Place,
    /// Only available for geo searches
    pub distance: Option<Distance>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
    /// Number of matching places before pagination
    pub total_count: usize,
}

fn cmp_by_distance(lhs: (&Place, Distance), rhs: (&Place, Distance)) -> Ordering {
    lhs.1
        .partial_cmp(&rhs.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| lhs.0.id.cmp(&rhs.0.id))
}

fn cmp_by_rating(lhs: &Place, rhs: &Place) -> Ordering {
    rhs.rating
        .avg
        .cmp(&lhs.rating.avg)
        .then_with(|| rhs.rating.count.cmp(&lhs.rating.count))
        .then_with(|| lhs.id.cmp(&rhs.id))
}

/// Computes the distance once and keeps the place if within the radius.
fn with_distance_within(place: Place, center: MapPoint, radius: Distance) -> Option<NearbyPlace> {
    let distance = MapPoint::distance(center, place.pos);
    distance
        .is_within(radius)
        .then_some(NearbyPlace { place, distance })
}

/// Listed places within the radius ordered by ascending distance.
pub fn find_nearby(
    candidates: Vec<Place>,
    center: MapPoint,
    radius: Distance,
    max_results: usize,
) -> Vec<NearbyPlace> {
    let mut nearby: Vec<_> = candidates
        .into_iter()
        .filter(Place::is_listed)
        .filter_map(|place| with_distance_within(place, center, radius))
        .collect();
    nearby.sort_by(|lhs, rhs| {
        cmp_by_distance((&lhs.place, lhs.distance), (&rhs.place, rhs.distance))
    });
    nearby.truncate(max_results);
    nearby
}

fn matches_name_or_address(place: &Place, term: &str) -> bool {
    text::contains_lowercase(&place.name, term) || text::contains_lowercase(&place.address, term)
}

fn matches_cuisine_tag(place: &Place, term: &str) -> bool {
    place.cuisines.iter().any(|c| c.contains(term))
}

/// Union of the places matching by name/address and those matching
/// by cuisine tag, in candidate order.
pub fn match_search_term(candidates: Vec<Place>, term: &str) -> Vec<Place> {
    let Some(term) = text::normalize_search_term(term) else {
        return candidates;
    };
    let (mut matching, rest): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|p| matches_name_or_address(p, &term));
    let by_cuisine = rest.into_iter().filter(|p| matches_cuisine_tag(p, &term));
    matching.extend(by_cuisine);
    matching
}

fn matches_attributes(place: &Place, criteria: &SearchCriteria, cuisines: &[String]) -> bool {
    if !cuisines.is_empty() && !cuisines.iter().any(|c| place.cuisines.contains(c)) {
        return false;
    }
    if !criteria
        .dietary_tags
        .iter()
        .all(|t| place.offers_dietary(*t))
    {
        return false;
    }
    let price = i64::from(place.price_range);
    if criteria.min_price.is_some_and(|min| price < min) {
        return false;
    }
    if criteria.max_price.is_some_and(|max| price > max) {
        return false;
    }
    if criteria
        .min_rating
        .is_some_and(|min| place.rating.avg.to_f64() < min)
    {
        return false;
    }
    true
}

fn paginate<T>(items: Vec<T>, criteria: &SearchCriteria) -> Vec<T> {
    let (offset, limit) = criteria.offset_and_limit();
    items.into_iter().skip(offset).take(limit).collect()
}

/// Filters, orders and paginates the candidates.
///
/// With a geo filter the result is ordered by ascending distance,
/// otherwise by descending average rating and review count.
pub fn search(candidates: Vec<Place>, criteria: &SearchCriteria) -> SearchResult {
    if criteria.is_unsatisfiable() {
        return SearchResult::default();
    }
    let listed = candidates.into_iter().filter(Place::is_listed).collect();
    let matching = match &criteria.search_term {
        Some(term) => match_search_term(listed, term),
        None => listed,
    };
    let cuisines = criteria.normalized_cuisines();
    let filtered = matching
        .into_iter()
        .filter(|p| matches_attributes(p, criteria, &cuisines));
    let hits: Vec<_> = if let Some(GeoFilter { center, radius }) = criteria.geo {
        let mut nearby: Vec<_> = filtered
            .filter_map(|place| with_distance_within(place, center, radius))
            .collect();
        nearby.sort_by(|lhs, rhs| {
            cmp_by_distance((&lhs.place, lhs.distance), (&rhs.place, rhs.distance))
        });
        nearby
            .into_iter()
            .map(|NearbyPlace { place, distance }| SearchHit {
                place,
                distance: Some(distance),
            })
            .collect()
    } else {
        let mut places: Vec<_> = filtered.collect();
        places.sort_by(cmp_by_rating);
        places
            .into_iter()
            .map(|place| SearchHit {
                place,
                distance: None,
            })
            .collect()
    };
    let total_count = hits.len();
    SearchResult {
        hits: paginate(hits, criteria),
        total_count,
    }
}
