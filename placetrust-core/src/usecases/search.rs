use super::prelude::*;
use crate::{
    geo::validate_radius,
    search::{self as engine, GeoFilter, NearbyPlace, SearchCriteria, SearchResult},
};

/// Listed places within `radius_km` around `center` ordered by distance.
pub fn find_nearby_places<R: PlaceRepo>(
    repo: &R,
    center: MapPoint,
    radius_km: f64,
    max_results: usize,
) -> Result<Vec<NearbyPlace>> {
    let radius = validate_radius(Distance::from_km(radius_km))?;
    let bbox = MapBbox::around(center, radius);
    let candidates = repo.nearby_place_candidates(&bbox)?;
    log::debug!(
        "Found {} candidates around {} within {} km",
        candidates.len(),
        center,
        radius_km
    );
    Ok(engine::find_nearby(candidates, center, radius, max_results))
}

pub fn search_places<R: PlaceRepo>(repo: &R, criteria: &SearchCriteria) -> Result<SearchResult> {
    if let Some(GeoFilter { radius, .. }) = criteria.geo {
        validate_radius(radius)?;
    }
    if criteria.is_unsatisfiable() {
        log::debug!("Unsatisfiable search criteria: {:?}", criteria);
        return Ok(SearchResult::default());
    }
    let candidates = repo.query_places(&criteria.place_query())?;
    Ok(engine::search(candidates, criteria))
}
