use super::*;
use placetrust_core::search::{NearbyPlace, SearchCriteria, SearchResult};

pub fn find_nearby_places(
    connections: &sqlite::Connections,
    center: MapPoint,
    radius_km: f64,
    max_results: usize,
) -> Result<Vec<NearbyPlace>> {
    Ok(usecases::find_nearby_places(
        &connections.shared()?,
        center,
        radius_km,
        max_results,
    )?)
}

pub fn search_places(
    connections: &sqlite::Connections,
    criteria: &SearchCriteria,
) -> Result<SearchResult> {
    Ok(usecases::search_places(&connections.shared()?, criteria)?)
}
