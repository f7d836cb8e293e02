use super::*;

pub fn create_place(
    connections: &sqlite::Connections,
    new_place: usecases::NewPlace,
) -> Result<Place> {
    let place = connections.exclusive()?.transaction(|conn| {
        usecases::create_new_place(conn, new_place, Timestamp::now()).map_err(|err| {
            warn!("Failed to create new place: {}", err);
            err
        })
    })?;
    info!("Created place {} ({})", place.id, place.name);
    Ok(place)
}
