#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub points: i64,
    pub review_count: i64,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub rowid: i64,
    pub id: String,
    pub points: i64,
    pub review_count: i64,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = place)]
pub struct NewPlace<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub address: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub price_range: i16,
    pub opening_hours: Option<&'a str>,
    pub status: i16,
    pub deleted: bool,
    pub claimed_by: Option<&'a str>,
    pub verified: bool,
    pub avg_rating: i64,
    pub rating_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct PlaceEntity {
    pub rowid: i64,
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub price_range: i16,
    pub opening_hours: Option<String>,
    pub status: i16,
    pub deleted: bool,
    pub claimed_by: Option<String>,
    pub verified: bool,
    pub avg_rating: i64,
    pub rating_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = place_cuisine)]
pub struct PlaceCuisine {
    pub parent_rowid: i64,
    pub cuisine: String,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = place_dietary_tag)]
pub struct PlaceDietaryTag {
    pub parent_rowid: i64,
    pub dietary_type: String,
    pub available: bool,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = place_dietary_score)]
pub struct PlaceDietaryScore {
    pub parent_rowid: i64,
    pub dietary_type: String,
    pub score: f64,
}

#[derive(Insertable)]
#[diesel(table_name = review)]
pub struct NewReview<'a> {
    pub id: &'a str,
    pub author_id: &'a str,
    pub place_id: &'a str,
    pub rating: i16,
    pub text: &'a str,
    pub check_in_lat: Option<f64>,
    pub check_in_lng: Option<f64>,
    pub helpful_count: i64,
    pub not_helpful_count: i64,
    pub status: i16,
    pub deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct ReviewEntity {
    pub rowid: i64,
    pub id: String,
    pub author_id: String,
    pub place_id: String,
    pub rating: i16,
    pub text: String,
    pub check_in_lat: Option<f64>,
    pub check_in_lng: Option<f64>,
    pub helpful_count: i64,
    pub not_helpful_count: i64,
    pub status: i16,
    pub deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = review_photo)]
pub struct ReviewPhoto {
    pub parent_rowid: i64,
    pub position: i64,
    pub url: String,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = review_dietary_accuracy)]
pub struct ReviewDietaryAccuracy {
    pub parent_rowid: i64,
    pub dietary_type: String,
    pub accuracy: String,
}

#[derive(Insertable)]
#[diesel(table_name = helpfulness_vote)]
pub struct NewHelpfulnessVote<'a> {
    pub id: &'a str,
    pub review_id: &'a str,
    pub voter_id: &'a str,
    pub helpful: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct HelpfulnessVoteEntity {
    pub rowid: i64,
    pub id: String,
    pub review_id: String,
    pub voter_id: String,
    pub helpful: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
