///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (rowid) {
        rowid -> BigInt,
        id -> Text,
        points -> BigInt,
        review_count -> BigInt,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Places
///////////////////////////////////////////////////////////////////////

table! {
    place (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        address -> Text,
        lat -> Double,
        lng -> Double,
        price_range -> SmallInt,
        opening_hours -> Nullable<Text>,
        status -> SmallInt,
        deleted -> Bool,
        claimed_by -> Nullable<Text>,
        verified -> Bool,
        avg_rating -> BigInt,
        rating_count -> BigInt,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

table! {
    place_cuisine (parent_rowid, cuisine) {
        parent_rowid -> BigInt,
        cuisine -> Text,
    }
}

joinable!(place_cuisine -> place (parent_rowid));

table! {
    place_dietary_tag (parent_rowid, dietary_type) {
        parent_rowid -> BigInt,
        dietary_type -> Text,
        available -> Bool,
    }
}

joinable!(place_dietary_tag -> place (parent_rowid));

table! {
    place_dietary_score (parent_rowid, dietary_type) {
        parent_rowid -> BigInt,
        dietary_type -> Text,
        score -> Double,
    }
}

joinable!(place_dietary_score -> place (parent_rowid));

///////////////////////////////////////////////////////////////////////
// Reviews
///////////////////////////////////////////////////////////////////////

table! {
    review (rowid) {
        rowid -> BigInt,
        id -> Text,
        author_id -> Text,
        place_id -> Text,
        rating -> SmallInt,
        text -> Text,
        check_in_lat -> Nullable<Double>,
        check_in_lng -> Nullable<Double>,
        helpful_count -> BigInt,
        not_helpful_count -> BigInt,
        status -> SmallInt,
        deleted -> Bool,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

table! {
    review_photo (parent_rowid, position) {
        parent_rowid -> BigInt,
        position -> BigInt,
        url -> Text,
    }
}

joinable!(review_photo -> review (parent_rowid));

table! {
    review_dietary_accuracy (parent_rowid, dietary_type) {
        parent_rowid -> BigInt,
        dietary_type -> Text,
        accuracy -> Text,
    }
}

joinable!(review_dietary_accuracy -> review (parent_rowid));

table! {
    helpfulness_vote (rowid) {
        rowid -> BigInt,
        id -> Text,
        review_id -> Text,
        voter_id -> Text,
        helpful -> Bool,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////

allow_tables_to_appear_in_same_query!(
    helpfulness_vote,
    place,
    place_cuisine,
    place_dietary_score,
    place_dietary_tag,
    review,
    review_dietary_accuracy,
    review_photo,
    users,
);
