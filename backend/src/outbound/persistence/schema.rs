//! Diesel table definitions for the comment store.

diesel::table! {
    comments (id) {
        id -> Int8,
        username -> Varchar,
        content -> Text,
        image_id -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}
