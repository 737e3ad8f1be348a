//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep in sync with the SQL migrations; regenerate with
//! `diesel print-schema` after schema changes.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lower-cased.
    users (id) {
        id -> Uuid,
        #[max_length = 255]
        email -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tracked issues. `status` and `priority` are CHECK-constrained to the
    /// domain literals.
    issues (id) {
        id -> Int4,
        #[max_length = 100]
        title -> Varchar,
        description -> Nullable<Text>,
        #[max_length = 20]
        status -> Varchar,
        #[max_length = 20]
        priority -> Varchar,
        #[max_length = 255]
        user_id -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(issues, users);
