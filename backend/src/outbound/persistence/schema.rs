//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts that own a favorites collection.
    users (id) {
        /// Primary key: UUID identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (user, country) favorite.
    ///
    /// The composite primary key makes a duplicate favorite unrepresentable.
    favorite_countries (user_id, code) {
        /// Owning user.
        user_id -> Uuid,
        /// Country code, unique per user.
        code -> Text,
        /// Denormalised country name.
        name -> Nullable<Text>,
        /// Denormalised flag image URL.
        flag -> Nullable<Text>,
        /// Wall-clock time of the insert.
        created_at -> Timestamptz,
        /// Insertion sequence; the collection order.
        seq -> Int8,
    }
}

diesel::joinable!(favorite_countries -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, favorite_countries);
