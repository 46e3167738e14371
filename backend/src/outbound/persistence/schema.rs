//! Diesel table definitions for the dispatch schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Chair owners. Owners authenticate with `access_token`.
    owners (id) {
        id -> Uuid,
        name -> Varchar,
        access_token -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Riders. Named `users` for compatibility with the existing data set.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        firstname -> Varchar,
        lastname -> Varchar,
        access_token -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    chairs (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        model -> Text,
        /// Availability flag toggled by the chair itself.
        is_active -> Bool,
        access_token -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ride requests. `chair_id` is null until matching assigns a chair.
    rides (id) {
        id -> Uuid,
        user_id -> Uuid,
        chair_id -> Nullable<Uuid>,
        pickup_latitude -> Int4,
        pickup_longitude -> Int4,
        destination_latitude -> Int4,
        destination_longitude -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only ride status history.
    ///
    /// Rows are ordered by `(created_at, seq)`; `seq` breaks timestamp ties.
    /// `chair_sent_at` is set exactly once, when the row is delivered to the
    /// assigned chair.
    ride_statuses (id) {
        id -> Uuid,
        seq -> Int8,
        ride_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
        chair_sent_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Append-only chair position log.
    chair_locations (id) {
        id -> Uuid,
        chair_id -> Uuid,
        latitude -> Int4,
        longitude -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(chairs -> owners (owner_id));
diesel::joinable!(rides -> users (user_id));
diesel::joinable!(rides -> chairs (chair_id));
diesel::joinable!(ride_statuses -> rides (ride_id));
diesel::joinable!(chair_locations -> chairs (chair_id));

diesel::allow_tables_to_appear_in_same_query!(
    owners,
    users,
    chairs,
    rides,
    ride_statuses,
    chair_locations,
);
