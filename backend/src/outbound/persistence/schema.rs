//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered users, keyed on the external identity provider subject.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Stable subject identifier from the identity provider.
        external_id -> Varchar,
        /// Email address reported by the provider.
        email -> Varchar,
        /// Display name (max 100 characters).
        display_name -> Varchar,
        /// Optional unique handle (max 30 characters).
        nickname -> Nullable<Varchar>,
        /// Optional avatar URL.
        picture_url -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Short text/image posts.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Authoring user; rows cascade away with the user.
        author_id -> Uuid,
        /// Post body (max 5000 characters, enforced in the domain).
        content -> Text,
        /// Optional image URL.
        image_url -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Like rows; the composite key is the at-most-one-like invariant.
    likes (user_id, post_id) {
        /// Liking user.
        user_id -> Uuid,
        /// Liked post.
        post_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on posts.
    comments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Commented post; rows cascade away with the post.
        post_id -> Uuid,
        /// Authoring user.
        author_id -> Uuid,
        /// Comment body (max 1000 characters).
        content -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Follow edges; the composite key deduplicates follow requests.
    follows (follower_id, following_id) {
        /// Following user.
        follower_id -> Uuid,
        /// Followed user.
        following_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notification rows; unread rows are deleted on mark-read.
    notifications (id) {
        /// Primary key: sequential identifier.
        id -> Int8,
        /// User the notification is for.
        recipient_id -> Uuid,
        /// User whose action produced the notification.
        actor_id -> Uuid,
        /// Event category: like, comment or follow.
        kind -> Varchar,
        /// Post the event refers to, absent for follows.
        post_id -> Nullable<Uuid>,
        /// Read flag; current semantics delete rows instead of setting it.
        is_read -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

// follows and notifications reference users twice, so joins against users
// spell out their ON clause explicitly instead of using joinable!.
diesel::joinable!(posts -> users (author_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(likes -> posts (post_id));
diesel::joinable!(notifications -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    posts,
    likes,
    comments,
    follows,
    notifications,
);
