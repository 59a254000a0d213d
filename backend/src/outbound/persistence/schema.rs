//! Diesel table definitions for the catalogue schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Category hierarchy. `parent_id` cascades deletes to descendants.
    categories (id) {
        id -> Int4,
        name -> Varchar,
        /// Unique slug derived from the name at creation time.
        slug -> Text,
        is_active -> Bool,
        parent_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Products, each owned by exactly one category.
    products (id) {
        id -> Int4,
        name -> Varchar,
        slug -> Text,
        is_active -> Bool,
        price -> Float8,
        in_stock -> Bool,
        category_id -> Int4,
    }
}

diesel::joinable!(products -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(categories, products);
