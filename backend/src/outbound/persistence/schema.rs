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
    /// User accounts table.
    ///
    /// Accounts are provisioned by the identity side of the platform; the
    /// ledger only reads them to resolve claimant summaries.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name shown in the admin review queue.
        name -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Deal catalogue table.
    deals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Short headline shown in the catalogue.
        title -> Varchar,
        /// Longer description of the offer.
        description -> Text,
        /// Category label: Design, Development, Marketing, Productivity,
        /// Finance, or Other.
        category -> Varchar,
        /// Human-readable discount terms.
        discount -> Varchar,
        /// Name of the SaaS partner providing the discount.
        partner_name -> Varchar,
        /// Partner logo displayed on deal cards.
        logo_url -> Varchar,
        /// Link the user follows to redeem an approved claim.
        redemption_link -> Nullable<Varchar>,
        /// Access level: `public` or `restricted`.
        access_level -> Varchar,
        /// Free-text eligibility conditions shown to users.
        eligibility_conditions -> Text,
        /// Whether the deal is highlighted on the landing page.
        featured -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Claim ledger table.
    ///
    /// Carries a unique index on `(user_id, deal_id)`; duplicate claims are
    /// rejected by the database, not by application-level checks.
    claims (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// The claiming user.
        user_id -> Uuid,
        /// The claimed deal.
        deal_id -> Uuid,
        /// Claim status: `pending`, `approved`, or `rejected`.
        status -> Varchar,
        /// When the claim was created.
        claimed_at -> Timestamptz,
    }
}

diesel::joinable!(claims -> users (user_id));
diesel::joinable!(claims -> deals (deal_id));

diesel::allow_tables_to_appear_in_same_query!(claims, deals, users);
