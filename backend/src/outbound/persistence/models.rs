//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{claims, deals, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Deal models
// ---------------------------------------------------------------------------

/// Row struct for reading from the deals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = deals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DealRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub discount: String,
    pub partner_name: String,
    pub logo_url: String,
    pub redemption_link: Option<String>,
    pub access_level: String,
    pub eligibility_conditions: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new deal records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = deals)]
pub(crate) struct NewDealRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub discount: &'a str,
    pub partner_name: &'a str,
    pub logo_url: &'a str,
    pub redemption_link: Option<&'a str>,
    pub access_level: &'a str,
    pub eligibility_conditions: &'a str,
    pub featured: bool,
}

// ---------------------------------------------------------------------------
// Claim models
// ---------------------------------------------------------------------------

/// Row struct for reading from the claims table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = claims)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClaimRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub deal_id: Uuid,
    pub status: String,
    pub claimed_at: DateTime<Utc>,
}

/// Insertable struct for creating new claim records.
///
/// `status` and `claimed_at` carry database defaults (`pending`, `now()`).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = claims)]
pub(crate) struct NewClaimRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub deal_id: Uuid,
}
