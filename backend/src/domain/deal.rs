//! Deal catalogue entities.
//!
//! Deals are partner discounts browsed by startups. The claim ledger reads a
//! deal's existence and access level during eligibility checks; catalogue
//! writes happen outside the HTTP surface (see the `seed-deals` binary).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, ErrorCode};

/// Identifier of a catalogue deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DealId(Uuid);

impl DealId {
    /// Parse an identifier from its string form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw.as_ref()).map(Self)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID value.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for DealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who may claim a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Claimable by any authenticated user.
    Public,
    /// Claimable only by verified accounts.
    Restricted,
}

impl AccessLevel {
    /// Stable wire representation of the access level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Restricted => "restricted",
        }
    }
}

impl std::str::FromStr for AccessLevel {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "public" => Ok(Self::Public),
            "restricted" => Ok(Self::Restricted),
            other => Err(Error::new(
                ErrorCode::InvalidRequest,
                format!("unrecognised access level: {other}"),
            )),
        }
    }
}

/// Partner category a deal is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealCategory {
    /// Design tooling.
    Design,
    /// Developer tooling and infrastructure.
    Development,
    /// Marketing and growth platforms.
    Marketing,
    /// Productivity suites.
    Productivity,
    /// Finance and accounting services.
    Finance,
    /// Everything else.
    Other,
}

impl DealCategory {
    /// Stable wire representation of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Design => "Design",
            Self::Development => "Development",
            Self::Marketing => "Marketing",
            Self::Productivity => "Productivity",
            Self::Finance => "Finance",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for DealCategory {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Design" => Ok(Self::Design),
            "Development" => Ok(Self::Development),
            "Marketing" => Ok(Self::Marketing),
            "Productivity" => Ok(Self::Productivity),
            "Finance" => Ok(Self::Finance),
            "Other" => Ok(Self::Other),
            other => Err(Error::new(
                ErrorCode::InvalidRequest,
                format!("unrecognised deal category: {other}"),
            )),
        }
    }
}

/// A partner discount offered through the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    /// Deal identifier.
    pub id: DealId,
    /// Short headline shown in the catalogue.
    pub title: String,
    /// Longer description of the offer.
    pub description: String,
    /// Category the deal is filed under.
    pub category: DealCategory,
    /// Human-readable discount terms, e.g. "50% off for 12 months".
    pub discount: String,
    /// Name of the SaaS partner providing the discount.
    pub partner_name: String,
    /// Partner logo displayed on deal cards.
    pub logo_url: String,
    /// Link the user follows to redeem an approved claim.
    pub redemption_link: Option<String>,
    /// Whether the deal is open to all users or gated behind verification.
    pub access_level: AccessLevel,
    /// Free-text eligibility conditions shown to users.
    pub eligibility_conditions: String,
    /// Whether the deal is highlighted on the landing page.
    pub featured: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Whether claiming this deal requires a verified account.
    pub fn requires_verification(&self) -> bool {
        self.access_level == AccessLevel::Restricted
    }
}
