//! Domain primitives, ports, and services.
//!
//! Purpose: define the claim ledger and deal catalogue free of transport and
//! storage concerns. Operations are pure functions of explicit inputs; the
//! caller identity is always a parameter, never ambient state.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payloads.
//! - [`Claim`], [`ClaimStatus`], [`ClaimDecision`]: the ledger aggregate.
//! - [`Deal`] and [`AccessLevel`]: the referenced catalogue entity.
//! - [`Identity`] and [`Role`]: decoded caller identity.
//! - [`ports`]: trait seams to inbound and outbound adapters.

pub mod claim;
mod claims_service;
pub mod deal;
mod deal_service;
pub mod error;
pub mod identity;
pub mod ports;
pub mod user;

pub use self::claim::{Claim, ClaimDecision, ClaimDetails, ClaimId, ClaimStatus, ClaimWithDeal};
pub use self::claims_service::ClaimLedgerService;
pub use self::deal::{AccessLevel, Deal, DealCategory, DealId};
pub use self::deal_service::DealCatalogueService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{Identity, Role};
pub use self::user::{UserId, UserSummary};
