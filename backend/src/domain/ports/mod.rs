//! Domain ports: trait seams between the domain and its adapters.
//!
//! Driving ports ([`ClaimsCommand`], [`ClaimsQuery`], [`DealsQuery`]) are
//! implemented by domain services and consumed by inbound adapters. Driven
//! ports ([`ClaimRepository`], [`DealRepository`], [`UserDirectory`],
//! [`IdentityVerifier`]) are implemented by outbound adapters.

mod claim_repository;
mod claims;
mod deal_repository;
mod deals;
mod identity_verifier;
mod user_directory;

pub use claim_repository::{ClaimRepository, ClaimRepositoryError, NewClaim};
pub use claims::{ClaimsCommand, ClaimsQuery, CreateClaimRequest, UpdateClaimStatusRequest};
pub use deal_repository::{DealRepository, DealRepositoryError, NewDeal};
pub use deals::DealsQuery;
pub use identity_verifier::{IdentityVerifier, IdentityVerifierError};
pub use user_directory::{UserDirectory, UserDirectoryError};

#[cfg(test)]
pub use claim_repository::MockClaimRepository;
#[cfg(test)]
pub use claims::{MockClaimsCommand, MockClaimsQuery};
#[cfg(test)]
pub use deal_repository::MockDealRepository;
#[cfg(test)]
pub use deals::MockDealsQuery;
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
