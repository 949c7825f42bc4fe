//! Claim ledger services.
//!
//! [`ClaimLedgerService`] implements the claim driving ports: eligibility
//! checks at creation, administrator verdicts, and read-side joins for the
//! dashboard and review queue. Duplicate prevention is delegated to the
//! repository's uniqueness constraint so concurrent creates race safely.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::Error;
use crate::domain::claim::{Claim, ClaimDetails, ClaimWithDeal};
use crate::domain::deal::{Deal, DealId};
use crate::domain::identity::Identity;
use crate::domain::ports::{
    ClaimRepository, ClaimRepositoryError, ClaimsCommand, ClaimsQuery, CreateClaimRequest,
    DealRepository, DealRepositoryError, NewClaim, UpdateClaimStatusRequest, UserDirectory,
    UserDirectoryError,
};
use crate::domain::user::{UserId, UserSummary};

fn map_claim_repository_error(error: ClaimRepositoryError) -> Error {
    match error {
        ClaimRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("claim ledger unavailable: {message}"))
        }
        ClaimRepositoryError::Query { message } => {
            Error::internal(format!("claim ledger error: {message}"))
        }
        ClaimRepositoryError::Duplicate => Error::conflict("You have already claimed this deal"),
    }
}

fn map_deal_repository_error(error: DealRepositoryError) -> Error {
    match error {
        DealRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("deal catalogue unavailable: {message}"))
        }
        DealRepositoryError::Query { message } => {
            Error::internal(format!("deal catalogue error: {message}"))
        }
    }
}

fn map_user_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

/// Claim ledger service implementing the command and query driving ports.
#[derive(Clone)]
pub struct ClaimLedgerService<C, D, U> {
    claim_repo: Arc<C>,
    deal_repo: Arc<D>,
    user_directory: Arc<U>,
}

impl<C, D, U> ClaimLedgerService<C, D, U> {
    /// Create a new service over the ledger's driven ports.
    pub fn new(claim_repo: Arc<C>, deal_repo: Arc<D>, user_directory: Arc<U>) -> Self {
        Self {
            claim_repo,
            deal_repo,
            user_directory,
        }
    }
}

impl<C, D, U> ClaimLedgerService<C, D, U>
where
    C: ClaimRepository,
    D: DealRepository,
    U: UserDirectory,
{
    /// Batch-resolve the deals referenced by a set of claims.
    async fn resolve_deals(&self, claims: &[Claim]) -> Result<HashMap<DealId, Deal>, Error> {
        let mut deal_ids: Vec<DealId> = claims.iter().map(|claim| claim.deal_id).collect();
        deal_ids.sort_unstable_by_key(|id| *id.as_uuid());
        deal_ids.dedup();

        let deals = self
            .deal_repo
            .find_by_ids(&deal_ids)
            .await
            .map_err(map_deal_repository_error)?;
        Ok(deals.into_iter().map(|deal| (deal.id, deal)).collect())
    }

    /// Batch-resolve the claimants referenced by a set of claims.
    async fn resolve_claimants(
        &self,
        claims: &[Claim],
    ) -> Result<HashMap<UserId, UserSummary>, Error> {
        let mut user_ids: Vec<UserId> = claims.iter().map(|claim| claim.user_id).collect();
        user_ids.sort_unstable_by_key(|id| *id.as_uuid());
        user_ids.dedup();

        let summaries = self
            .user_directory
            .find_summaries(&user_ids)
            .await
            .map_err(map_user_directory_error)?;
        Ok(summaries
            .into_iter()
            .map(|summary| (summary.id, summary))
            .collect())
    }
}

#[async_trait]
impl<C, D, U> ClaimsCommand for ClaimLedgerService<C, D, U>
where
    C: ClaimRepository,
    D: DealRepository,
    U: UserDirectory,
{
    async fn create_claim(&self, request: CreateClaimRequest) -> Result<Claim, Error> {
        let CreateClaimRequest { caller, deal_id } = request;

        let deal = self
            .deal_repo
            .find_by_id(&deal_id)
            .await
            .map_err(map_deal_repository_error)?
            .ok_or_else(|| Error::not_found("Deal not found"))?;

        // Verification is checked once, at creation; later account changes
        // do not retroactively affect existing claims.
        if deal.requires_verification() && !caller.verified {
            return Err(Error::forbidden(
                "This deal is restricted to verified users only",
            ));
        }

        // The duplicate check is not pre-flighted here: the repository's
        // unique index decides, so two concurrent creates cannot both win.
        self.claim_repo
            .insert(NewClaim {
                user_id: caller.user_id,
                deal_id,
            })
            .await
            .map_err(map_claim_repository_error)
    }

    async fn update_claim_status(
        &self,
        request: UpdateClaimStatusRequest,
    ) -> Result<Claim, Error> {
        let UpdateClaimStatusRequest {
            caller,
            claim_id,
            decision,
        } = request;
        caller.require_admin()?;

        self.claim_repo
            .update_status(&claim_id, decision.as_status())
            .await
            .map_err(map_claim_repository_error)?
            .ok_or_else(|| Error::not_found("Claim not found"))
    }
}

#[async_trait]
impl<C, D, U> ClaimsQuery for ClaimLedgerService<C, D, U>
where
    C: ClaimRepository,
    D: DealRepository,
    U: UserDirectory,
{
    async fn list_claims_for_user(
        &self,
        caller: &Identity,
    ) -> Result<Vec<ClaimWithDeal>, Error> {
        let claims = self
            .claim_repo
            .list_for_user(&caller.user_id)
            .await
            .map_err(map_claim_repository_error)?;
        let deals = self.resolve_deals(&claims).await?;

        Ok(claims
            .into_iter()
            .filter_map(|claim| match deals.get(&claim.deal_id) {
                Some(deal) => Some(ClaimWithDeal {
                    deal: deal.clone(),
                    claim,
                }),
                None => {
                    warn!(claim_id = %claim.id, deal_id = %claim.deal_id, "claim references missing deal");
                    None
                }
            })
            .collect())
    }

    async fn list_all_claims(&self, caller: &Identity) -> Result<Vec<ClaimDetails>, Error> {
        caller.require_admin()?;

        let claims = self
            .claim_repo
            .list_all()
            .await
            .map_err(map_claim_repository_error)?;
        let deals = self.resolve_deals(&claims).await?;
        let claimants = self.resolve_claimants(&claims).await?;

        Ok(claims
            .into_iter()
            .filter_map(
                |claim| match (deals.get(&claim.deal_id), claimants.get(&claim.user_id)) {
                    (Some(deal), Some(claimant)) => Some(ClaimDetails {
                        deal: deal.clone(),
                        claimant: claimant.clone(),
                        claim,
                    }),
                    _ => {
                        warn!(claim_id = %claim.id, "claim references missing deal or user");
                        None
                    }
                },
            )
            .collect())
    }
}

#[cfg(test)]
#[path = "claims_service_tests.rs"]
mod tests;
