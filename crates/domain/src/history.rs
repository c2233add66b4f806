use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::DomainResult;
use crate::contract::{Contract, ContractPackageSubmission, ContractRevisionWithRates};
use crate::error::DomainError;
use crate::ports::store::{ContractStore, RateStore, RawContract, RawRate};
use crate::rate::{Rate, RatePackageSubmission, RateRevisionWithContracts, RateSummary};
use crate::revision_sets::{contract_revision_sets, rate_revision_sets};
use crate::status::{self, PackageStatus, RevisionStamp};
use crate::validation;

pub fn parse_contract_with_history(raw: &RawContract) -> DomainResult<Contract> {
    parse_contract(raw, true)
}

pub fn parse_contract_without_draft_rates(raw: &RawContract) -> DomainResult<Contract> {
    parse_contract(raw, false)
}

fn parse_contract(raw: &RawContract, include_draft_rates: bool) -> DomainResult<Contract> {
    let sets = contract_revision_sets(raw)?;
    let stamps = contract_stamps(raw);
    let package_status = status::classify(&raw.id, &stamps)?;
    let consolidated_status = status::consolidate(&package_status, &raw.review_actions);
    let initial_submitted_at_ms = status::initial_submitted_at(&stamps);

    let draft_revision = sets.draft.map(|draft| ContractRevisionWithRates {
        revision: draft.contract_revision,
        submit_info: None,
        unlock_info: draft.unlock_info,
        rate_revisions: draft.rate_revisions,
    });

    let revisions: Vec<ContractRevisionWithRates> = sets
        .submitted
        .iter()
        .map(|set| ContractRevisionWithRates {
            revision: set.contract_revision.clone(),
            submit_info: Some(set.submit_info.clone()),
            unlock_info: set.unlock_info.clone(),
            rate_revisions: set.rate_revisions.clone(),
        })
        .collect();

    let package_submissions: Vec<ContractPackageSubmission> = sets
        .submitted
        .into_iter()
        .map(|set| ContractPackageSubmission {
            submit_info: set.submit_info,
            cause: set.cause,
            submitted_revisions: set.submitted_revisions,
            contract_revision: set.contract_revision,
            rate_revisions: set.rate_revisions,
        })
        .collect();

    if let Some(draft) = &draft_revision {
        validation::validate_contract_draft(&draft.revision.form_data)?;
        for rate_revision in &draft.rate_revisions {
            validation::validate_rate_draft(&rate_revision.form_data)?;
        }
    }
    for revision in &revisions {
        validation::validate_contract_draft(&revision.revision.form_data)?;
        for rate_revision in &revision.rate_revisions {
            validation::validate_rate_draft(&rate_revision.form_data)?;
        }
    }

    let draft_rates = if include_draft_rates {
        let mut rates = Vec::with_capacity(raw.draft_rates.len());
        for raw_rate in &raw.draft_rates {
            rates.push(parse_rate_with_history(raw_rate)?);
        }
        rates
    } else {
        Vec::new()
    };

    Ok(Contract {
        id: raw.id.clone(),
        state_code: raw.state_code.clone(),
        state_number: raw.state_number,
        status: package_status,
        consolidated_status,
        initial_submitted_at_ms,
        draft_revision,
        draft_rates,
        revisions,
        package_submissions,
    })
}

pub fn parse_rate_with_history(raw: &RawRate) -> DomainResult<Rate> {
    let sets = rate_revision_sets(raw)?;
    let stamps = rate_stamps(raw);
    let package_status = status::classify(&raw.id, &stamps)?;
    let consolidated_status = status::consolidate(&package_status, &raw.review_actions);
    let initial_submitted_at_ms = status::initial_submitted_at(&stamps);

    let parent_contract_id = match sets.parent_contract_id.clone() {
        Some(contract_id) => contract_id,
        None => owning_draft_contract(raw)?,
    };

    let draft_revision = sets.draft.map(|draft| RateRevisionWithContracts {
        revision: draft.rate_revision,
        submit_info: None,
        unlock_info: draft.unlock_info,
        contract_revisions: draft.contract_revisions,
    });

    let revisions: Vec<RateRevisionWithContracts> = sets
        .submitted
        .iter()
        .map(|set| RateRevisionWithContracts {
            revision: set.rate_revision.clone(),
            submit_info: Some(set.submit_info.clone()),
            unlock_info: set.unlock_info.clone(),
            contract_revisions: set.contract_revisions.clone(),
        })
        .collect();

    let package_submissions: Vec<RatePackageSubmission> = sets
        .submitted
        .into_iter()
        .map(|set| RatePackageSubmission {
            submit_info: set.submit_info,
            cause: set.cause,
            submitted_revisions: set.submitted_revisions,
            rate_revision: set.rate_revision,
            contract_revisions: set.contract_revisions,
        })
        .collect();

    if let Some(draft) = &draft_revision {
        validation::validate_rate_draft(&draft.revision.form_data)?;
        for contract_revision in &draft.contract_revisions {
            validation::validate_contract_draft(&contract_revision.form_data)?;
        }
    }
    for revision in &revisions {
        validation::validate_rate_draft(&revision.revision.form_data)?;
        for contract_revision in &revision.contract_revisions {
            validation::validate_contract_draft(&contract_revision.form_data)?;
        }
    }

    Ok(Rate {
        id: raw.id.clone(),
        state_code: raw.state_code.clone(),
        state_number: raw.state_number,
        parent_contract_id,
        status: package_status,
        consolidated_status,
        initial_submitted_at_ms,
        draft_revision,
        revisions,
        package_submissions,
    })
}

pub fn parse_rate_summary(raw: &RawRate) -> DomainResult<RateSummary> {
    let sets = rate_revision_sets(raw)?;
    let stamps = rate_stamps(raw);
    let package_status = status::classify(&raw.id, &stamps)?;
    let consolidated_status = status::consolidate(&package_status, &raw.review_actions);
    let initial_submitted_at_ms = status::initial_submitted_at(&stamps);

    let parent_contract_id = sets.parent_contract_id.clone().or_else(|| {
        match raw.draft_contracts.as_slice() {
            [only] => Some(only.id.clone()),
            _ => None,
        }
    });

    Ok(RateSummary {
        id: raw.id.clone(),
        state_code: raw.state_code.clone(),
        state_number: raw.state_number,
        status: package_status,
        consolidated_status,
        parent_contract_id,
        initial_submitted_at_ms,
        latest_submitted: sets.submitted.first().map(|set| set.rate_revision.clone()),
    })
}

fn owning_draft_contract(raw: &RawRate) -> DomainResult<String> {
    match raw.draft_contracts.as_slice() {
        [only] => Ok(only.id.clone()),
        [] => Err(DomainError::Invariant(format!(
            "draft rate {} has no owning draft contract",
            raw.id
        ))),
        _ => Err(DomainError::Invariant(format!(
            "draft rate {} is owned by more than one draft contract",
            raw.id
        ))),
    }
}

fn contract_stamps(raw: &RawContract) -> Vec<RevisionStamp> {
    raw.revisions
        .iter()
        .map(|revision| RevisionStamp {
            created_at_ms: revision.created_at_ms,
            submitted_at_ms: revision
                .submit_info
                .as_ref()
                .map(|info| info.updated_at_ms),
        })
        .collect()
}

fn rate_stamps(raw: &RawRate) -> Vec<RevisionStamp> {
    raw.revisions
        .iter()
        .map(|revision| RevisionStamp {
            created_at_ms: revision.created_at_ms,
            submitted_at_ms: revision
                .submit_info
                .as_ref()
                .map(|info| info.updated_at_ms),
        })
        .collect()
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ParseFailure {
    pub id: String,
    pub error: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ParsedBatch<T> {
    pub valid: Vec<T>,
    pub failed: Vec<ParseFailure>,
}

pub fn parse_contracts(raws: &[RawContract]) -> ParsedBatch<Contract> {
    partition(
        raws.iter()
            .map(|raw| (raw.id.clone(), parse_contract_with_history(raw))),
    )
}

pub fn parse_rate_summaries(raws: &[RawRate]) -> ParsedBatch<RateSummary> {
    partition(raws.iter().map(|raw| (raw.id.clone(), parse_rate_summary(raw))))
}

fn partition<T>(results: impl IntoIterator<Item = (String, DomainResult<T>)>) -> ParsedBatch<T> {
    let mut valid = Vec::new();
    let mut failed = Vec::new();
    for (id, result) in results {
        match result {
            Ok(value) => valid.push(value),
            Err(error) => {
                warn!(entity_id = %id, error = %error, "package excluded from listing");
                failed.push(ParseFailure {
                    id,
                    error: error.to_string(),
                });
            }
        }
    }
    ParsedBatch { valid, failed }
}

#[derive(Clone)]
pub struct PackageHistoryService {
    contracts: Arc<dyn ContractStore>,
    rates: Arc<dyn RateStore>,
}

impl PackageHistoryService {
    pub fn new(contracts: Arc<dyn ContractStore>, rates: Arc<dyn RateStore>) -> Self {
        Self { contracts, rates }
    }

    pub async fn contract(&self, contract_id: &str) -> DomainResult<Contract> {
        let raw = self
            .contracts
            .find_contract(contract_id)
            .await?
            .ok_or(DomainError::NotFound)?;
        parse_contract_with_history(&raw)
    }

    pub async fn rate(&self, rate_id: &str) -> DomainResult<Rate> {
        let raw = self
            .rates
            .find_rate(rate_id)
            .await?
            .ok_or(DomainError::NotFound)?;
        parse_rate_with_history(&raw)
    }

    pub async fn state_dashboard(&self, state_code: &str) -> DomainResult<ParsedBatch<Contract>> {
        let raws = self.contracts.list_contracts_by_state(state_code).await?;
        Ok(parse_contracts(&raws))
    }

    pub async fn cms_dashboard(&self) -> DomainResult<ParsedBatch<Contract>> {
        let raws = self.contracts.list_contracts().await?;
        let mut batch = partition(
            raws.iter()
                .map(|raw| (raw.id.clone(), parse_contract_without_draft_rates(raw))),
        );
        batch
            .valid
            .retain(|contract| !matches!(contract.status, PackageStatus::Draft));
        Ok(batch)
    }

    pub async fn rate_dashboard(&self, state_code: &str) -> DomainResult<ParsedBatch<RateSummary>> {
        let raws = self.rates.list_rates_by_state(state_code).await?;
        Ok(parse_rate_summaries(&raws))
    }
}
