use crate::DomainResult;
use crate::contract::{self, ContractRevision};
use crate::error::DomainError;
use crate::ports::store::{RawContract, RawContractRevision, RawRate, RawRateRevision};
use crate::rate::{self, RateRevision};
use crate::submission::{SubmissionCause, SubmittedRevision, UpdateInfo};
use crate::util::format_ms_rfc3339;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ContractSet {
    pub contract_revision: ContractRevision,
    pub submit_info: UpdateInfo,
    pub unlock_info: Option<UpdateInfo>,
    pub cause: SubmissionCause,
    pub submitted_revisions: Vec<SubmittedRevision>,
    pub rate_revisions: Vec<RateRevision>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DraftContractSet {
    pub contract_revision: ContractRevision,
    pub unlock_info: Option<UpdateInfo>,
    pub rate_revisions: Vec<RateRevision>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ContractSets {
    pub draft: Option<DraftContractSet>,
    pub submitted: Vec<ContractSet>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RateSet {
    pub rate_revision: RateRevision,
    pub submit_info: UpdateInfo,
    pub unlock_info: Option<UpdateInfo>,
    pub cause: SubmissionCause,
    pub submitted_revisions: Vec<SubmittedRevision>,
    pub contract_revisions: Vec<ContractRevision>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DraftRateSet {
    pub rate_revision: RateRevision,
    pub unlock_info: Option<UpdateInfo>,
    pub contract_revisions: Vec<ContractRevision>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RateSets {
    pub draft: Option<DraftRateSet>,
    pub submitted: Vec<RateSet>,
    pub parent_contract_id: Option<String>,
}

pub(crate) fn contract_revision_sets(raw: &RawContract) -> DomainResult<ContractSets> {
    let mut drafts: Vec<&RawContractRevision> = raw
        .revisions
        .iter()
        .filter(|revision| revision.submit_info.is_none())
        .collect();
    if drafts.len() > 1 {
        return Err(DomainError::Invariant(format!(
            "contract {} has more than one draft revision",
            raw.id
        )));
    }

    let mut submitted: Vec<(&RawContractRevision, UpdateInfo)> = raw
        .revisions
        .iter()
        .filter_map(|revision| {
            revision
                .submit_info
                .clone()
                .map(|submit_info| (revision, submit_info))
        })
        .collect();
    submitted.sort_by(|left, right| {
        left.1
            .updated_at_ms
            .cmp(&right.1.updated_at_ms)
            .then_with(|| left.0.created_at_ms.cmp(&right.0.created_at_ms))
            .then_with(|| left.0.id.cmp(&right.0.id))
    });

    let mut sets: Vec<ContractSet> = Vec::new();
    for (revision, submit_info) in submitted {
        let mut links = revision.rate_links.iter().collect::<Vec<_>>();
        links.sort_by(|left, right| {
            left.valid_after_ms
                .cmp(&right.valid_after_ms)
                .then_with(|| {
                    left.update_info
                        .updated_at_ms
                        .cmp(&right.update_info.updated_at_ms)
                })
        });

        let mut initial_rates: Vec<RateRevision> = Vec::new();
        let mut later_links = Vec::new();
        for link in links {
            let linked = &link.rate_revision;
            if linked.submit_info.is_none() {
                return Err(DomainError::Invariant(format!(
                    "contract revision {} links unsubmitted rate revision {} at {}",
                    revision.id,
                    linked.id,
                    format_ms_rfc3339(link.valid_after_ms)
                )));
            }
            if link.update_info.updated_at_ms <= submit_info.updated_at_ms {
                initial_rates.retain(|existing| existing.rate_id != linked.rate_id);
                if !link.is_removal {
                    initial_rates.push(rate::revision_from_raw(linked));
                }
            } else {
                later_links.push(link);
            }
        }

        let contract_revision = contract::revision_from_raw(revision);
        let mut submitted_revisions = vec![SubmittedRevision::Contract(contract_revision.clone())];
        submitted_revisions.extend(
            initial_rates
                .iter()
                .filter(|rate_revision| {
                    rate_revision
                        .submit_info
                        .as_ref()
                        .map(|info| info.updated_at_ms)
                        == Some(submit_info.updated_at_ms)
                })
                .cloned()
                .map(SubmittedRevision::Rate),
        );
        sets.push(ContractSet {
            contract_revision: contract_revision.clone(),
            submit_info: submit_info.clone(),
            unlock_info: revision.unlock_info.clone(),
            cause: SubmissionCause::ContractSubmission,
            submitted_revisions,
            rate_revisions: initial_rates,
        });

        for link in later_links {
            let linked = &link.rate_revision;
            let mut rate_revisions = sets
                .last()
                .map(|set| set.rate_revisions.clone())
                .unwrap_or_default();
            let superseded = rate_revisions
                .iter()
                .any(|existing| existing.rate_id == linked.rate_id);
            rate_revisions.retain(|existing| existing.rate_id != linked.rate_id);
            let cause = if link.is_removal {
                SubmissionCause::RateUnlink
            } else if superseded {
                SubmissionCause::RateSubmission
            } else {
                SubmissionCause::RateLink
            };
            let changed = rate::revision_from_raw(linked);
            if !link.is_removal {
                rate_revisions.push(changed.clone());
            }
            sets.push(ContractSet {
                contract_revision: contract_revision.clone(),
                submit_info: link.update_info.clone(),
                unlock_info: None,
                cause,
                submitted_revisions: vec![SubmittedRevision::Rate(changed)],
                rate_revisions,
            });
        }
    }
    sets.reverse();

    let draft = drafts.pop().map(|revision| {
        let mut links = revision.rate_links.iter().collect::<Vec<_>>();
        links.sort_by(|left, right| left.valid_after_ms.cmp(&right.valid_after_ms));
        let mut rate_revisions: Vec<RateRevision> = Vec::new();
        for link in links {
            rate_revisions.retain(|existing| existing.rate_id != link.rate_revision.rate_id);
            if !link.is_removal {
                rate_revisions.push(rate::revision_from_raw(&link.rate_revision));
            }
        }
        DraftContractSet {
            contract_revision: contract::revision_from_raw(revision),
            unlock_info: revision.unlock_info.clone(),
            rate_revisions,
        }
    });

    Ok(ContractSets {
        draft,
        submitted: sets,
    })
}

pub(crate) fn rate_revision_sets(raw: &RawRate) -> DomainResult<RateSets> {
    let mut drafts: Vec<&RawRateRevision> = raw
        .revisions
        .iter()
        .filter(|revision| revision.submit_info.is_none())
        .collect();
    if drafts.len() > 1 {
        return Err(DomainError::Invariant(format!(
            "rate {} has more than one draft revision",
            raw.id
        )));
    }

    let mut submitted: Vec<(&RawRateRevision, UpdateInfo)> = raw
        .revisions
        .iter()
        .filter_map(|revision| {
            revision
                .submit_info
                .clone()
                .map(|submit_info| (revision, submit_info))
        })
        .collect();
    submitted.sort_by(|left, right| {
        left.1
            .updated_at_ms
            .cmp(&right.1.updated_at_ms)
            .then_with(|| left.0.created_at_ms.cmp(&right.0.created_at_ms))
            .then_with(|| left.0.id.cmp(&right.0.id))
    });

    let mut sets: Vec<RateSet> = Vec::new();
    for (revision, submit_info) in &submitted {
        let mut events = revision.related_submissions.iter().collect::<Vec<_>>();
        events.sort_by(|left, right| {
            left.update_info
                .updated_at_ms
                .cmp(&right.update_info.updated_at_ms)
        });
        if events.is_empty() {
            return Err(DomainError::Invariant(format!(
                "rate {} revision {} has no related submission records",
                raw.id, revision.id
            )));
        }

        let rate_revision = rate::revision_from_raw(revision);
        for event in events {
            let mut contract_revisions = sets
                .last()
                .map(|set| set.contract_revisions.clone())
                .unwrap_or_default();
            let keeps_rate = event
                .submitted_rates
                .iter()
                .any(|submitted_rate| submitted_rate.rate_id == raw.id);
            for linked in &event.submitted_contracts {
                contract_revisions.retain(|existing| existing.contract_id != linked.contract_id);
                if keeps_rate {
                    contract_revisions.push(contract::revision_from_raw(linked));
                }
            }

            let cause = if !event.submitted_contracts.is_empty() {
                SubmissionCause::ContractSubmission
            } else if event
                .submitted_rates
                .iter()
                .any(|submitted_rate| submitted_rate.id == revision.id)
            {
                SubmissionCause::RateSubmission
            } else if keeps_rate {
                SubmissionCause::RateLink
            } else {
                SubmissionCause::RateUnlink
            };

            let mut submitted_revisions: Vec<SubmittedRevision> = event
                .submitted_contracts
                .iter()
                .map(|linked| SubmittedRevision::Contract(contract::revision_from_raw(linked)))
                .collect();
            submitted_revisions.extend(
                event
                    .submitted_rates
                    .iter()
                    .map(|linked| SubmittedRevision::Rate(rate::revision_from_raw(linked))),
            );

            let unlock_info = if event.update_info.updated_at_ms == submit_info.updated_at_ms {
                revision.unlock_info.clone()
            } else {
                None
            };
            sets.push(RateSet {
                rate_revision: rate_revision.clone(),
                submit_info: event.update_info.clone(),
                unlock_info,
                cause,
                submitted_revisions,
                contract_revisions,
            });
        }
    }
    sets.reverse();

    let parent_contract_id = match submitted.first() {
        Some((first_revision, _)) => {
            let earliest = first_revision
                .related_submissions
                .iter()
                .min_by_key(|event| event.update_info.updated_at_ms);
            match earliest.map(|event| event.submitted_contracts.as_slice()) {
                Some([only]) => Some(only.contract_id.clone()),
                Some([]) | None => {
                    return Err(DomainError::Invariant(format!(
                        "rate {} initial submission bundles no contract",
                        raw.id
                    )));
                }
                Some(_) => {
                    return Err(DomainError::Invariant(format!(
                        "rate {} initial submission bundles more than one contract",
                        raw.id
                    )));
                }
            }
        }
        None => None,
    };

    let draft = match drafts.pop() {
        Some(revision) => {
            let mut contract_revisions = Vec::new();
            for draft_contract in &raw.draft_contracts {
                contract_revisions.push(latest_contract_revision(draft_contract)?);
            }
            Some(DraftRateSet {
                rate_revision: rate::revision_from_raw(revision),
                unlock_info: revision.unlock_info.clone(),
                contract_revisions,
            })
        }
        None => None,
    };

    Ok(RateSets {
        draft,
        submitted: sets,
        parent_contract_id,
    })
}

fn latest_contract_revision(raw: &RawContract) -> DomainResult<ContractRevision> {
    raw.revisions
        .iter()
        .max_by_key(|revision| revision.created_at_ms)
        .map(contract::revision_from_raw)
        .ok_or_else(|| DomainError::Invariant(format!("contract {} has no revisions", raw.id)))
}
