use serde::{Deserialize, Serialize};

use crate::DomainResult;
use crate::error::DomainError;
use crate::submission::UpdateInfo;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Draft,
    Submitted,
    Unlocked,
    Resubmitted,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    UnderReview,
    Approved,
    Withdrawn,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsolidatedStatus {
    Draft,
    Submitted,
    Unlocked,
    Resubmitted,
    Approved,
    Withdrawn,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewActionKind {
    UnderReview,
    Approve,
    Withdraw,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewAction {
    pub update_info: UpdateInfo,
    pub kind: ReviewActionKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevisionStamp {
    pub created_at_ms: i64,
    pub submitted_at_ms: Option<i64>,
}

pub fn classify(entity_id: &str, stamps: &[RevisionStamp]) -> DomainResult<PackageStatus> {
    let mut ordered = stamps.to_vec();
    ordered.sort_by(|left, right| right.created_at_ms.cmp(&left.created_at_ms));
    let Some(latest) = ordered.first() else {
        return Err(DomainError::Invariant(format!(
            "submission {entity_id} has no revisions"
        )));
    };
    let status = match (ordered.len(), latest.submitted_at_ms) {
        (1, Some(_)) => PackageStatus::Submitted,
        (1, None) => PackageStatus::Draft,
        (_, None) => PackageStatus::Unlocked,
        (_, Some(_)) => PackageStatus::Resubmitted,
    };
    Ok(status)
}

pub fn initial_submitted_at(stamps: &[RevisionStamp]) -> Option<i64> {
    stamps.iter().filter_map(|stamp| stamp.submitted_at_ms).min()
}

pub fn latest_review_status(actions: &[ReviewAction]) -> Option<ReviewStatus> {
    let mut ordered: Vec<&ReviewAction> = actions.iter().collect();
    ordered.sort_by(|left, right| {
        left.update_info
            .updated_at_ms
            .cmp(&right.update_info.updated_at_ms)
    });
    ordered.last().map(|action| match action.kind {
        ReviewActionKind::UnderReview => ReviewStatus::UnderReview,
        ReviewActionKind::Approve => ReviewStatus::Approved,
        ReviewActionKind::Withdraw => ReviewStatus::Withdrawn,
    })
}

pub fn consolidate(status: &PackageStatus, actions: &[ReviewAction]) -> ConsolidatedStatus {
    match latest_review_status(actions) {
        Some(ReviewStatus::Withdrawn) => ConsolidatedStatus::Withdrawn,
        Some(ReviewStatus::Approved) => ConsolidatedStatus::Approved,
        Some(ReviewStatus::UnderReview) | None => match status {
            PackageStatus::Draft => ConsolidatedStatus::Draft,
            PackageStatus::Submitted => ConsolidatedStatus::Submitted,
            PackageStatus::Unlocked => ConsolidatedStatus::Unlocked,
            PackageStatus::Resubmitted => ConsolidatedStatus::Resubmitted,
        },
    }
}
