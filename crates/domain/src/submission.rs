use serde::{Deserialize, Serialize};

use crate::contract::ContractRevision;
use crate::rate::RateRevision;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateInfo {
    pub updated_at_ms: i64,
    pub updated_by: String,
    pub updated_reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionCause {
    ContractSubmission,
    RateSubmission,
    RateLink,
    RateUnlink,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SubmittedRevision {
    Contract(ContractRevision),
    Rate(RateRevision),
}

impl SubmittedRevision {
    pub fn revision_id(&self) -> &str {
        match self {
            Self::Contract(revision) => &revision.id,
            Self::Rate(revision) => &revision.id,
        }
    }
}
