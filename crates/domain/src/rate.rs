use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::contract::{ContractRevision, Document, DocumentCategory, documents};
use crate::ports::store::{RawActuaryContact, RawRateFormData, RawRateRevision};
use crate::status::{ConsolidatedStatus, PackageStatus};
use crate::submission::{SubmissionCause, SubmittedRevision, UpdateInfo};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    New,
    Amendment,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateCapitationType {
    RateCell,
    RateRange,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateMedicaidPopulation {
    MedicareMedicaidDualsWithDsnp,
    MedicareMedicaidDualsWithoutDsnp,
    MedicaidOnly,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActuarialFirm {
    Mercer,
    Milliman,
    Optumas,
    Guidehouse,
    Deloitte,
    StateInHouse,
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActuaryCommunication {
    OactToActuary,
    OactToState,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ActuaryContact {
    pub name: Option<String>,
    pub title_role: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub actuarial_firm: Option<ActuarialFirm>,
    pub actuarial_firm_other: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct RateFormData {
    pub rate_kind: Option<RateKind>,
    pub rate_capitation_type: Option<RateCapitationType>,
    pub rate_date_start_ms: Option<i64>,
    pub rate_date_end_ms: Option<i64>,
    pub rate_date_certified_ms: Option<i64>,
    pub amendment_effective_start_ms: Option<i64>,
    pub amendment_effective_end_ms: Option<i64>,
    pub rate_program_ids: Vec<String>,
    #[validate(length(min = 1))]
    pub rate_certification_name: Option<String>,
    pub rate_medicaid_populations: Vec<RateMedicaidPopulation>,
    #[validate]
    pub rate_documents: Vec<Document>,
    #[validate]
    pub supporting_documents: Vec<Document>,
    #[validate]
    pub certifying_actuaries: Vec<ActuaryContact>,
    pub actuary_communication: Option<ActuaryCommunication>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RateRevision {
    pub id: String,
    pub rate_id: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub submit_info: Option<UpdateInfo>,
    pub unlock_info: Option<UpdateInfo>,
    pub form_data: RateFormData,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RateRevisionWithContracts {
    pub revision: RateRevision,
    pub submit_info: Option<UpdateInfo>,
    pub unlock_info: Option<UpdateInfo>,
    pub contract_revisions: Vec<ContractRevision>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RatePackageSubmission {
    pub submit_info: UpdateInfo,
    pub cause: SubmissionCause,
    pub submitted_revisions: Vec<SubmittedRevision>,
    pub rate_revision: RateRevision,
    pub contract_revisions: Vec<ContractRevision>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rate {
    pub id: String,
    pub state_code: String,
    pub state_number: i32,
    pub parent_contract_id: String,
    pub status: PackageStatus,
    pub consolidated_status: ConsolidatedStatus,
    pub initial_submitted_at_ms: Option<i64>,
    pub draft_revision: Option<RateRevisionWithContracts>,
    pub revisions: Vec<RateRevisionWithContracts>,
    pub package_submissions: Vec<RatePackageSubmission>,
}

impl Rate {
    pub fn latest_submitted(&self) -> Option<&RateRevisionWithContracts> {
        self.revisions.first()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RateSummary {
    pub id: String,
    pub state_code: String,
    pub state_number: i32,
    pub status: PackageStatus,
    pub consolidated_status: ConsolidatedStatus,
    pub parent_contract_id: Option<String>,
    pub initial_submitted_at_ms: Option<i64>,
    pub latest_submitted: Option<RateRevision>,
}

pub fn rate_form_data(raw: &RawRateFormData) -> RateFormData {
    RateFormData {
        rate_kind: raw.rate_kind.clone(),
        rate_capitation_type: raw.rate_capitation_type.clone(),
        rate_date_start_ms: raw.rate_date_start_ms,
        rate_date_end_ms: raw.rate_date_end_ms,
        rate_date_certified_ms: raw.rate_date_certified_ms,
        amendment_effective_start_ms: raw.amendment_effective_start_ms,
        amendment_effective_end_ms: raw.amendment_effective_end_ms,
        rate_program_ids: raw.rate_program_ids.clone(),
        rate_certification_name: raw.rate_certification_name.clone(),
        rate_medicaid_populations: raw.rate_medicaid_populations.clone(),
        rate_documents: documents(&raw.rate_documents, DocumentCategory::RateRelated),
        supporting_documents: documents(&raw.supporting_documents, DocumentCategory::RateSupporting),
        certifying_actuaries: certifying_actuaries(&raw.certifying_actuaries),
        actuary_communication: raw.actuary_communication.clone(),
    }
}

pub(crate) fn revision_from_raw(raw: &RawRateRevision) -> RateRevision {
    RateRevision {
        id: raw.id.clone(),
        rate_id: raw.rate_id.clone(),
        created_at_ms: raw.created_at_ms,
        updated_at_ms: raw.updated_at_ms,
        submit_info: raw.submit_info.clone(),
        unlock_info: raw.unlock_info.clone(),
        form_data: rate_form_data(&raw.form_data),
    }
}

fn certifying_actuaries(raw: &[RawActuaryContact]) -> Vec<ActuaryContact> {
    let mut rows: Vec<RawActuaryContact> = raw.to_vec();
    rows.sort_by(|left, right| left.position.cmp(&right.position));
    rows.into_iter()
        .map(|row| ActuaryContact {
            name: row.name,
            title_role: row.title_role,
            email: row.email,
            actuarial_firm: row.actuarial_firm,
            actuarial_firm_other: row.actuarial_firm_other,
        })
        .collect()
}
