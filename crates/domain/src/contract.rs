use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ports::store::{RawContractFormData, RawContractRevision, RawDocument, RawStateContact};
use crate::rate::{Rate, RateRevision};
use crate::status::{ConsolidatedStatus, PackageStatus};
use crate::submission::{SubmissionCause, SubmittedRevision, UpdateInfo};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    ContractOnly,
    ContractAndRates,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PopulationCovered {
    Medicaid,
    MedicaidAndChip,
    Chip,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Base,
    Amendment,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContractExecutionStatus {
    Executed,
    Unexecuted,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ManagedCareEntity {
    Mco,
    Pihp,
    Pahp,
    Pccm,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FederalAuthority {
    StatePlan,
    Waiver1915b,
    Waiver1115,
    Voluntary,
    Benchmark,
    TitleXxi,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    ContractRelated,
    ContractSupporting,
    RateRelated,
    RateSupporting,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct Document {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub s3_url: String,
    pub sha256: Option<String>,
    pub category: DocumentCategory,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct StateContact {
    pub name: Option<String>,
    pub title_role: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ContractFormData {
    pub submission_type: Option<SubmissionType>,
    pub population_covered: Option<PopulationCovered>,
    pub program_ids: Vec<String>,
    #[validate(length(min = 1))]
    pub submission_description: Option<String>,
    pub risk_based_contract: Option<bool>,
    pub contract_kind: Option<ContractKind>,
    pub contract_executed: Option<ContractExecutionStatus>,
    pub contract_date_start_ms: Option<i64>,
    pub contract_date_end_ms: Option<i64>,
    pub managed_care_entities: Vec<ManagedCareEntity>,
    pub federal_authorities: Vec<FederalAuthority>,
    pub dsnp_contract: Option<bool>,
    pub in_lieu_services_and_settings: Option<bool>,
    pub modified_benefits_provided: Option<bool>,
    pub modified_geo_area_served: Option<bool>,
    pub modified_medicaid_beneficiaries: Option<bool>,
    pub modified_risk_sharing_strategy: Option<bool>,
    pub modified_incentive_arrangements: Option<bool>,
    pub statutory_regulatory_attestation: Option<bool>,
    pub statutory_regulatory_attestation_description: Option<String>,
    #[validate]
    pub contract_documents: Vec<Document>,
    #[validate]
    pub supporting_documents: Vec<Document>,
    #[validate]
    pub state_contacts: Vec<StateContact>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContractRevision {
    pub id: String,
    pub contract_id: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub submit_info: Option<UpdateInfo>,
    pub unlock_info: Option<UpdateInfo>,
    pub form_data: ContractFormData,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContractRevisionWithRates {
    pub revision: ContractRevision,
    pub submit_info: Option<UpdateInfo>,
    pub unlock_info: Option<UpdateInfo>,
    pub rate_revisions: Vec<RateRevision>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContractPackageSubmission {
    pub submit_info: UpdateInfo,
    pub cause: SubmissionCause,
    pub submitted_revisions: Vec<SubmittedRevision>,
    pub contract_revision: ContractRevision,
    pub rate_revisions: Vec<RateRevision>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contract {
    pub id: String,
    pub state_code: String,
    pub state_number: i32,
    pub status: PackageStatus,
    pub consolidated_status: ConsolidatedStatus,
    pub initial_submitted_at_ms: Option<i64>,
    pub draft_revision: Option<ContractRevisionWithRates>,
    pub draft_rates: Vec<Rate>,
    pub revisions: Vec<ContractRevisionWithRates>,
    pub package_submissions: Vec<ContractPackageSubmission>,
}

impl Contract {
    pub fn latest_submitted(&self) -> Option<&ContractRevisionWithRates> {
        self.revisions.first()
    }
}

pub fn contract_form_data(raw: &RawContractFormData) -> ContractFormData {
    ContractFormData {
        submission_type: raw.submission_type.clone(),
        population_covered: raw.population_covered.clone(),
        program_ids: raw.program_ids.clone(),
        submission_description: raw.submission_description.clone(),
        risk_based_contract: raw.risk_based_contract,
        contract_kind: raw.contract_kind.clone(),
        contract_executed: raw.contract_executed.clone(),
        contract_date_start_ms: raw.contract_date_start_ms,
        contract_date_end_ms: raw.contract_date_end_ms,
        managed_care_entities: raw.managed_care_entities.clone(),
        federal_authorities: raw.federal_authorities.clone(),
        dsnp_contract: raw.dsnp_contract,
        in_lieu_services_and_settings: raw.in_lieu_services_and_settings,
        modified_benefits_provided: raw.modified_benefits_provided,
        modified_geo_area_served: raw.modified_geo_area_served,
        modified_medicaid_beneficiaries: raw.modified_medicaid_beneficiaries,
        modified_risk_sharing_strategy: raw.modified_risk_sharing_strategy,
        modified_incentive_arrangements: raw.modified_incentive_arrangements,
        statutory_regulatory_attestation: raw.statutory_regulatory_attestation,
        statutory_regulatory_attestation_description: raw
            .statutory_regulatory_attestation_description
            .clone(),
        contract_documents: documents(&raw.contract_documents, DocumentCategory::ContractRelated),
        supporting_documents: documents(
            &raw.supporting_documents,
            DocumentCategory::ContractSupporting,
        ),
        state_contacts: state_contacts(&raw.state_contacts),
    }
}

pub(crate) fn revision_from_raw(raw: &RawContractRevision) -> ContractRevision {
    ContractRevision {
        id: raw.id.clone(),
        contract_id: raw.contract_id.clone(),
        created_at_ms: raw.created_at_ms,
        updated_at_ms: raw.updated_at_ms,
        submit_info: raw.submit_info.clone(),
        unlock_info: raw.unlock_info.clone(),
        form_data: contract_form_data(&raw.form_data),
    }
}

pub(crate) fn documents(raw: &[RawDocument], category: DocumentCategory) -> Vec<Document> {
    let mut rows: Vec<RawDocument> = raw.to_vec();
    rows.sort_by(|left, right| {
        left.position
            .cmp(&right.position)
            .then_with(|| left.name.cmp(&right.name))
    });
    rows.into_iter()
        .map(|row| Document {
            name: row.name,
            s3_url: row.s3_url,
            sha256: row.sha256,
            category: category.clone(),
        })
        .collect()
}

fn state_contacts(raw: &[RawStateContact]) -> Vec<StateContact> {
    let mut rows: Vec<RawStateContact> = raw.to_vec();
    rows.sort_by(|left, right| left.position.cmp(&right.position));
    rows.into_iter()
        .map(|row| StateContact {
            name: row.name,
            title_role: row.title_role,
            email: row.email,
        })
        .collect()
}
