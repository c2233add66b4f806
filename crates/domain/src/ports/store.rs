use serde::{Deserialize, Serialize};

use crate::DomainResult;
use crate::contract::{
    ContractExecutionStatus, ContractKind, FederalAuthority, ManagedCareEntity, PopulationCovered,
    SubmissionType,
};
use crate::ports::BoxFuture;
use crate::rate::{
    ActuarialFirm, ActuaryCommunication, RateCapitationType, RateKind, RateMedicaidPopulation,
};
use crate::status::ReviewAction;
use crate::submission::UpdateInfo;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawContract {
    pub id: String,
    pub state_code: String,
    pub state_number: i32,
    #[serde(default)]
    pub review_actions: Vec<ReviewAction>,
    pub revisions: Vec<RawContractRevision>,
    #[serde(default)]
    pub draft_rates: Vec<RawRate>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawContractRevision {
    pub id: String,
    pub contract_id: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub submit_info: Option<UpdateInfo>,
    pub unlock_info: Option<UpdateInfo>,
    pub form_data: RawContractFormData,
    #[serde(default)]
    pub rate_links: Vec<RawRateLink>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawRateLink {
    pub valid_after_ms: i64,
    pub is_removal: bool,
    pub update_info: UpdateInfo,
    pub rate_revision: RawRateRevision,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawRate {
    pub id: String,
    pub state_code: String,
    pub state_number: i32,
    #[serde(default)]
    pub review_actions: Vec<ReviewAction>,
    pub revisions: Vec<RawRateRevision>,
    #[serde(default)]
    pub draft_contracts: Vec<RawContract>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawRateRevision {
    pub id: String,
    pub rate_id: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub submit_info: Option<UpdateInfo>,
    pub unlock_info: Option<UpdateInfo>,
    pub form_data: RawRateFormData,
    #[serde(default)]
    pub related_submissions: Vec<RawRelatedSubmission>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawRelatedSubmission {
    pub update_info: UpdateInfo,
    #[serde(default)]
    pub submitted_contracts: Vec<RawContractRevision>,
    #[serde(default)]
    pub submitted_rates: Vec<RawRateRevision>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawContractFormData {
    pub submission_type: Option<SubmissionType>,
    pub population_covered: Option<PopulationCovered>,
    #[serde(default)]
    pub program_ids: Vec<String>,
    pub submission_description: Option<String>,
    pub risk_based_contract: Option<bool>,
    pub contract_kind: Option<ContractKind>,
    pub contract_executed: Option<ContractExecutionStatus>,
    pub contract_date_start_ms: Option<i64>,
    pub contract_date_end_ms: Option<i64>,
    #[serde(default)]
    pub managed_care_entities: Vec<ManagedCareEntity>,
    #[serde(default)]
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
    #[serde(default)]
    pub contract_documents: Vec<RawDocument>,
    #[serde(default)]
    pub supporting_documents: Vec<RawDocument>,
    #[serde(default)]
    pub state_contacts: Vec<RawStateContact>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawRateFormData {
    pub rate_kind: Option<RateKind>,
    pub rate_capitation_type: Option<RateCapitationType>,
    pub rate_date_start_ms: Option<i64>,
    pub rate_date_end_ms: Option<i64>,
    pub rate_date_certified_ms: Option<i64>,
    pub amendment_effective_start_ms: Option<i64>,
    pub amendment_effective_end_ms: Option<i64>,
    #[serde(default)]
    pub rate_program_ids: Vec<String>,
    pub rate_certification_name: Option<String>,
    #[serde(default)]
    pub rate_medicaid_populations: Vec<RateMedicaidPopulation>,
    #[serde(default)]
    pub rate_documents: Vec<RawDocument>,
    #[serde(default)]
    pub supporting_documents: Vec<RawDocument>,
    #[serde(default)]
    pub certifying_actuaries: Vec<RawActuaryContact>,
    pub actuary_communication: Option<ActuaryCommunication>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawDocument {
    pub name: String,
    pub s3_url: String,
    pub sha256: Option<String>,
    pub position: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawStateContact {
    pub name: Option<String>,
    pub title_role: Option<String>,
    pub email: Option<String>,
    pub position: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawActuaryContact {
    pub name: Option<String>,
    pub title_role: Option<String>,
    pub email: Option<String>,
    pub actuarial_firm: Option<ActuarialFirm>,
    pub actuarial_firm_other: Option<String>,
    pub position: i32,
}

pub trait ContractStore: Send + Sync {
    fn find_contract(
        &self,
        contract_id: &str,
    ) -> BoxFuture<'_, DomainResult<Option<RawContract>>>;

    fn list_contracts(&self) -> BoxFuture<'_, DomainResult<Vec<RawContract>>>;

    fn list_contracts_by_state(
        &self,
        state_code: &str,
    ) -> BoxFuture<'_, DomainResult<Vec<RawContract>>>;
}

pub trait RateStore: Send + Sync {
    fn find_rate(&self, rate_id: &str) -> BoxFuture<'_, DomainResult<Option<RawRate>>>;

    fn list_rates_by_state(&self, state_code: &str) -> BoxFuture<'_, DomainResult<Vec<RawRate>>>;
}
