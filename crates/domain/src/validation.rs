use validator::{Validate, ValidationError, ValidationErrors};

use crate::contract::{ContractFormData, FederalAuthority, PopulationCovered, SubmissionType};
use crate::rate::{RateFormData, RateKind};

const DSNP_AUTHORITIES: [FederalAuthority; 3] = [
    FederalAuthority::StatePlan,
    FederalAuthority::Waiver1915b,
    FederalAuthority::Waiver1115,
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationFlags {
    pub require_statutory_attestation: bool,
    pub enable_dsnp_questions: bool,
}

pub fn validate_contract_draft(form: &ContractFormData) -> Result<(), ValidationErrors> {
    form.validate()
}

pub fn validate_rate_draft(form: &RateFormData) -> Result<(), ValidationErrors> {
    form.validate()
}

pub fn validate_contract_submission(
    form: &ContractFormData,
    flags: &ValidationFlags,
    draft_rates: &[RateFormData],
) -> Result<(), ValidationErrors> {
    let mut errors = base_errors(form);

    require(
        &mut errors,
        form.submission_type.is_some(),
        "submission_type",
        "submission type is required before submission",
    );
    require(
        &mut errors,
        form.population_covered.is_some(),
        "population_covered",
        "population coverage is required before submission",
    );
    require(
        &mut errors,
        form.submission_description.is_some(),
        "submission_description",
        "a submission description is required before submission",
    );
    require(
        &mut errors,
        form.risk_based_contract.is_some(),
        "risk_based_contract",
        "the risk-based contract question must be answered before submission",
    );
    require(
        &mut errors,
        form.contract_kind.is_some(),
        "contract_kind",
        "base or amendment must be selected before submission",
    );
    require(
        &mut errors,
        form.contract_executed.is_some(),
        "contract_executed",
        "contract execution status is required before submission",
    );
    require(
        &mut errors,
        form.contract_date_start_ms.is_some(),
        "contract_date_start_ms",
        "a contract start date is required before submission",
    );
    require(
        &mut errors,
        form.contract_date_end_ms.is_some(),
        "contract_date_end_ms",
        "a contract end date is required before submission",
    );
    if let (Some(start), Some(end)) = (form.contract_date_start_ms, form.contract_date_end_ms) {
        if end < start {
            field_error(
                &mut errors,
                "contract_date_end_ms",
                "date_range",
                "contract end date cannot precede the start date",
            );
        }
    }
    require(
        &mut errors,
        !form.program_ids.is_empty(),
        "program_ids",
        "at least one program is required before submission",
    );
    require(
        &mut errors,
        !form.managed_care_entities.is_empty(),
        "managed_care_entities",
        "at least one managed care entity is required before submission",
    );
    require(
        &mut errors,
        !form.federal_authorities.is_empty(),
        "federal_authorities",
        "at least one federal authority is required before submission",
    );
    require(
        &mut errors,
        !form.state_contacts.is_empty(),
        "state_contacts",
        "at least one state contact is required before submission",
    );
    require(
        &mut errors,
        !form.contract_documents.is_empty(),
        "contract_documents",
        "a contract document is required before submission",
    );

    if matches!(form.population_covered, Some(PopulationCovered::Chip))
        && matches!(form.submission_type, Some(SubmissionType::ContractAndRates))
    {
        field_error(
            &mut errors,
            "submission_type",
            "chip_rates_incompatible",
            "a CHIP-only population cannot be part of a contract and rates submission",
        );
    }

    if flags.require_statutory_attestation {
        match form.statutory_regulatory_attestation {
            None => require(
                &mut errors,
                false,
                "statutory_regulatory_attestation",
                "the statutory and regulatory attestation must be answered before submission",
            ),
            Some(true) => {
                if form.statutory_regulatory_attestation_description.is_some() {
                    field_error(
                        &mut errors,
                        "statutory_regulatory_attestation_description",
                        "not_applicable",
                        "a non-compliance description only applies when the attestation is not complete",
                    );
                }
            }
            Some(false) => require(
                &mut errors,
                form.statutory_regulatory_attestation_description.is_some(),
                "statutory_regulatory_attestation_description",
                "a description of non-compliance is required when the attestation is not complete",
            ),
        }
    }

    if flags.enable_dsnp_questions
        && form
            .federal_authorities
            .iter()
            .any(|authority| DSNP_AUTHORITIES.contains(authority))
    {
        require(
            &mut errors,
            form.dsnp_contract.is_some(),
            "dsnp_contract",
            "the D-SNP contract question must be answered for the selected federal authorities",
        );
        if form.dsnp_contract == Some(true)
            && draft_rates
                .iter()
                .any(|rate| rate.rate_medicaid_populations.is_empty())
        {
            field_error(
                &mut errors,
                "rate_medicaid_populations",
                "required_for_dsnp",
                "every rate certification on a D-SNP contract must declare its Medicaid populations",
            );
        }
    }

    finish(errors)
}

pub fn validate_contract_submission_eqro(form: &ContractFormData) -> Result<(), ValidationErrors> {
    let mut errors = base_errors(form);

    match form.submission_type {
        None => require(
            &mut errors,
            false,
            "submission_type",
            "submission type is required before submission",
        ),
        Some(SubmissionType::ContractAndRates) => field_error(
            &mut errors,
            "submission_type",
            "eqro_contract_only",
            "an EQRO submission cannot include rate certifications",
        ),
        Some(SubmissionType::ContractOnly) => {}
    }
    require(
        &mut errors,
        form.submission_description.is_some(),
        "submission_description",
        "a submission description is required before submission",
    );
    require(
        &mut errors,
        form.contract_date_start_ms.is_some(),
        "contract_date_start_ms",
        "a contract start date is required before submission",
    );
    require(
        &mut errors,
        form.contract_date_end_ms.is_some(),
        "contract_date_end_ms",
        "a contract end date is required before submission",
    );
    require(
        &mut errors,
        !form.state_contacts.is_empty(),
        "state_contacts",
        "at least one state contact is required before submission",
    );
    require(
        &mut errors,
        !form.contract_documents.is_empty(),
        "contract_documents",
        "a contract document is required before submission",
    );

    forbid(
        &mut errors,
        form.in_lieu_services_and_settings.is_none(),
        "in_lieu_services_and_settings",
        "in-lieu services do not apply to an EQRO submission",
    );
    forbid(
        &mut errors,
        form.modified_benefits_provided.is_none(),
        "modified_benefits_provided",
        "modified provisions do not apply to an EQRO submission",
    );
    forbid(
        &mut errors,
        form.modified_geo_area_served.is_none(),
        "modified_geo_area_served",
        "modified provisions do not apply to an EQRO submission",
    );
    forbid(
        &mut errors,
        form.modified_medicaid_beneficiaries.is_none(),
        "modified_medicaid_beneficiaries",
        "modified provisions do not apply to an EQRO submission",
    );
    forbid(
        &mut errors,
        form.modified_risk_sharing_strategy.is_none(),
        "modified_risk_sharing_strategy",
        "modified provisions do not apply to an EQRO submission",
    );
    forbid(
        &mut errors,
        form.modified_incentive_arrangements.is_none(),
        "modified_incentive_arrangements",
        "modified provisions do not apply to an EQRO submission",
    );
    forbid(
        &mut errors,
        form.statutory_regulatory_attestation.is_none(),
        "statutory_regulatory_attestation",
        "the statutory and regulatory attestation does not apply to an EQRO submission",
    );
    forbid(
        &mut errors,
        form.statutory_regulatory_attestation_description.is_none(),
        "statutory_regulatory_attestation_description",
        "the attestation description does not apply to an EQRO submission",
    );
    forbid(
        &mut errors,
        form.dsnp_contract.is_none(),
        "dsnp_contract",
        "the D-SNP contract question does not apply to an EQRO submission",
    );

    finish(errors)
}

pub fn validate_rate_submission(form: &RateFormData) -> Result<(), ValidationErrors> {
    let mut errors = base_errors(form);

    require(
        &mut errors,
        form.rate_kind.is_some(),
        "rate_kind",
        "new certification or amendment must be selected before submission",
    );
    require(
        &mut errors,
        form.rate_capitation_type.is_some(),
        "rate_capitation_type",
        "the capitation rate type is required before submission",
    );
    require(
        &mut errors,
        form.rate_date_start_ms.is_some(),
        "rate_date_start_ms",
        "a rating period start date is required before submission",
    );
    require(
        &mut errors,
        form.rate_date_end_ms.is_some(),
        "rate_date_end_ms",
        "a rating period end date is required before submission",
    );
    if let (Some(start), Some(end)) = (form.rate_date_start_ms, form.rate_date_end_ms) {
        if end < start {
            field_error(
                &mut errors,
                "rate_date_end_ms",
                "date_range",
                "the rating period end date cannot precede its start date",
            );
        }
    }
    require(
        &mut errors,
        form.rate_date_certified_ms.is_some(),
        "rate_date_certified_ms",
        "the certification date is required before submission",
    );
    require(
        &mut errors,
        form.rate_certification_name.is_some(),
        "rate_certification_name",
        "a rate certification name is required before submission",
    );
    require(
        &mut errors,
        form.actuary_communication.is_some(),
        "actuary_communication",
        "an actuary communication preference is required before submission",
    );
    require(
        &mut errors,
        !form.rate_program_ids.is_empty(),
        "rate_program_ids",
        "at least one rate program is required before submission",
    );
    require(
        &mut errors,
        !form.rate_documents.is_empty(),
        "rate_documents",
        "a rate certification document is required before submission",
    );
    require(
        &mut errors,
        !form.certifying_actuaries.is_empty(),
        "certifying_actuaries",
        "a certifying actuary is required before submission",
    );

    if matches!(form.rate_kind, Some(RateKind::Amendment)) {
        require(
            &mut errors,
            form.amendment_effective_start_ms.is_some(),
            "amendment_effective_start_ms",
            "an amendment effective start date is required before submission",
        );
        require(
            &mut errors,
            form.amendment_effective_end_ms.is_some(),
            "amendment_effective_end_ms",
            "an amendment effective end date is required before submission",
        );
    }

    finish(errors)
}

fn base_errors<T: Validate>(form: &T) -> ValidationErrors {
    form.validate().err().unwrap_or_else(ValidationErrors::new)
}

fn field_error(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: &str,
) {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    errors.add(field, error);
}

fn require(errors: &mut ValidationErrors, present: bool, field: &'static str, message: &str) {
    if !present {
        field_error(errors, field, "required", message);
    }
}

fn forbid(errors: &mut ValidationErrors, absent: bool, field: &'static str, message: &str) {
    if !absent {
        field_error(errors, field, "not_applicable", message);
    }
}

fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
