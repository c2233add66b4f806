use plansub_domain::error::DomainError;
use plansub_domain::history::{
    parse_contract_with_history, parse_contracts, parse_rate_with_history,
};
use plansub_domain::ports::store::{
    RawContract, RawContractFormData, RawContractRevision, RawRate, RawRateFormData, RawRateLink,
    RawRateRevision, RawRelatedSubmission,
};
use plansub_domain::status::{ConsolidatedStatus, PackageStatus, ReviewAction, ReviewActionKind};
use plansub_domain::submission::{SubmissionCause, SubmittedRevision, UpdateInfo};

fn update_info(updated_at_ms: i64, reason: &str) -> UpdateInfo {
    UpdateInfo {
        updated_at_ms,
        updated_by: "state@example.com".to_string(),
        updated_reason: reason.to_string(),
    }
}

fn empty_contract_form() -> RawContractFormData {
    RawContractFormData {
        submission_type: None,
        population_covered: None,
        program_ids: vec![],
        submission_description: None,
        risk_based_contract: None,
        contract_kind: None,
        contract_executed: None,
        contract_date_start_ms: None,
        contract_date_end_ms: None,
        managed_care_entities: vec![],
        federal_authorities: vec![],
        dsnp_contract: None,
        in_lieu_services_and_settings: None,
        modified_benefits_provided: None,
        modified_geo_area_served: None,
        modified_medicaid_beneficiaries: None,
        modified_risk_sharing_strategy: None,
        modified_incentive_arrangements: None,
        statutory_regulatory_attestation: None,
        statutory_regulatory_attestation_description: None,
        contract_documents: vec![],
        supporting_documents: vec![],
        state_contacts: vec![],
    }
}

fn empty_rate_form() -> RawRateFormData {
    RawRateFormData {
        rate_kind: None,
        rate_capitation_type: None,
        rate_date_start_ms: None,
        rate_date_end_ms: None,
        rate_date_certified_ms: None,
        amendment_effective_start_ms: None,
        amendment_effective_end_ms: None,
        rate_program_ids: vec![],
        rate_certification_name: None,
        rate_medicaid_populations: vec![],
        rate_documents: vec![],
        supporting_documents: vec![],
        certifying_actuaries: vec![],
        actuary_communication: None,
    }
}

fn contract_revision(
    id: &str,
    contract_id: &str,
    created_at_ms: i64,
    submitted_at_ms: Option<i64>,
) -> RawContractRevision {
    RawContractRevision {
        id: id.to_string(),
        contract_id: contract_id.to_string(),
        created_at_ms,
        updated_at_ms: created_at_ms,
        submit_info: submitted_at_ms.map(|ms| update_info(ms, "submit")),
        unlock_info: None,
        form_data: empty_contract_form(),
        rate_links: vec![],
    }
}

fn rate_revision(
    id: &str,
    rate_id: &str,
    created_at_ms: i64,
    submitted_at_ms: Option<i64>,
) -> RawRateRevision {
    RawRateRevision {
        id: id.to_string(),
        rate_id: rate_id.to_string(),
        created_at_ms,
        updated_at_ms: created_at_ms,
        submit_info: submitted_at_ms.map(|ms| update_info(ms, "submit")),
        unlock_info: None,
        form_data: empty_rate_form(),
        related_submissions: vec![],
    }
}

fn link(valid_after_ms: i64, is_removal: bool, rate_revision: RawRateRevision) -> RawRateLink {
    RawRateLink {
        valid_after_ms,
        is_removal,
        update_info: update_info(valid_after_ms, "rate change"),
        rate_revision,
    }
}

fn raw_contract(id: &str, revisions: Vec<RawContractRevision>) -> RawContract {
    RawContract {
        id: id.to_string(),
        state_code: "MN".to_string(),
        state_number: 4,
        review_actions: vec![],
        revisions,
        draft_rates: vec![],
    }
}

fn raw_rate(id: &str, revisions: Vec<RawRateRevision>) -> RawRate {
    RawRate {
        id: id.to_string(),
        state_code: "MN".to_string(),
        state_number: 9,
        review_actions: vec![],
        revisions,
        draft_contracts: vec![],
    }
}

fn own_rate_revision() -> RawRateRevision {
    rate_revision("rrev-a1", "rate-1", 900, Some(1_000))
}

fn shared_rate_revision() -> RawRateRevision {
    let mut revision = rate_revision("rrev-b1", "rate-2", 1_400, Some(1_500));
    revision.related_submissions = vec![RawRelatedSubmission {
        update_info: update_info(1_500, "initial rate submission"),
        submitted_contracts: vec![contract_revision("crev-0", "contract-0", 1_300, Some(1_500))],
        submitted_rates: vec![rate_revision("rrev-b1", "rate-2", 1_400, Some(1_500))],
    }];
    revision
}

fn shared_rate() -> RawRate {
    let mut draft = rate_revision("rrev-b2", "rate-2", 1_900, None);
    draft.unlock_info = Some(update_info(1_900, "unlock for edits"));
    RawRate {
        draft_contracts: vec![raw_contract(
            "contract-1",
            vec![contract_revision("crev-2", "contract-1", 2_000, None)],
        )],
        ..raw_rate("rate-2", vec![shared_rate_revision(), draft])
    }
}

fn unlocked_package() -> RawContract {
    let mut submitted = contract_revision("crev-1", "contract-1", 1_000, Some(1_000));
    submitted.rate_links = vec![
        link(1_000, false, own_rate_revision()),
        link(1_500, false, shared_rate_revision()),
        link(1_600, true, own_rate_revision()),
    ];

    let mut draft = contract_revision("crev-2", "contract-1", 2_000, None);
    draft.unlock_info = Some(update_info(1_900, "unlock for edits"));
    draft.rate_links = vec![link(1_900, false, shared_rate_revision())];

    RawContract {
        draft_rates: vec![shared_rate()],
        ..raw_contract("contract-1", vec![draft, submitted])
    }
}

fn active_rate_ids(contract: &plansub_domain::contract::Contract, index: usize) -> Vec<&str> {
    let mut ids: Vec<&str> = contract.revisions[index]
        .rate_revisions
        .iter()
        .map(|revision| revision.rate_id.as_str())
        .collect();
    ids.sort_unstable();
    ids
}

#[test]
fn mid_contract_rate_changes_become_addressable_history_points() {
    let contract = parse_contract_with_history(&unlocked_package()).expect("contract");

    assert!(matches!(contract.status, PackageStatus::Unlocked));
    assert_eq!(contract.initial_submitted_at_ms, Some(1_000));
    assert_eq!(contract.revisions.len(), 3);

    let causes: Vec<&SubmissionCause> = contract
        .package_submissions
        .iter()
        .map(|submission| &submission.cause)
        .collect();
    assert_eq!(
        causes,
        vec![
            &SubmissionCause::RateUnlink,
            &SubmissionCause::RateLink,
            &SubmissionCause::ContractSubmission,
        ]
    );

    assert_eq!(active_rate_ids(&contract, 2), vec!["rate-1"]);
    assert_eq!(active_rate_ids(&contract, 1), vec!["rate-1", "rate-2"]);
    assert_eq!(active_rate_ids(&contract, 0), vec!["rate-2"]);

    for pair in contract.revisions.windows(2) {
        let newer = pair[0].submit_info.as_ref().expect("submit info");
        let older = pair[1].submit_info.as_ref().expect("submit info");
        assert!(newer.updated_at_ms >= older.updated_at_ms);
    }

    let unlink = &contract.package_submissions[0];
    assert_eq!(unlink.submitted_revisions.len(), 1);
    assert!(matches!(
        &unlink.submitted_revisions[0],
        SubmittedRevision::Rate(revision) if revision.id == "rrev-a1"
    ));

    let draft = contract.draft_revision.as_ref().expect("draft revision");
    assert!(draft.unlock_info.is_some());
    assert_eq!(draft.rate_revisions.len(), 1);
    assert_eq!(draft.rate_revisions[0].rate_id, "rate-2");
}

#[test]
fn shared_draft_rate_keeps_the_contract_that_first_submitted_it() {
    let contract = parse_contract_with_history(&unlocked_package()).expect("contract");

    assert_eq!(contract.draft_rates.len(), 1);
    let rate = &contract.draft_rates[0];
    assert_eq!(rate.parent_contract_id, "contract-0");
    assert!(matches!(rate.status, PackageStatus::Unlocked));
    assert_eq!(rate.initial_submitted_at_ms, Some(1_500));
}

#[test]
fn rate_history_mirrors_the_contracts_it_was_bundled_with() {
    let rate = parse_rate_with_history(&shared_rate()).expect("rate");

    assert_eq!(rate.revisions.len(), 1);
    let latest = rate.latest_submitted().expect("submitted revision");
    assert_eq!(latest.contract_revisions.len(), 1);
    assert_eq!(latest.contract_revisions[0].contract_id, "contract-0");
    assert_eq!(
        rate.package_submissions[0].cause,
        SubmissionCause::ContractSubmission
    );

    let draft = rate.draft_revision.as_ref().expect("draft revision");
    assert_eq!(draft.contract_revisions.len(), 1);
    assert_eq!(draft.contract_revisions[0].contract_id, "contract-1");
}

#[test]
fn reconstruction_is_idempotent() {
    let raw = unlocked_package();
    let first = parse_contract_with_history(&raw).expect("first parse");
    let second = parse_contract_with_history(&raw).expect("second parse");
    assert_eq!(first, second);

    let raw_rate = shared_rate();
    assert_eq!(
        parse_rate_with_history(&raw_rate).expect("first parse"),
        parse_rate_with_history(&raw_rate).expect("second parse")
    );
}

#[test]
fn withdrawn_review_action_overrides_the_lifecycle_status() {
    let mut raw = raw_contract(
        "contract-1",
        vec![contract_revision("crev-1", "contract-1", 1_000, Some(1_000))],
    );
    raw.review_actions = vec![
        ReviewAction {
            update_info: update_info(1_100, "under review"),
            kind: ReviewActionKind::UnderReview,
        },
        ReviewAction {
            update_info: update_info(1_200, "withdrawn by state request"),
            kind: ReviewActionKind::Withdraw,
        },
    ];

    let contract = parse_contract_with_history(&raw).expect("contract");
    assert!(matches!(contract.status, PackageStatus::Submitted));
    assert_eq!(contract.consolidated_status, ConsolidatedStatus::Withdrawn);
}

#[test]
fn a_corrupt_package_is_quarantined_from_its_siblings() {
    let good = unlocked_package();
    let corrupt = raw_contract(
        "contract-9",
        vec![
            contract_revision("crev-8", "contract-9", 1_000, None),
            contract_revision("crev-9", "contract-9", 2_000, None),
        ],
    );

    let batch = parse_contracts(&[good, corrupt]);
    assert_eq!(batch.valid.len(), 1);
    assert_eq!(batch.valid[0].id, "contract-1");
    assert_eq!(batch.failed.len(), 1);
    assert_eq!(batch.failed[0].id, "contract-9");

    let err = parse_contract_with_history(&raw_contract(
        "contract-9",
        vec![
            contract_revision("crev-8", "contract-9", 1_000, None),
            contract_revision("crev-9", "contract-9", 2_000, None),
        ],
    ))
    .unwrap_err();
    assert!(matches!(err, DomainError::Invariant(_)));
}
