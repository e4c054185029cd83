use super::common::*;
use crate::developers::domain::{DeveloperLevel, DeveloperSkillType, MemberId};
use crate::developers::error::ErrorCode;
use crate::developers::repository::RepositoryError;
use crate::developers::validation::{
    validate_create_request, validate_unique_member_id, InvertedBounds, LevelBounds, LevelPolicy,
};

#[test]
fn level_bounds_are_inclusive_for_every_level() {
    let policy = LevelPolicy::default();

    for level in DeveloperLevel::ALL {
        let bounds = policy.bounds(level);
        assert!(policy.validate_level(level, bounds.min()).is_ok(), "{level} min");
        assert!(policy.validate_level(level, bounds.max()).is_ok(), "{level} max");

        let above = policy
            .validate_level(level, bounds.max() + 1)
            .expect_err("above max rejected");
        assert_eq!(above.code(), ErrorCode::LevelExperienceYearsNotMatched);

        if let Some(below_min) = bounds.min().checked_sub(1) {
            let below = policy
                .validate_level(level, below_min)
                .expect_err("below min rejected");
            assert_eq!(below.code(), ErrorCode::LevelExperienceYearsNotMatched);
        }
    }
}

#[test]
fn new_developers_must_have_zero_years() {
    let policy = LevelPolicy::default();
    assert!(policy.validate_level(DeveloperLevel::New, 0).is_ok());
    assert!(policy.validate_level(DeveloperLevel::New, 1).is_err());
}

#[test]
fn mismatch_message_names_level_and_bounds() {
    let policy = LevelPolicy::default();
    let error = policy
        .validate_level(DeveloperLevel::Junior, 11)
        .expect_err("out of range");
    assert!(error.message().contains("JUNIOR"));
    assert!(error.message().contains("1-10"));
}

#[test]
fn configured_bounds_replace_defaults() {
    let policy = LevelPolicy::new(
        LevelBounds::new(2, 4).expect("valid"),
        LevelBounds::new(5, 40).expect("valid"),
    );

    assert!(policy.validate_level(DeveloperLevel::Junior, 4).is_ok());
    assert!(policy.validate_level(DeveloperLevel::Junior, 7).is_err());
    assert!(policy.validate_level(DeveloperLevel::Senior, 5).is_ok());
    assert_eq!(policy.bounds(DeveloperLevel::New), LevelPolicy::NEW);
    assert!(policy.validate_level(DeveloperLevel::New, 1).is_err());
}

#[test]
fn inverted_bounds_are_rejected() {
    assert_eq!(
        LevelBounds::new(9, 3),
        Err(InvertedBounds { min: 9, max: 3 })
    );
}

#[test]
fn unique_member_id_passes_when_lookup_is_empty() {
    let result = validate_unique_member_id(&MemberId::new("fresh"), |_| Ok(None));
    assert!(result.is_ok());
}

#[test]
fn unique_member_id_rejects_retired_records_too() {
    let retired = default_developer().retired(chrono::Utc::now());
    let error = validate_unique_member_id(&MemberId::new("a"), |_| Ok(Some(retired)))
        .expect_err("retired ids stay taken");
    assert_eq!(error.code(), ErrorCode::DuplicatedMemberId);
}

#[test]
fn unique_member_id_surfaces_lookup_failures_as_internal() {
    let error = validate_unique_member_id(&MemberId::new("a"), |_| {
        Err(RepositoryError::Unavailable("offline".to_string()))
    })
    .expect_err("lookup failed");
    assert_eq!(error.code(), ErrorCode::InternalServerError);
}

#[test]
fn create_request_shape_is_checked() {
    let valid = create_request(DeveloperLevel::Junior, DeveloperSkillType::FrontEnd, 7);
    assert!(validate_create_request(&valid).is_ok());

    let mut blank_id = valid.clone();
    blank_id.member_id = MemberId::new("   ");
    assert_eq!(
        validate_create_request(&blank_id)
            .expect_err("blank id")
            .code(),
        ErrorCode::InvalidRequest
    );

    let mut long_name = valid.clone();
    long_name.name = "x".repeat(51);
    assert!(validate_create_request(&long_name).is_err());

    let mut minor = valid;
    minor.age = 17;
    let error = validate_create_request(&minor).expect_err("under age");
    assert!(error.message().contains("18"));
}
