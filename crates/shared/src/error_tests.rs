use crate::error::AppError;
use rstest::rstest;

#[rstest]
#[case(AppError::Forbidden("t".into()), 403, "FORBIDDEN")]
#[case(AppError::Validation("t".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::Configuration("t".into()), 500, "CONFIGURATION_ERROR")]
#[case(AppError::Internal("t".into()), 500, "INTERNAL_ERROR")]
fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::Forbidden("role reviewer cannot create imports".into()).to_string(),
        "Access denied: role reviewer cannot create imports"
    );
    assert_eq!(
        AppError::Validation("bad date".into()).to_string(),
        "Validation error: bad date"
    );
}

#[test]
fn test_from_config_error() {
    let err: AppError = config::ConfigError::NotFound("jwt.secret".into()).into();
    assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    assert!(err.to_string().contains("jwt.secret"));
}
