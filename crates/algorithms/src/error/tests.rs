use super::*;

#[test]
fn conversion_to_core_error() {
    let core = CoreError::from(Error::Singular);
    assert!(matches!(core, CoreError::Singular));

    let core = CoreError::from(Error::dimension("mul", (3, 4), (5, 2)));
    match core {
        CoreError::DimensionMismatch {
            operation,
            left,
            right,
        } => {
            assert_eq!(operation, "mul");
            assert_eq!(left, (3, 4));
            assert_eq!(right, (5, 2));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }

    let core = CoreError::from(Error::format("signature corpus", "expected 8 tokens, found 3"));
    assert!(core.to_string().contains("expected 8 tokens"));
}

#[test]
fn validation_functions() {
    assert!(validate::square("invert", (4, 4)).is_ok());
    assert_eq!(
        validate::square("invert", (4, 5)).unwrap_err(),
        Error::dimension("invert", (4, 5), (4, 5))
    );
    assert!(validate::length("mul_vec", 7, 7).is_ok());
    assert!(validate::length("mul_vec", 6, 7).is_err());
}
