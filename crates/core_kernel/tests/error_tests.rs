//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = MoneyError::Overflow("gst");
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(_)));
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("Missing config");

    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "Missing config"),
        _ => panic!("Expected Configuration error"),
    }
}
