mod common;

use std::sync::Arc;

use formguard_lib::{
    CompareOperator, CompareRule, ConfigError, Control, CustomRule, PatternRule, RangeBound,
    RangeRule, RequiredRule, ValidationDataType, ValidationRule,
};

use common::{dyn_control, input};

// ============================================================================
// Required
// ============================================================================

#[test]
fn test_required_unchanged_initial_value_is_invalid() {
    let rule = RequiredRule::new().initial_value("0");
    assert!(!rule.evaluate("0"));
    assert!(!rule.evaluate("  0 "));
    assert!(rule.evaluate("5"));
}

#[test]
fn test_required_default_rejects_blank() {
    let rule = RequiredRule::new();
    assert!(!rule.evaluate(""));
    assert!(!rule.evaluate("   "));
    assert!(rule.evaluate("x"));
}

#[test]
fn test_required_with_placeholder_accepts_blank() {
    // Clearing a placeholder still counts as a change.
    let rule = RequiredRule::new().initial_value("(none)");
    assert!(rule.evaluate(""));
}

// ============================================================================
// Pattern
// ============================================================================

#[test]
fn test_pattern_full_match() {
    let rule = PatternRule::new("^[0-9]+$").unwrap();
    assert!(rule.evaluate("123"));
    assert!(!rule.evaluate("123a"));
}

#[test]
fn test_pattern_partial_match_is_rejected() {
    let rule = PatternRule::new("[0-9]+").unwrap();
    assert!(rule.evaluate("42"));
    assert!(!rule.evaluate("42abc"));
    assert!(!rule.evaluate("abc42"));
}

#[test]
fn test_pattern_trims_value() {
    let rule = PatternRule::new("[a-z]+").unwrap();
    assert!(rule.evaluate("  abc  "));
}

#[test]
fn test_pattern_empty_value_depends_on_required() {
    let optional = PatternRule::new("^[0-9]+$").unwrap().required(false);
    assert!(optional.evaluate(""));
    assert!(optional.evaluate("   "));

    let required = PatternRule::new("^[0-9]+$").unwrap();
    assert!(required.is_required());
    assert!(!required.evaluate(""));
}

#[test]
fn test_pattern_invalid_expression_is_config_error() {
    let err = PatternRule::new("([0-9]").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { .. }));

    let mut rule = PatternRule::new("[a-z]+").unwrap();
    assert!(rule.set_expression("(").is_err());
    assert_eq!(rule.expression(), "[a-z]+");
    rule.set_expression("[0-9]+").unwrap();
    assert!(rule.evaluate("7"));
}

// ============================================================================
// Range
// ============================================================================

fn int_range() -> RangeRule {
    RangeRule::new("1", "10").data_type(ValidationDataType::Integer)
}

#[test]
fn test_range_integer() {
    let rule = int_range();
    assert_eq!(rule.evaluate("5"), Ok(true));
    assert_eq!(rule.evaluate("1"), Ok(true));
    assert_eq!(rule.evaluate("10"), Ok(true));
    assert_eq!(rule.evaluate("15"), Ok(false));
    assert_eq!(rule.evaluate("0"), Ok(false));
}

#[test]
fn test_range_unparsable_input_is_invalid_not_error() {
    assert_eq!(int_range().evaluate("abc"), Ok(false));
}

#[test]
fn test_range_inverted_bounds_is_config_error() {
    let rule = RangeRule::new("10", "1").data_type(ValidationDataType::Integer);
    assert!(matches!(
        rule.evaluate("5"),
        Err(ConfigError::InvertedRange { .. })
    ));
}

#[test]
fn test_range_missing_bound_is_config_error() {
    let rule = RangeRule::new("", "10").data_type(ValidationDataType::Integer);
    assert_eq!(
        rule.evaluate("5"),
        Err(ConfigError::MissingRangeBound {
            bound: RangeBound::Minimum
        })
    );

    let rule = RangeRule::new("1", "  ").data_type(ValidationDataType::Integer);
    assert_eq!(
        rule.evaluate("5"),
        Err(ConfigError::MissingRangeBound {
            bound: RangeBound::Maximum
        })
    );
}

#[test]
fn test_range_unparsable_bound_is_config_error() {
    let rule = RangeRule::new("one", "10").data_type(ValidationDataType::Integer);
    assert!(matches!(
        rule.evaluate("5"),
        Err(ConfigError::UnconvertibleBound {
            bound: RangeBound::Minimum,
            ..
        })
    ));
}

#[test]
fn test_range_empty_value_short_circuits_before_bounds() {
    let rule = RangeRule::new("", "").required(false);
    assert_eq!(rule.evaluate(""), Ok(true));

    let rule = RangeRule::new("", "");
    assert_eq!(rule.evaluate(""), Ok(false));
}

#[test]
fn test_range_currency() {
    let rule = RangeRule::new("$10.00", "$1,000.00").data_type(ValidationDataType::Currency);
    assert_eq!(rule.evaluate("$999.99"), Ok(true));
    assert_eq!(rule.evaluate("1,000"), Ok(true));
    assert_eq!(rule.evaluate("$1,000.01"), Ok(false));
}

#[test]
fn test_range_dates() {
    let rule = RangeRule::new("2024-01-01", "2024-12-31").data_type(ValidationDataType::Date);
    assert_eq!(rule.evaluate("2024-06-15"), Ok(true));
    assert_eq!(rule.evaluate("06/15/2025"), Ok(false));
    assert_eq!(rule.evaluate("not a date"), Ok(false));
}

#[test]
fn test_range_strings_are_ordinal() {
    let rule = RangeRule::new("b", "d");
    assert_eq!(rule.evaluate("c"), Ok(true));
    assert_eq!(rule.evaluate("a"), Ok(false));
}

#[test]
fn test_range_double_negative_zero_is_inside() {
    let rule = RangeRule::new("0", "10").data_type(ValidationDataType::Double);
    assert_eq!(rule.evaluate("-0"), Ok(true));
    assert_eq!(rule.evaluate("-0.0"), Ok(true));
    assert_eq!(rule.evaluate("-0.1"), Ok(false));
}

// ============================================================================
// Compare
// ============================================================================

#[test]
fn test_compare_greater_than_constant() {
    let rule = CompareRule::new(CompareOperator::GreaterThan)
        .value_to_compare("100")
        .data_type(ValidationDataType::Integer);
    assert_eq!(rule.evaluate("150"), Ok(true));
    assert_eq!(rule.evaluate("50"), Ok(false));
    assert_eq!(rule.evaluate("100"), Ok(false));
}

#[test]
fn test_compare_operators() {
    let check = |op, value| {
        CompareRule::new(op)
            .value_to_compare("10")
            .data_type(ValidationDataType::Double)
            .evaluate(value)
            .unwrap()
    };
    assert!(check(CompareOperator::Equal, "10.0"));
    assert!(check(CompareOperator::NotEqual, "10.5"));
    assert!(check(CompareOperator::GreaterThanEqual, "10"));
    assert!(check(CompareOperator::LessThan, "9.99"));
    assert!(check(CompareOperator::LessThanEqual, "10"));
    assert!(!check(CompareOperator::LessThan, "10"));
}

#[test]
fn test_compare_double_negative_zero_equals_zero() {
    let equal = CompareRule::new(CompareOperator::Equal)
        .value_to_compare("0")
        .data_type(ValidationDataType::Double);
    assert_eq!(equal.evaluate("-0"), Ok(true));

    let not_equal = CompareRule::new(CompareOperator::NotEqual)
        .value_to_compare("-0")
        .data_type(ValidationDataType::Double);
    assert_eq!(not_equal.evaluate("0"), Ok(false));
}

#[test]
fn test_compare_data_type_check_ignores_comparand() {
    let rule = CompareRule::new(CompareOperator::DataTypeCheck)
        .value_to_compare("not a number")
        .data_type(ValidationDataType::Integer);
    assert_eq!(rule.evaluate("abc"), Ok(false));
    assert_eq!(rule.evaluate("123"), Ok(true));

    let without_comparand =
        CompareRule::new(CompareOperator::DataTypeCheck).data_type(ValidationDataType::Integer);
    assert_eq!(without_comparand.evaluate("123"), Ok(true));
}

#[test]
fn test_compare_missing_comparand_is_config_error() {
    let rule = CompareRule::new(CompareOperator::Equal).data_type(ValidationDataType::Integer);
    assert_eq!(rule.evaluate("5"), Err(ConfigError::MissingComparand));

    let rule = CompareRule::new(CompareOperator::Equal).value_to_compare("");
    assert_eq!(rule.evaluate("5"), Err(ConfigError::MissingComparand));
}

#[test]
fn test_compare_unconvertible_comparand_is_config_error() {
    let rule = CompareRule::new(CompareOperator::Equal)
        .value_to_compare("ten")
        .data_type(ValidationDataType::Integer);
    assert!(matches!(
        rule.evaluate("10"),
        Err(ConfigError::UnconvertibleComparand { .. })
    ));
}

#[test]
fn test_compare_unconvertible_input_is_invalid() {
    let rule = CompareRule::new(CompareOperator::Equal)
        .value_to_compare("10")
        .data_type(ValidationDataType::Integer);
    assert_eq!(rule.evaluate("ten"), Ok(false));
}

#[test]
fn test_compare_against_control() {
    let password = input("password", None, 0, "hunter2");
    let rule = CompareRule::new(CompareOperator::Equal).control_to_compare(dyn_control(&password));
    assert_eq!(rule.evaluate("hunter2"), Ok(true));
    assert_eq!(rule.evaluate("hunter3"), Ok(false));

    password.set_text("hunter3");
    assert_eq!(rule.evaluate("hunter3"), Ok(true));
}

#[test]
fn test_compare_currency_decoration() {
    let rule = CompareRule::new(CompareOperator::Equal)
        .value_to_compare("1000")
        .data_type(ValidationDataType::Currency);
    assert_eq!(rule.evaluate("$1,000.00"), Ok(true));
}

// ============================================================================
// Custom
// ============================================================================

#[test]
fn test_custom_delegates_to_predicate() {
    let even = input("even", None, 0, "4");
    let rule = CustomRule::new(|value, _| value.parse::<i64>().is_ok_and(|n| n % 2 == 0));
    assert!(rule.evaluate("4", &*even));
    assert!(!rule.evaluate("3", &*even));
}

#[test]
fn test_custom_receives_control() {
    let field = input("code", None, 0, "x");
    let rule = CustomRule::new(|_, control| control.node_id() == "code");
    assert!(rule.evaluate("x", &*field));
}

#[test]
fn test_custom_empty_value_skips_predicate() {
    let field = input("field", None, 0, "");
    let rule = CustomRule::new(|_, _| panic!("predicate must not run for blank input"))
        .required(false);
    assert!(rule.evaluate("", &*field));

    let rule = CustomRule::new(|_, _| panic!("predicate must not run for blank input"));
    assert!(!rule.evaluate(" ", &*field));
}

#[test]
fn test_custom_without_predicate_is_invalid() {
    let field = input("field", None, 0, "x");
    let mut rule = CustomRule::unset();
    assert!(!rule.has_predicate());
    assert!(!rule.evaluate("x", &*field));

    rule.set_predicate(|_, _| true);
    assert!(rule.evaluate("x", &*field));
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_rule_reads_control_text() {
    let field = input("qty", None, 0, "7");
    let rule: ValidationRule = int_range().into();
    assert_eq!(rule.kind(), "range");
    assert_eq!(rule.evaluate(&*field), Ok(true));

    field.set_text("70");
    assert_eq!(rule.evaluate(&*field), Ok(false));
}

#[test]
fn test_every_optional_rule_accepts_blank() {
    let field: Arc<dyn Control> = dyn_control(&input("blank", None, 0, ""));
    let rules: Vec<ValidationRule> = vec![
        PatternRule::new("x").unwrap().required(false).into(),
        RangeRule::new("1", "2").required(false).into(),
        CompareRule::new(CompareOperator::Equal).required(false).into(),
        CustomRule::new(|_, _| false).required(false).into(),
    ];
    for rule in rules {
        assert_eq!(rule.evaluate(&*field), Ok(true), "{}", rule.kind());
    }
}
