//! 입력 파싱 폴백과 표시 포맷 테스트.
use breakeven_toolbox::cvp::lenient_f64;
use breakeven_toolbox::display::{
    format_currency, format_number, format_percent, units_needed, DisplayOptions,
};

#[test]
fn lenient_parse_falls_back_to_zero() {
    assert_eq!(lenient_f64("abc"), 0.0);
    assert_eq!(lenient_f64(""), 0.0);
    assert_eq!(lenient_f64("  "), 0.0);
    assert_eq!(lenient_f64("12a"), 0.0);
}

#[test]
fn lenient_parse_accepts_whitespace_and_separators() {
    assert_eq!(lenient_f64(" 42 \n"), 42.0);
    assert_eq!(lenient_f64("1,234.5"), 1234.5);
    assert_eq!(lenient_f64("-17.25"), -17.25);
}

#[test]
fn number_formatting_groups_thousands() {
    let opts = DisplayOptions::default();
    assert_eq!(format_number(1234567.891, &opts), "1,234,567.89");
    assert_eq!(format_number(999.0, &opts), "999.00");
    assert_eq!(format_number(-1234.5, &opts), "-1,234.50");
}

#[test]
fn number_formatting_without_separator() {
    let opts = DisplayOptions {
        thousands_separator: false,
        ..Default::default()
    };
    assert_eq!(format_number(1234567.891, &opts), "1234567.89");
}

#[test]
fn currency_formatting_places_sign_before_symbol() {
    let opts = DisplayOptions::default();
    assert_eq!(format_currency(116666.67, &opts), "$116,666.67");
    assert_eq!(format_currency(-35000.0, &opts), "-$35,000.00");
}

#[test]
fn currency_formatting_respects_decimals_and_symbol() {
    let opts = DisplayOptions {
        currency_symbol: "₩".to_string(),
        decimal_places: 0,
        thousands_separator: true,
    };
    assert_eq!(format_currency(50000.4, &opts), "₩50,000");
}

#[test]
fn percent_formatting() {
    assert_eq!(format_percent(40.0, 1), "40.0%");
    assert_eq!(format_percent(-12.346, 2), "-12.35%");
}

#[test]
fn units_needed_is_ceiling() {
    assert_eq!(units_needed(3333.3333), 3334.0);
    assert_eq!(units_needed(1000.0), 1000.0);
}
