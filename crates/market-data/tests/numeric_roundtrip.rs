//! 현지화 숫자 파서 속성 테스트

use market_data::{parse_localized_number, NumberParseError};
use proptest::prelude::*;

/// 센트 단위 정수를 pt-BR 표시 형식으로 만듭니다 (예: 123456 -> "1.234,56").
fn format_localized(cents: i64, plus_sign: bool, percent: bool) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let integer = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::new();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative {
        "-"
    } else if plus_sign {
        "+"
    } else {
        ""
    };
    let suffix = if percent { "%" } else { "" };

    format!("{}{},{:02}{}", sign, grouped, fraction, suffix)
}

#[test]
fn test_format_helper() {
    assert_eq!(format_localized(13000050, false, false), "130.000,50");
    assert_eq!(format_localized(-50, false, true), "-0,50%");
    assert_eq!(format_localized(125, true, true), "+1,25%");
    assert_eq!(format_localized(0, false, false), "0,00");
}

proptest! {
    #[test]
    fn prop_roundtrip_display_format(
        cents in -100_000_000_000i64..100_000_000_000i64,
        plus_sign in any::<bool>(),
        percent in any::<bool>(),
    ) {
        let text = format_localized(cents, plus_sign, percent);
        let expected = cents as f64 / 100.0;
        let parsed = parse_localized_number(&text).unwrap();
        prop_assert!((parsed - expected).abs() <= 1e-9 * expected.abs().max(1.0), "{} -> {}", text, parsed);
    }

    #[test]
    fn prop_surrounding_whitespace_is_ignored(cents in -1_000_000i64..1_000_000i64) {
        let text = format_localized(cents, false, false);
        prop_assert_eq!(
            parse_localized_number(&format!("  {}\t", text)),
            parse_localized_number(&text)
        );
    }

    #[test]
    fn prop_never_panics(text in "\\PC*") {
        if let Ok(value) = parse_localized_number(&text) {
            prop_assert!(value.is_finite());
        }
    }

    #[test]
    fn prop_letters_are_rejected(text in "[a-zA-Z]{1,8}") {
        prop_assert!(matches!(
            parse_localized_number(&text),
            Err(NumberParseError::Invalid(_))
        ));
    }
}

#[test]
fn test_malformed_inputs_signal_error() {
    for text in ["", "abc", "12,,3", "1,2,3", "+", "%", "--1", "1 000"] {
        assert!(
            parse_localized_number(text).is_err(),
            "'{}' should not parse",
            text
        );
    }
}
