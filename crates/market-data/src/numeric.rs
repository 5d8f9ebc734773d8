//! 현지화된 숫자 문자열 파서.
//!
//! 지수 목록 페이지는 pt-BR 형식으로 숫자를 표시합니다:
//! 천 단위 구분자 `.`, 소수점 `,`, 등락률의 `+` 접두사와 `%` 접미사.
//!
//! ```
//! use market_data::numeric::parse_localized_number;
//!
//! assert_eq!(parse_localized_number("1.234,56").unwrap(), 1234.56);
//! assert_eq!(parse_localized_number("+2,31%").unwrap(), 2.31);
//! assert_eq!(parse_localized_number("-0,87").unwrap(), -0.87);
//! ```

use thiserror::Error;

/// 숫자 파싱 실패.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberParseError {
    /// 공백이거나 부호/기호만 있는 입력
    #[error("empty numeric text")]
    Empty,

    /// 숫자로 해석할 수 없는 입력
    #[error("invalid numeric text: '{0}'")]
    Invalid(String),

    /// 표현 범위를 벗어난 값
    #[error("numeric text out of range: '{0}'")]
    NonFinite(String),
}

/// 표시용 숫자 문자열을 `f64`로 변환합니다.
///
/// 1. 앞뒤 공백 제거
/// 2. 앞의 `+`, 뒤의 `%` 제거
/// 3. 천 단위 구분자 `.` 제거
/// 4. 소수점 `,`를 `.`으로 치환
/// 5. 표준 형식으로 파싱 (유한값만 허용)
pub fn parse_localized_number(text: &str) -> Result<f64, NumberParseError> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let body = unsigned.strip_suffix('%').unwrap_or(unsigned).trim_end();

    let normalized: String = body
        .chars()
        .filter(|c| *c != '.')
        .map(|c| match c {
            ',' => '.',
            '\u{2212}' => '-',
            other => other,
        })
        .collect();

    if !normalized.chars().any(|c| c.is_ascii_digit()) {
        return if normalized.is_empty() {
            Err(NumberParseError::Empty)
        } else {
            Err(NumberParseError::Invalid(text.to_string()))
        };
    }

    // 부호는 맨 앞의 '-' 하나만 허용
    let digits = normalized.strip_prefix('-').unwrap_or(&normalized);
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(NumberParseError::Invalid(text.to_string()));
    }

    let value: f64 = normalized
        .parse()
        .map_err(|_| NumberParseError::Invalid(text.to_string()))?;

    if !value.is_finite() {
        return Err(NumberParseError::NonFinite(text.to_string()));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_thousands_and_decimal() {
        assert_eq!(parse_localized_number("130.000,50"), Ok(130000.50));
        assert_eq!(parse_localized_number("1.234.567,8"), Ok(1234567.8));
        assert_eq!(parse_localized_number("10,5"), Ok(10.5));
        assert_eq!(parse_localized_number("42"), Ok(42.0));
    }

    #[test]
    fn test_parse_sign_and_percent() {
        assert_eq!(parse_localized_number("+1,25%"), Ok(1.25));
        assert_eq!(parse_localized_number("-0,50%"), Ok(-0.5));
        assert_eq!(parse_localized_number(" +2,31 % "), Ok(2.31));
        assert_eq!(parse_localized_number("0,00%"), Ok(0.0));
        assert_eq!(parse_localized_number("\u{2212}3,1"), Ok(-3.1));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_localized_number(""), Err(NumberParseError::Empty));
        assert_eq!(parse_localized_number("   "), Err(NumberParseError::Empty));
        assert!(matches!(
            parse_localized_number("abc"),
            Err(NumberParseError::Invalid(_))
        ));
        assert!(matches!(
            parse_localized_number("12,,3"),
            Err(NumberParseError::Invalid(_))
        ));
        assert!(parse_localized_number("%").is_err());
        assert!(parse_localized_number("-").is_err());
        assert!(parse_localized_number("++1").is_err());
        assert!(parse_localized_number("1-2").is_err());
        assert!(parse_localized_number("inf").is_err());
        assert!(parse_localized_number("NaN").is_err());
        assert!(parse_localized_number("1e5").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let huge = "9".repeat(400);
        assert_eq!(
            parse_localized_number(&huge),
            Err(NumberParseError::NonFinite(huge.clone()))
        );
    }
}
