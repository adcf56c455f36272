use serde::{Deserialize, Serialize};

/// 표시 단계에서만 쓰는 통화/숫자 포맷 옵션. 계산 코어는 관여하지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// 통화 기호 (예: "$", "₩", "€")
    pub currency_symbol: String,
    /// 통화 소수 자릿수
    pub decimal_places: u8,
    /// 천 단위 구분 쉼표 사용 여부
    pub thousands_separator: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            decimal_places: 2,
            thousands_separator: true,
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 고정 소수 자릿수 + (옵션) 천 단위 구분으로 숫자를 포맷한다.
pub fn format_number(value: f64, opts: &DisplayOptions) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let formatted = format!("{value:.prec$}", prec = opts.decimal_places as usize);
    if !opts.thousands_separator {
        return formatted;
    }
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let mut out = String::new();
    out.push_str(sign);
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// 통화 기호를 붙여 포맷한다. 음수는 기호 앞에 부호를 둔다 (-$1,234.00).
pub fn format_currency(value: f64, opts: &DisplayOptions) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let magnitude = format_number(value.abs(), opts);
    if value < 0.0 {
        format!("-{}{}", opts.currency_symbol, magnitude)
    } else {
        format!("{}{}", opts.currency_symbol, magnitude)
    }
}

/// 0~1 또는 퍼센트 값을 "12.3%" 형태로 포맷한다. 입력은 이미 퍼센트 단위.
pub fn format_percent(value_pct: f64, decimal_places: usize) -> String {
    if !value_pct.is_finite() {
        return "N/A".to_string();
    }
    format!("{value_pct:.decimal_places$}%")
}

/// 분수 손익분기 수량을 "필요 수량"으로 올림한다.
pub fn units_needed(fractional_units: f64) -> f64 {
    fractional_units.ceil()
}
