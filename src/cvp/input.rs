/// 폼 텍스트 필드에서 온 숫자 문자열을 관대하게 파싱한다.
///
/// 앞뒤 공백과 천 단위 구분 쉼표를 허용하고, 파싱에 실패하면 오류를
/// 전파하는 대신 0.0으로 폴백한다(빈 필드 = 0 입력으로 취급).
pub fn lenient_f64(text: &str) -> f64 {
    let cleaned = text.trim().replace(',', "");
    cleaned.parse::<f64>().unwrap_or(0.0)
}
