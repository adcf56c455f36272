/// 손익분기(CVP) 계산 입력.
///
/// 모든 값은 한 기간/한 시나리오 기준이며, 세율이 없는 기본 계산기는
/// `tax_rate_pct = 0`으로 호출한다.
#[derive(Debug, Clone, PartialEq)]
pub struct CvpInput {
    /// 목표 생산/판매 수량 [개] (> 0)
    pub units: f64,
    /// 기간 고정비 합계 [통화] (>= 0)
    pub fixed_cost: f64,
    /// 단위당 변동비 [통화/개] (>= 0)
    pub variable_cost_per_unit: f64,
    /// 단위당 판매가 [통화/개] (> 0)
    pub selling_price_per_unit: f64,
    /// 세전이익에 적용할 세율 [%] (0~100)
    pub tax_rate_pct: f64,
}

/// 손익분기 계산 결과. 내부에서 반올림하지 않는다(표시 단계에서 처리).
#[derive(Debug, Clone, PartialEq)]
pub struct CvpResult {
    /// 단위당 고정비 [통화/개]
    pub fixed_cost_per_unit: f64,
    /// 변동비 합계 [통화]
    pub total_variable_cost: f64,
    /// 총비용(고정비+변동비) [통화]
    pub total_cost: f64,
    /// 단위당 총비용 [통화/개]
    pub total_cost_per_unit: f64,
    /// 매출액 [통화]
    pub sales_revenue: f64,
    /// 세전이익(손실은 음수) [통화]
    pub profit_before_tax: f64,
    /// 세후이익 [통화]. 세율 0이면 세전이익과 같다.
    pub net_profit: f64,
    /// 단위당 공헌이익(판매가-변동비) [통화/개]
    pub contribution_margin: f64,
    /// 공헌이익률(0~1)
    pub contribution_margin_ratio: f64,
    /// 손익분기 수량 [개] (분수 가능, 표시 시 올림)
    pub break_even_units: f64,
    /// 손익분기 매출액 [통화]
    pub break_even_revenue: f64,
    /// 안전한계 수량(목표 수량 - 손익분기 수량) [개]
    pub margin_of_safety_units: f64,
    /// 안전한계율(안전한계 수량 / 목표 수량)
    pub margin_of_safety_ratio: f64,
}

/// 계산 거부 사유. 예외를 던지지 않고 값으로 반환한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvpError {
    /// 전제조건 위반(0 이하 수량, 음수 비용, 0 이하 판매가 등). 위반 필드명을 담는다.
    InvalidInput(&'static str),
    /// 공헌이익이 0 이하라 손익분기점이 정의되지 않음.
    /// 개별 필드는 모두 유효할 수 있으므로 `InvalidInput`과 구분해 알린다.
    BreakEvenUnattainable,
}

impl std::fmt::Display for CvpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CvpError::InvalidInput(field) => write!(f, "잘못된 입력: {field}"),
            CvpError::BreakEvenUnattainable => {
                write!(f, "판매가가 변동비 이하라 손익분기점에 도달할 수 없습니다")
            }
        }
    }
}

impl std::error::Error for CvpError {}

/// 전제조건을 검사한다. NaN/무한대는 전부 거부한다.
pub(crate) fn validate(input: &CvpInput) -> Result<(), CvpError> {
    if !input.units.is_finite() || input.units <= 0.0 {
        return Err(CvpError::InvalidInput("units"));
    }
    if !input.fixed_cost.is_finite() || input.fixed_cost < 0.0 {
        return Err(CvpError::InvalidInput("fixed_cost"));
    }
    if !input.variable_cost_per_unit.is_finite() || input.variable_cost_per_unit < 0.0 {
        return Err(CvpError::InvalidInput("variable_cost_per_unit"));
    }
    if !input.selling_price_per_unit.is_finite() || input.selling_price_per_unit <= 0.0 {
        return Err(CvpError::InvalidInput("selling_price_per_unit"));
    }
    if !input.tax_rate_pct.is_finite() || !(0.0..=100.0).contains(&input.tax_rate_pct) {
        return Err(CvpError::InvalidInput("tax_rate_pct"));
    }
    Ok(())
}

/// 입력 한 건으로 전체 손익분기 지표를 계산한다.
///
/// 단일 패스 f64 연산이며 부수효과가 없다. 동일 입력이면 비트 단위로
/// 동일한 결과를 반환한다. 공헌이익이 0 이하이면 수치 결과 대신
/// `BreakEvenUnattainable`을 돌려준다.
pub fn compute(input: &CvpInput) -> Result<CvpResult, CvpError> {
    validate(input)?;

    let contribution_margin = input.selling_price_per_unit - input.variable_cost_per_unit;
    if contribution_margin <= 0.0 {
        return Err(CvpError::BreakEvenUnattainable);
    }

    let total_variable_cost = input.variable_cost_per_unit * input.units;
    let total_cost = input.fixed_cost + total_variable_cost;
    let sales_revenue = input.selling_price_per_unit * input.units;
    let profit_before_tax = sales_revenue - total_cost;
    // 세율은 손실에도 그대로 곱한다(이연 세효과 가정).
    let net_profit = profit_before_tax * (1.0 - input.tax_rate_pct / 100.0);
    let break_even_units = input.fixed_cost / contribution_margin;
    let margin_of_safety_units = input.units - break_even_units;

    Ok(CvpResult {
        fixed_cost_per_unit: input.fixed_cost / input.units,
        total_variable_cost,
        total_cost,
        total_cost_per_unit: total_cost / input.units,
        sales_revenue,
        profit_before_tax,
        net_profit,
        contribution_margin,
        contribution_margin_ratio: contribution_margin / input.selling_price_per_unit,
        break_even_units,
        break_even_revenue: break_even_units * input.selling_price_per_unit,
        margin_of_safety_units,
        margin_of_safety_ratio: margin_of_safety_units / input.units,
    })
}

/// 목표 세전이익을 달성하는 데 필요한 수량을 계산한다.
///
/// 반환값은 분수 수량이며, "필요 수량" 표시는 호출 측에서 올림한다.
pub fn units_for_target_profit(input: &CvpInput, target_profit: f64) -> Result<f64, CvpError> {
    validate(input)?;
    if !target_profit.is_finite() || target_profit < 0.0 {
        return Err(CvpError::InvalidInput("target_profit"));
    }
    let contribution_margin = input.selling_price_per_unit - input.variable_cost_per_unit;
    if contribution_margin <= 0.0 {
        return Err(CvpError::BreakEvenUnattainable);
    }
    Ok((input.fixed_cost + target_profit) / contribution_margin)
}
