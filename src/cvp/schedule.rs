use crate::cvp::calculator::{validate, CvpError, CvpInput};

/// 수량별 손익표의 한 행. 해당 수량에서의 비용/매출/이익을 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    /// 평가 수량 [개]
    pub quantity: f64,
    /// 변동비 합계 [통화]
    pub total_variable_cost: f64,
    /// 총비용 [통화]
    pub total_cost: f64,
    /// 매출액 [통화]
    pub sales_revenue: f64,
    /// 세전이익 [통화]
    pub profit_before_tax: f64,
    /// 세후이익 [통화]
    pub net_profit: f64,
}

fn row_at(input: &CvpInput, quantity: f64) -> ScheduleRow {
    let total_variable_cost = input.variable_cost_per_unit * quantity;
    let total_cost = input.fixed_cost + total_variable_cost;
    let sales_revenue = input.selling_price_per_unit * quantity;
    let profit_before_tax = sales_revenue - total_cost;
    ScheduleRow {
        quantity,
        total_variable_cost,
        total_cost,
        sales_revenue,
        profit_before_tax,
        net_profit: profit_before_tax * (1.0 - input.tax_rate_pct / 100.0),
    }
}

/// 수량 1부터 10(또는 목표 수량까지)의 손익표를 만든다.
///
/// 정수 수량 1..=min(10, floor(units)) 행을 만들고, 목표 수량이 10을
/// 넘으면 정확한 목표 수량 행을 블록 뒤에 덧붙인다. 덧붙인 행은 1~10
/// 블록 안으로 정렬해 넣지 않는다(원 동작 유지). 각 행은 민감도가
/// 적용된 현재 단위 경제성을 그대로 쓴다.
pub fn quantity_schedule(input: &CvpInput) -> Result<Vec<ScheduleRow>, CvpError> {
    validate(input)?;

    let cap = input.units.floor().min(10.0).max(0.0) as u32;
    let mut rows: Vec<ScheduleRow> = (1..=cap).map(|q| row_at(input, f64::from(q))).collect();
    if input.units > 10.0 {
        rows.push(row_at(input, input.units));
    }
    Ok(rows)
}
