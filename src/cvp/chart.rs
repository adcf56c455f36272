use crate::cvp::calculator::{CvpInput, CvpResult};

/// 차트용 샘플 포인트. 시각화 전용이며 후속 계산에 쓰지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// 샘플 수량 [개]
    pub quantity: f64,
    /// 매출액 [통화]
    pub sales_revenue: f64,
    /// 총비용 [통화]
    pub total_cost: f64,
    /// 고정비(수량과 무관한 수평선) [통화]
    pub fixed_cost: f64,
    /// 세전이익 [통화]
    pub profit_before_tax: f64,
}

fn point_at(input: &CvpInput, quantity: f64) -> ChartPoint {
    let total_cost = input.fixed_cost + input.variable_cost_per_unit * quantity;
    let sales_revenue = input.selling_price_per_unit * quantity;
    ChartPoint {
        quantity,
        sales_revenue,
        total_cost,
        fixed_cost: input.fixed_cost,
        profit_before_tax: sales_revenue - total_cost,
    }
}

/// 0부터 `ceil(max(목표 수량, 손익분기 수량) * 1.2)`까지 약 20개의
/// 포인트를 샘플링한다.
///
/// 균등 간격 격자를 만든 뒤, 손익분기 수량과 목표 수량이 반 스텝
/// 이내에 표현되어 있지 않으면 해당 수량을 덧붙이고 수량 오름차순으로
/// 정렬한다. 강제 포인트 근처의 간격은 불균등할 수 있다(표시용 근사).
pub fn chart_series(input: &CvpInput, result: &CvpResult) -> Vec<ChartPoint> {
    let end = (input.units.max(result.break_even_units) * 1.2).ceil();
    let step = (end / 20.0).floor().max(1.0);

    let mut quantities: Vec<f64> = Vec::new();
    let mut q = 0.0;
    while q <= end {
        quantities.push(q);
        q += step;
    }

    for target in [result.break_even_units, input.units] {
        let represented = quantities.iter().any(|&g| (g - target).abs() <= step / 2.0);
        if !represented {
            quantities.push(target);
        }
    }
    quantities.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    quantities.into_iter().map(|q| point_at(input, q)).collect()
}
