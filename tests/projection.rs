//! 수량별 손익표와 차트 시리즈 생성 테스트.
use breakeven_toolbox::cvp::{
    analyze, chart_series, compute, quantity_schedule, CvpInput, SensitivityAdjustments,
};

fn input(units: f64, fixed: f64, var: f64, price: f64, tax: f64) -> CvpInput {
    CvpInput {
        units,
        fixed_cost: fixed,
        variable_cost_per_unit: var,
        selling_price_per_unit: price,
        tax_rate_pct: tax,
    }
}

#[test]
fn schedule_small_target_stops_at_units() {
    // units=5 → 1..5, 추가 행 없음
    let rows = quantity_schedule(&input(5.0, 100.0, 10.0, 60.0, 0.0)).unwrap();
    assert_eq!(rows.len(), 5);
    let quantities: Vec<f64> = rows.iter().map(|r| r.quantity).collect();
    assert_eq!(quantities, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn schedule_large_target_appends_exact_row() {
    // units=15 → 1..10 + 15 (11행, 목표 수량 행은 맨 뒤)
    let rows = quantity_schedule(&input(15.0, 100.0, 10.0, 60.0, 0.0)).unwrap();
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[9].quantity, 10.0);
    assert_eq!(rows[10].quantity, 15.0);
}

#[test]
fn schedule_fractional_target_above_ten() {
    // units=10.5 → 1..10 + 정확한 10.5 행
    let rows = quantity_schedule(&input(10.5, 100.0, 10.0, 60.0, 0.0)).unwrap();
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[10].quantity, 10.5);
}

#[test]
fn schedule_rows_use_given_unit_economics() {
    let i = input(15.0, 100.0, 10.0, 60.0, 20.0);
    let rows = quantity_schedule(&i).unwrap();
    let r3 = &rows[2];
    assert_eq!(r3.quantity, 3.0);
    assert_eq!(r3.total_variable_cost, 30.0);
    assert_eq!(r3.total_cost, 130.0);
    assert_eq!(r3.sales_revenue, 180.0);
    assert_eq!(r3.profit_before_tax, 50.0);
    assert_eq!(r3.net_profit, 40.0);
}

#[test]
fn chart_grid_shape_and_endpoints() {
    // units=1000, beu=3000 → end=3600, step=180, 21개 포인트
    let i = input(1000.0, 45000.0, 20.0, 35.0, 0.0);
    let result = compute(&i).unwrap();
    let series = chart_series(&i, &result);
    assert_eq!(series.len(), 21);
    assert_eq!(series[0].quantity, 0.0);
    assert_eq!(series[0].sales_revenue, 0.0);
    assert_eq!(series[0].total_cost, i.fixed_cost);
    assert_eq!(series[20].quantity, 3600.0);
}

#[test]
fn chart_series_is_monotonic_in_quantity() {
    for (units, fixed, var, price) in [
        (1000.0, 50000.0, 20.0, 35.0),
        (100.0, 10000.0, 15.0, 25.0),
        (100.0, 990.0, 1.0, 2.0),
        (7.0, 100.0, 1.0, 3.0),
    ] {
        let i = input(units, fixed, var, price, 0.0);
        let result = compute(&i).unwrap();
        let series = chart_series(&i, &result);
        assert!(series.windows(2).all(|w| w[0].quantity < w[1].quantity));
    }
}

#[test]
fn chart_represents_break_even_and_target_within_half_step() {
    let i = input(100.0, 10000.0, 15.0, 25.0, 0.0);
    let result = compute(&i).unwrap();
    let series = chart_series(&i, &result);
    // end=1200, step=60
    let step = 60.0;
    for target in [result.break_even_units, i.units] {
        assert!(
            series
                .iter()
                .any(|p| (p.quantity - target).abs() <= step / 2.0),
            "target {target} not represented"
        );
    }
}

#[test]
fn chart_range_extends_past_break_even_when_beyond_target() {
    // beu(1000) > units(100)이면 범위는 손익분기점 기준으로 잡힌다
    let i = input(100.0, 10000.0, 15.0, 25.0, 0.0);
    let result = compute(&i).unwrap();
    let series = chart_series(&i, &result);
    let last = series.last().unwrap().quantity;
    assert!(last >= result.break_even_units);
    assert!(last <= (result.break_even_units * 1.2).ceil());
}

#[test]
fn analyze_bundles_all_outputs_and_is_all_or_nothing() {
    let i = input(15.0, 100.0, 10.0, 60.0, 0.0);
    let a = analyze(&i, &SensitivityAdjustments::default()).unwrap();
    assert_eq!(a.schedule.len(), 11);
    assert!(!a.chart.is_empty());
    assert_eq!(a.input_used, i);

    // 공헌이익 0 이하이면 표/차트 포함 아무것도 생성되지 않는다
    let bad = input(15.0, 100.0, 60.0, 60.0, 0.0);
    assert!(analyze(&bad, &SensitivityAdjustments::default()).is_err());
}

#[test]
fn analyze_twice_yields_identical_output() {
    let i = input(100.0, 10000.0, 15.0, 25.0, 30.0);
    let adj = SensitivityAdjustments {
        price_pct: 10.0,
        variable_cost_pct: -5.0,
        fixed_cost_pct: 3.0,
        tax_rate_pct: 0.0,
    };
    let a = analyze(&i, &adj).unwrap();
    let b = analyze(&i, &adj).unwrap();
    assert_eq!(a, b);
}
