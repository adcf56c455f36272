//! 손익분기 핵심 지표 회귀 테스트.
use breakeven_toolbox::cvp::{compute, units_for_target_profit, CvpError, CvpInput};

fn input(units: f64, fixed: f64, var: f64, price: f64, tax: f64) -> CvpInput {
    CvpInput {
        units,
        fixed_cost: fixed,
        variable_cost_per_unit: var,
        selling_price_per_unit: price,
        tax_rate_pct: tax,
    }
}

/// 상대 오차 1e-9 이내 비교.
fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

#[test]
fn scenario_loss_making_plan() {
    // units=1000, fixed=50000, var=20, price=35
    let r = compute(&input(1000.0, 50000.0, 20.0, 35.0, 0.0)).unwrap();
    assert!(approx(r.total_variable_cost, 20000.0));
    assert!(approx(r.total_cost, 70000.0));
    assert!(approx(r.sales_revenue, 35000.0));
    assert!(approx(r.profit_before_tax, -35000.0));
    assert!(approx(r.break_even_units, 50000.0 / 15.0));
    assert!(approx(r.break_even_revenue, 50000.0 / 15.0 * 35.0));
    // 세율 0이면 세후이익 == 세전이익
    assert_eq!(r.net_profit, r.profit_before_tax);
}

#[test]
fn scenario_with_tax_rate() {
    // units=100, fixed=10000, var=15, price=25, tax=30%
    let r = compute(&input(100.0, 10000.0, 15.0, 25.0, 30.0)).unwrap();
    assert!(approx(r.sales_revenue, 2500.0));
    assert!(approx(r.total_cost, 11500.0));
    assert!(approx(r.profit_before_tax, -9000.0));
    // 세율은 손실에도 그대로 적용된다
    assert!(approx(r.net_profit, -6300.0));
    assert!(approx(r.break_even_units, 1000.0));
    assert!(approx(r.break_even_revenue, 25000.0));
    assert!(approx(r.contribution_margin, 10.0));
    assert!(approx(r.contribution_margin_ratio, 0.4));
    assert!(approx(r.margin_of_safety_units, -900.0));
}

#[test]
fn cost_identities_hold() {
    let i = input(420.0, 12345.6, 7.89, 19.99, 12.5);
    let r = compute(&i).unwrap();
    assert!(approx(
        r.total_cost,
        i.fixed_cost + i.variable_cost_per_unit * i.units
    ));
    assert!(approx(r.profit_before_tax, r.sales_revenue - r.total_cost));
    // 손익분기 수량 x 공헌이익 == 고정비 (왕복 항등식)
    assert!(approx(
        r.break_even_units * (i.selling_price_per_unit - i.variable_cost_per_unit),
        i.fixed_cost
    ));
    assert!(approx(r.fixed_cost_per_unit, i.fixed_cost / i.units));
    assert!(approx(r.total_cost_per_unit, r.total_cost / i.units));
}

#[test]
fn compute_is_idempotent() {
    let i = input(100.0, 10000.0, 15.0, 25.0, 30.0);
    let a = compute(&i).unwrap();
    let b = compute(&i).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_contribution_margin_is_unattainable_not_invalid() {
    // 판매가 == 변동비: 0으로 나누기 보호 + 구분된 오류
    let err = compute(&input(10.0, 100.0, 25.0, 25.0, 0.0)).unwrap_err();
    assert_eq!(err, CvpError::BreakEvenUnattainable);

    let err = compute(&input(10.0, 100.0, 30.0, 25.0, 0.0)).unwrap_err();
    assert_eq!(err, CvpError::BreakEvenUnattainable);
}

#[test]
fn precondition_violations_are_invalid_input() {
    assert_eq!(
        compute(&input(0.0, 100.0, 10.0, 20.0, 0.0)).unwrap_err(),
        CvpError::InvalidInput("units")
    );
    assert_eq!(
        compute(&input(-5.0, 100.0, 10.0, 20.0, 0.0)).unwrap_err(),
        CvpError::InvalidInput("units")
    );
    assert_eq!(
        compute(&input(10.0, -1.0, 10.0, 20.0, 0.0)).unwrap_err(),
        CvpError::InvalidInput("fixed_cost")
    );
    assert_eq!(
        compute(&input(10.0, 100.0, -0.5, 20.0, 0.0)).unwrap_err(),
        CvpError::InvalidInput("variable_cost_per_unit")
    );
    assert_eq!(
        compute(&input(10.0, 100.0, 10.0, 0.0, 0.0)).unwrap_err(),
        CvpError::InvalidInput("selling_price_per_unit")
    );
    assert_eq!(
        compute(&input(10.0, 100.0, 10.0, 20.0, 150.0)).unwrap_err(),
        CvpError::InvalidInput("tax_rate_pct")
    );
    assert_eq!(
        compute(&input(f64::NAN, 100.0, 10.0, 20.0, 0.0)).unwrap_err(),
        CvpError::InvalidInput("units")
    );
}

#[test]
fn target_profit_quantity() {
    // (10000 + 5000) / 10 = 1500
    let i = input(100.0, 10000.0, 15.0, 25.0, 0.0);
    let units = units_for_target_profit(&i, 5000.0).unwrap();
    assert!(approx(units, 1500.0));

    // 목표이익 0이면 손익분기 수량과 같다
    let be = units_for_target_profit(&i, 0.0).unwrap();
    assert!(approx(be, compute(&i).unwrap().break_even_units));

    assert_eq!(
        units_for_target_profit(&i, -1.0).unwrap_err(),
        CvpError::InvalidInput("target_profit")
    );
    assert_eq!(
        units_for_target_profit(&input(10.0, 100.0, 25.0, 25.0, 0.0), 100.0).unwrap_err(),
        CvpError::BreakEvenUnattainable
    );
}
