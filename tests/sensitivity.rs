//! 민감도 조정 적용/클램프 테스트.
use breakeven_toolbox::cvp::{analyze, compute, sensitivity, CvpInput, SensitivityAdjustments};

fn base() -> CvpInput {
    CvpInput {
        units: 100.0,
        fixed_cost: 10000.0,
        variable_cost_per_unit: 15.0,
        selling_price_per_unit: 25.0,
        tax_rate_pct: 30.0,
    }
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

#[test]
fn price_increase_lowers_break_even() {
    // 판매가 +20% → 30, 공헌이익 15, beu = 10000/15 ≈ 666.67
    let adj = SensitivityAdjustments {
        price_pct: 20.0,
        ..Default::default()
    };
    let adjusted = sensitivity::apply(&base(), &adj);
    assert!(approx(adjusted.selling_price_per_unit, 30.0));
    let r = compute(&adjusted).unwrap();
    assert!(approx(r.break_even_units, 10000.0 / 15.0));
}

#[test]
fn neutral_adjustments_are_identity() {
    let adj = SensitivityAdjustments::default();
    assert!(adj.is_neutral());
    assert_eq!(sensitivity::apply(&base(), &adj), base());
}

#[test]
fn offsets_are_clamped_to_limit() {
    let adj = SensitivityAdjustments {
        price_pct: 200.0,
        variable_cost_pct: -90.0,
        ..Default::default()
    };
    let adjusted = sensitivity::apply(&base(), &adj);
    // +200% → +50%로, -90% → -50%로 클램프
    assert!(approx(adjusted.selling_price_per_unit, 37.5));
    assert!(approx(adjusted.variable_cost_per_unit, 7.5));
}

#[test]
fn adjusted_tax_rate_stays_in_percent_range() {
    let mut input = base();
    input.tax_rate_pct = 80.0;
    let adj = SensitivityAdjustments {
        tax_rate_pct: 50.0,
        ..Default::default()
    };
    // 80 * 1.5 = 120 → 100으로 클램프
    let adjusted = sensitivity::apply(&input, &adj);
    assert_eq!(adjusted.tax_rate_pct, 100.0);
    assert!(compute(&adjusted).is_ok());
}

#[test]
fn adjustments_do_not_accumulate_across_reapplication() {
    let adj = SensitivityAdjustments {
        price_pct: 10.0,
        fixed_cost_pct: -10.0,
        ..Default::default()
    };
    // 같은 기준 입력에 다시 적용해도 결과는 같다 (렌더 사이클마다 재적용)
    let once = sensitivity::apply(&base(), &adj);
    let again = sensitivity::apply(&base(), &adj);
    assert_eq!(once, again);
}

#[test]
fn adjustment_can_flip_margin_to_unattainable() {
    // 판매가 -50% → 12.5, 변동비 15 → 공헌이익 음수
    let adj = SensitivityAdjustments {
        price_pct: -50.0,
        ..Default::default()
    };
    assert!(analyze(&base(), &adj).is_err());
}

#[test]
fn units_are_never_adjusted() {
    let adj = SensitivityAdjustments {
        price_pct: 25.0,
        variable_cost_pct: 25.0,
        fixed_cost_pct: 25.0,
        tax_rate_pct: 25.0,
    };
    let adjusted = sensitivity::apply(&base(), &adj);
    assert_eq!(adjusted.units, base().units);
}

#[test]
fn analysis_reports_adjusted_input() {
    let adj = SensitivityAdjustments {
        fixed_cost_pct: -10.0,
        ..Default::default()
    };
    let a = analyze(&base(), &adj).unwrap();
    assert!(approx(a.input_used.fixed_cost, 9000.0));
    assert!(approx(a.result.break_even_units, 900.0));
}
