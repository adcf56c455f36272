use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::cvp::{
    self, analysis, calculator, CvpError, CvpInput, ScheduleRow, SensitivityAdjustments,
};
use crate::display::{self, DisplayOptions};
use crate::i18n::{keys, Translator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    BasicCalculator,
    Dashboard,
    TargetProfit,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_BASIC));
    println!("{}", tr.t(keys::MAIN_MENU_DASHBOARD));
    println!("{}", tr.t(keys::MAIN_MENU_TARGET_PROFIT));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::BasicCalculator),
            "2" => return Ok(MenuChoice::Dashboard),
            "3" => return Ok(MenuChoice::TargetProfit),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 기본 손익분기 계산기 메뉴를 처리한다.
pub fn handle_basic_calculator(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::BASIC_HEADING));
    println!("{}", tr.t(keys::HELP_BASIC));
    println!("{}", tr.t(keys::NOTE_LENIENT_PARSE));
    let input = read_base_input(tr, 0.0)?;
    run_and_print(tr, cfg, &input, &SensitivityAdjustments::default());
    Ok(())
}

/// 대시보드(세율+민감도) 메뉴를 처리한다.
pub fn handle_dashboard(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DASHBOARD_HEADING));
    println!("{}", tr.t(keys::HELP_DASHBOARD));
    println!("{}", tr.t(keys::NOTE_ADJ_RANGE));
    let mut input = read_base_input(tr, 0.0)?;
    input.tax_rate_pct = read_f64(tr.t(keys::PROMPT_TAX_RATE))?;
    let adjustments = SensitivityAdjustments {
        price_pct: read_f64(tr.t(keys::PROMPT_ADJ_PRICE))?,
        variable_cost_pct: read_f64(tr.t(keys::PROMPT_ADJ_VARIABLE_COST))?,
        fixed_cost_pct: read_f64(tr.t(keys::PROMPT_ADJ_FIXED_COST))?,
        tax_rate_pct: read_f64(tr.t(keys::PROMPT_ADJ_TAX_RATE))?,
    };
    run_and_print(tr, cfg, &input, &adjustments);
    Ok(())
}

/// 목표이익 수량 메뉴를 처리한다.
pub fn handle_target_profit(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::TARGET_HEADING));
    println!("{}", tr.t(keys::HELP_TARGET_PROFIT));
    let input = read_base_input(tr, 0.0)?;
    let target = read_f64(tr.t(keys::PROMPT_TARGET_PROFIT))?;
    match calculator::units_for_target_profit(&input, target) {
        Ok(units) => {
            println!(
                "{} {:.2} ({} {:.0})",
                tr.t(keys::RESULT_TARGET_UNITS),
                units,
                tr.t(keys::RESULT_UNITS_NEEDED),
                display::units_needed(units)
            );
            cfg.defaults.remember(&input);
        }
        Err(e) => print_cvp_error(tr, &e),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} / {} / {}",
        tr.t(keys::SETTINGS_CURRENT),
        cfg.display.currency_symbol,
        cfg.display.decimal_places,
        cfg.language
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            let symbol = read_line(tr.t(keys::SETTINGS_PROMPT_SYMBOL))?;
            let symbol = symbol.trim();
            if symbol.is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
            } else {
                cfg.display.currency_symbol = symbol.to_string();
                println!("{}", tr.t(keys::SETTINGS_SAVED));
            }
        }
        "2" => {
            let n = read_f64(tr.t(keys::SETTINGS_PROMPT_DECIMALS))?;
            if (0.0..=4.0).contains(&n) {
                cfg.display.decimal_places = n as u8;
                println!("{}", tr.t(keys::SETTINGS_SAVED));
            } else {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
            }
        }
        "3" => {
            let code = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let code = code.trim();
            if code.is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
            } else {
                cfg.language = code.to_string();
                println!("{}", tr.t(keys::SETTINGS_SAVED));
            }
        }
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    Ok(())
}

fn read_base_input(tr: &Translator, tax_rate_pct: f64) -> Result<CvpInput, AppError> {
    Ok(CvpInput {
        units: read_f64(tr.t(keys::PROMPT_UNITS))?,
        fixed_cost: read_f64(tr.t(keys::PROMPT_FIXED_COST))?,
        variable_cost_per_unit: read_f64(tr.t(keys::PROMPT_VARIABLE_COST))?,
        selling_price_per_unit: read_f64(tr.t(keys::PROMPT_SELLING_PRICE))?,
        tax_rate_pct,
    })
}

fn run_and_print(
    tr: &Translator,
    cfg: &mut Config,
    input: &CvpInput,
    adjustments: &SensitivityAdjustments,
) {
    match analysis::analyze(input, adjustments) {
        Ok(analysis) => {
            if !adjustments.is_neutral() {
                let p = &analysis.input_used;
                println!(
                    "{} P={:.2} V={:.2} F={:.2} T={:.1}%",
                    tr.t(keys::RESULT_ADJUSTED_PARAMS),
                    p.selling_price_per_unit,
                    p.variable_cost_per_unit,
                    p.fixed_cost,
                    p.tax_rate_pct
                );
            }
            print_result(tr, &cfg.display, &analysis.result, input.tax_rate_pct > 0.0);
            print_schedule(tr, &cfg.display, &analysis.schedule);
            cfg.defaults.remember(input);
        }
        Err(e) => print_cvp_error(tr, &e),
    }
}

fn print_result(
    tr: &Translator,
    opts: &DisplayOptions,
    result: &cvp::CvpResult,
    show_net: bool,
) {
    let c = |v: f64| display::format_currency(v, opts);
    println!("{}", tr.t(keys::RESULT_HEADING));
    println!("{} {}", tr.t(keys::RESULT_FIXED_COST_PER_UNIT), c(result.fixed_cost_per_unit));
    println!("{} {}", tr.t(keys::RESULT_TOTAL_VARIABLE_COST), c(result.total_variable_cost));
    println!("{} {}", tr.t(keys::RESULT_TOTAL_COST), c(result.total_cost));
    println!("{} {}", tr.t(keys::RESULT_TOTAL_COST_PER_UNIT), c(result.total_cost_per_unit));
    println!("{} {}", tr.t(keys::RESULT_SALES_REVENUE), c(result.sales_revenue));
    println!("{} {}", tr.t(keys::RESULT_PROFIT_BEFORE_TAX), c(result.profit_before_tax));
    if show_net {
        println!("{} {}", tr.t(keys::RESULT_NET_PROFIT), c(result.net_profit));
    }
    println!("{} {}", tr.t(keys::RESULT_CONTRIBUTION_MARGIN), c(result.contribution_margin));
    println!(
        "{} {}",
        tr.t(keys::RESULT_CONTRIBUTION_MARGIN_RATIO),
        display::format_percent(result.contribution_margin_ratio * 100.0, 1)
    );
    println!(
        "{} {:.2} ({} {:.0})",
        tr.t(keys::RESULT_BREAK_EVEN_UNITS),
        result.break_even_units,
        tr.t(keys::RESULT_UNITS_NEEDED),
        display::units_needed(result.break_even_units)
    );
    println!("{} {}", tr.t(keys::RESULT_BREAK_EVEN_REVENUE), c(result.break_even_revenue));
    println!(
        "{} {:.2} ({})",
        tr.t(keys::RESULT_MARGIN_OF_SAFETY),
        result.margin_of_safety_units,
        display::format_percent(result.margin_of_safety_ratio * 100.0, 1)
    );
}

fn print_schedule(tr: &Translator, opts: &DisplayOptions, schedule: &[ScheduleRow]) {
    println!("{}", tr.t(keys::SCHEDULE_HEADING));
    println!(
        "{:>8} {:>14} {:>14} {:>14} {:>14} {:>14}",
        tr.t(keys::SCHEDULE_COL_QUANTITY),
        tr.t(keys::SCHEDULE_COL_VARIABLE_COST),
        tr.t(keys::SCHEDULE_COL_TOTAL_COST),
        tr.t(keys::SCHEDULE_COL_REVENUE),
        tr.t(keys::SCHEDULE_COL_PROFIT),
        tr.t(keys::SCHEDULE_COL_NET_PROFIT),
    );
    for row in schedule {
        println!(
            "{:>8} {:>14} {:>14} {:>14} {:>14} {:>14}",
            format!("{:.0}", row.quantity),
            display::format_currency(row.total_variable_cost, opts),
            display::format_currency(row.total_cost, opts),
            display::format_currency(row.sales_revenue, opts),
            display::format_currency(row.profit_before_tax, opts),
            display::format_currency(row.net_profit, opts),
        );
    }
}

fn print_cvp_error(tr: &Translator, err: &CvpError) {
    match err {
        CvpError::InvalidInput(field) => {
            println!("{} ({field})", tr.t(keys::ERROR_INVALID_INPUT));
        }
        CvpError::BreakEvenUnattainable => {
            println!("{}", tr.t(keys::ERROR_BREAK_EVEN_UNATTAINABLE));
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

/// 숫자 입력을 읽는다. 숫자가 아니면 0으로 폴백한다(오류 전파 없음).
fn read_f64(prompt: &str) -> Result<f64, AppError> {
    let s = read_line(prompt)?;
    Ok(cvp::lenient_f64(&s))
}
