use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_BASIC: &str = "main_menu.basic";
    pub const MAIN_MENU_DASHBOARD: &str = "main_menu.dashboard";
    pub const MAIN_MENU_TARGET_PROFIT: &str = "main_menu.target_profit";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const BASIC_HEADING: &str = "basic.heading";
    pub const DASHBOARD_HEADING: &str = "dashboard.heading";
    pub const TARGET_HEADING: &str = "target.heading";

    pub const PROMPT_UNITS: &str = "prompt.units";
    pub const PROMPT_FIXED_COST: &str = "prompt.fixed_cost";
    pub const PROMPT_VARIABLE_COST: &str = "prompt.variable_cost";
    pub const PROMPT_SELLING_PRICE: &str = "prompt.selling_price";
    pub const PROMPT_TAX_RATE: &str = "prompt.tax_rate";
    pub const PROMPT_TARGET_PROFIT: &str = "prompt.target_profit";
    pub const PROMPT_ADJ_PRICE: &str = "prompt.adj_price";
    pub const PROMPT_ADJ_VARIABLE_COST: &str = "prompt.adj_variable_cost";
    pub const PROMPT_ADJ_FIXED_COST: &str = "prompt.adj_fixed_cost";
    pub const PROMPT_ADJ_TAX_RATE: &str = "prompt.adj_tax_rate";
    pub const NOTE_ADJ_RANGE: &str = "note.adj_range";
    pub const NOTE_LENIENT_PARSE: &str = "note.lenient_parse";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_ADJUSTED_PARAMS: &str = "result.adjusted_params";
    pub const RESULT_FIXED_COST_PER_UNIT: &str = "result.fixed_cost_per_unit";
    pub const RESULT_TOTAL_VARIABLE_COST: &str = "result.total_variable_cost";
    pub const RESULT_TOTAL_COST: &str = "result.total_cost";
    pub const RESULT_TOTAL_COST_PER_UNIT: &str = "result.total_cost_per_unit";
    pub const RESULT_SALES_REVENUE: &str = "result.sales_revenue";
    pub const RESULT_PROFIT_BEFORE_TAX: &str = "result.profit_before_tax";
    pub const RESULT_NET_PROFIT: &str = "result.net_profit";
    pub const RESULT_CONTRIBUTION_MARGIN: &str = "result.contribution_margin";
    pub const RESULT_CONTRIBUTION_MARGIN_RATIO: &str = "result.contribution_margin_ratio";
    pub const RESULT_BREAK_EVEN_UNITS: &str = "result.break_even_units";
    pub const RESULT_BREAK_EVEN_REVENUE: &str = "result.break_even_revenue";
    pub const RESULT_UNITS_NEEDED: &str = "result.units_needed";
    pub const RESULT_MARGIN_OF_SAFETY: &str = "result.margin_of_safety";
    pub const RESULT_TARGET_UNITS: &str = "result.target_units";

    pub const SCHEDULE_HEADING: &str = "schedule.heading";
    pub const SCHEDULE_COL_QUANTITY: &str = "schedule.col_quantity";
    pub const SCHEDULE_COL_VARIABLE_COST: &str = "schedule.col_variable_cost";
    pub const SCHEDULE_COL_TOTAL_COST: &str = "schedule.col_total_cost";
    pub const SCHEDULE_COL_REVENUE: &str = "schedule.col_revenue";
    pub const SCHEDULE_COL_PROFIT: &str = "schedule.col_profit";
    pub const SCHEDULE_COL_NET_PROFIT: &str = "schedule.col_net_profit";

    pub const ERROR_INVALID_INPUT: &str = "error.invalid_input";
    pub const ERROR_BREAK_EVEN_UNATTAINABLE: &str = "error.break_even_unattainable";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_SYMBOL: &str = "settings.prompt_symbol";
    pub const SETTINGS_PROMPT_DECIMALS: &str = "settings.prompt_decimals";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const HELP_BASIC: &str = "help.basic";
    pub const HELP_DASHBOARD: &str = "help.dashboard";
    pub const HELP_TARGET_PROFIT: &str = "help.target_profit";
    pub const HELP_SETTINGS: &str = "help.settings";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" | "en-uk" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Break-Even Analysis Toolbox ===",
        MAIN_MENU_BASIC => "1) 손익분기 계산기",
        MAIN_MENU_DASHBOARD => "2) 대시보드(세율+민감도)",
        MAIN_MENU_TARGET_PROFIT => "3) 목표이익 수량",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        BASIC_HEADING => "\n-- 손익분기 계산기 --",
        DASHBOARD_HEADING => "\n-- 대시보드 (세율 + 민감도) --",
        TARGET_HEADING => "\n-- 목표이익 수량 --",
        PROMPT_UNITS => "목표 수량 [개]: ",
        PROMPT_FIXED_COST => "고정비 합계: ",
        PROMPT_VARIABLE_COST => "단위당 변동비: ",
        PROMPT_SELLING_PRICE => "단위당 판매가: ",
        PROMPT_TAX_RATE => "세율 [%] (0~100): ",
        PROMPT_TARGET_PROFIT => "목표 세전이익: ",
        PROMPT_ADJ_PRICE => "판매가 조정 [%] (-50~50, 없으면 0): ",
        PROMPT_ADJ_VARIABLE_COST => "변동비 조정 [%] (-50~50, 없으면 0): ",
        PROMPT_ADJ_FIXED_COST => "고정비 조정 [%] (-50~50, 없으면 0): ",
        PROMPT_ADJ_TAX_RATE => "세율 조정 [%] (-50~50, 없으면 0): ",
        NOTE_ADJ_RANGE => "참고: 조정값은 ±50%로 클램프됩니다.",
        NOTE_LENIENT_PARSE => "참고: 숫자가 아닌 입력은 0으로 처리합니다.",
        RESULT_HEADING => "계산 결과:",
        RESULT_ADJUSTED_PARAMS => "조정 적용 파라미터:",
        RESULT_FIXED_COST_PER_UNIT => "단위당 고정비:",
        RESULT_TOTAL_VARIABLE_COST => "변동비 합계:",
        RESULT_TOTAL_COST => "총비용:",
        RESULT_TOTAL_COST_PER_UNIT => "단위당 총비용:",
        RESULT_SALES_REVENUE => "매출액:",
        RESULT_PROFIT_BEFORE_TAX => "세전이익:",
        RESULT_NET_PROFIT => "세후이익:",
        RESULT_CONTRIBUTION_MARGIN => "단위당 공헌이익:",
        RESULT_CONTRIBUTION_MARGIN_RATIO => "공헌이익률:",
        RESULT_BREAK_EVEN_UNITS => "손익분기 수량:",
        RESULT_BREAK_EVEN_REVENUE => "손익분기 매출액:",
        RESULT_UNITS_NEEDED => "필요 수량(올림):",
        RESULT_MARGIN_OF_SAFETY => "안전한계:",
        RESULT_TARGET_UNITS => "목표이익 달성 수량:",
        SCHEDULE_HEADING => "수량별 손익표:",
        SCHEDULE_COL_QUANTITY => "수량",
        SCHEDULE_COL_VARIABLE_COST => "변동비",
        SCHEDULE_COL_TOTAL_COST => "총비용",
        SCHEDULE_COL_REVENUE => "매출액",
        SCHEDULE_COL_PROFIT => "세전이익",
        SCHEDULE_COL_NET_PROFIT => "세후이익",
        ERROR_INVALID_INPUT => "입력값이 유효하지 않습니다. 수량/판매가는 0보다 크고 비용은 음수가 아니어야 합니다.",
        ERROR_BREAK_EVEN_UNATTAINABLE => "판매가가 변동비 이하입니다. 이 가격으로는 손익분기점에 도달할 수 없습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 설정:",
        SETTINGS_OPTIONS => "1) 통화 기호  2) 소수 자릿수  3) 언어",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_SYMBOL => "통화 기호 (예: $, ₩, €): ",
        SETTINGS_PROMPT_DECIMALS => "소수 자릿수 (0~4): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (auto/ko/en): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        HELP_BASIC => "도움말: 수량, 고정비, 단위당 변동비, 단위당 판매가를 입력하면 총비용/매출/이익과 손익분기점을 계산합니다.",
        HELP_DASHBOARD => "도움말: 기본 입력에 세율과 ±50% 민감도 조정을 더해 세후이익과 조정된 손익분기점을 계산합니다.",
        HELP_TARGET_PROFIT => "도움말: 목표 세전이익을 입력하면 (고정비+목표이익)/공헌이익으로 필요한 판매 수량을 계산합니다.",
        HELP_SETTINGS => "도움말: 통화 기호와 소수 자릿수는 표시에만 적용되며 계산에는 영향이 없습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Break-Even Analysis Toolbox ===",
        MAIN_MENU_BASIC => "1) Break-even calculator",
        MAIN_MENU_DASHBOARD => "2) Dashboard (tax + sensitivity)",
        MAIN_MENU_TARGET_PROFIT => "3) Target-profit quantity",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        BASIC_HEADING => "\n-- Break-Even Calculator --",
        DASHBOARD_HEADING => "\n-- Dashboard (tax + sensitivity) --",
        TARGET_HEADING => "\n-- Target-Profit Quantity --",
        PROMPT_UNITS => "Target quantity [units]: ",
        PROMPT_FIXED_COST => "Total fixed cost: ",
        PROMPT_VARIABLE_COST => "Variable cost per unit: ",
        PROMPT_SELLING_PRICE => "Selling price per unit: ",
        PROMPT_TAX_RATE => "Tax rate [%] (0-100): ",
        PROMPT_TARGET_PROFIT => "Target pre-tax profit: ",
        PROMPT_ADJ_PRICE => "Price adjustment [%] (-50..50, 0 if none): ",
        PROMPT_ADJ_VARIABLE_COST => "Variable-cost adjustment [%] (-50..50, 0 if none): ",
        PROMPT_ADJ_FIXED_COST => "Fixed-cost adjustment [%] (-50..50, 0 if none): ",
        PROMPT_ADJ_TAX_RATE => "Tax-rate adjustment [%] (-50..50, 0 if none): ",
        NOTE_ADJ_RANGE => "Note: adjustments are clamped to ±50%.",
        NOTE_LENIENT_PARSE => "Note: non-numeric input is treated as 0.",
        RESULT_HEADING => "Results:",
        RESULT_ADJUSTED_PARAMS => "Adjusted parameters:",
        RESULT_FIXED_COST_PER_UNIT => "Fixed cost per unit:",
        RESULT_TOTAL_VARIABLE_COST => "Total variable cost:",
        RESULT_TOTAL_COST => "Total cost:",
        RESULT_TOTAL_COST_PER_UNIT => "Total cost per unit:",
        RESULT_SALES_REVENUE => "Sales revenue:",
        RESULT_PROFIT_BEFORE_TAX => "Profit before tax:",
        RESULT_NET_PROFIT => "Net profit:",
        RESULT_CONTRIBUTION_MARGIN => "Contribution margin per unit:",
        RESULT_CONTRIBUTION_MARGIN_RATIO => "Contribution margin ratio:",
        RESULT_BREAK_EVEN_UNITS => "Break-even units:",
        RESULT_BREAK_EVEN_REVENUE => "Break-even revenue:",
        RESULT_UNITS_NEEDED => "Units needed (ceiling):",
        RESULT_MARGIN_OF_SAFETY => "Margin of safety:",
        RESULT_TARGET_UNITS => "Units for target profit:",
        SCHEDULE_HEADING => "Quantity schedule:",
        SCHEDULE_COL_QUANTITY => "Qty",
        SCHEDULE_COL_VARIABLE_COST => "Variable cost",
        SCHEDULE_COL_TOTAL_COST => "Total cost",
        SCHEDULE_COL_REVENUE => "Revenue",
        SCHEDULE_COL_PROFIT => "Profit (pre-tax)",
        SCHEDULE_COL_NET_PROFIT => "Net profit",
        ERROR_INVALID_INPUT => "Invalid data. Quantity and price must be positive; costs must not be negative.",
        ERROR_BREAK_EVEN_UNATTAINABLE => "Selling price does not exceed variable cost. Break-even cannot be reached at these prices.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_OPTIONS => "1) Currency symbol  2) Decimal places  3) Language",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_SYMBOL => "Currency symbol (e.g. $, ₩, €): ",
        SETTINGS_PROMPT_DECIMALS => "Decimal places (0-4): ",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/ko/en): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        HELP_BASIC => "Help: enter quantity, fixed cost, variable cost and price to get cost/revenue/profit and the break-even point.",
        HELP_DASHBOARD => "Help: adds a tax rate and ±50% sensitivity adjustments; computes net profit and the adjusted break-even point.",
        HELP_TARGET_PROFIT => "Help: enter a target pre-tax profit; required quantity is (fixed cost + target) / contribution margin.",
        HELP_SETTINGS => "Help: currency symbol and decimals affect display only, never the computation.",
        _ => return None,
    })
}
