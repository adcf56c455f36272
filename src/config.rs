use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cvp::CvpInput;
use crate::display::DisplayOptions;

/// 마지막으로 사용한(또는 최초 실행 시 예시) 입력 파라미터.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultParams {
    pub units: f64,
    pub fixed_cost: f64,
    pub variable_cost_per_unit: f64,
    pub selling_price_per_unit: f64,
    pub tax_rate_pct: f64,
}

impl Default for DefaultParams {
    fn default() -> Self {
        Self {
            units: 1000.0,
            fixed_cost: 50000.0,
            variable_cost_per_unit: 20.0,
            selling_price_per_unit: 35.0,
            tax_rate_pct: 0.0,
        }
    }
}

impl DefaultParams {
    /// 계산 입력으로 변환한다.
    pub fn to_input(&self) -> CvpInput {
        CvpInput {
            units: self.units,
            fixed_cost: self.fixed_cost,
            variable_cost_per_unit: self.variable_cost_per_unit,
            selling_price_per_unit: self.selling_price_per_unit,
            tax_rate_pct: self.tax_rate_pct,
        }
    }

    /// 성공한 계산의 입력을 다음 실행 기본값으로 기억한다.
    pub fn remember(&mut self, input: &CvpInput) {
        self.units = input.units;
        self.fixed_cost = input.fixed_cost;
        self.variable_cost_per_unit = input.variable_cost_per_unit;
        self.selling_price_per_unit = input.selling_price_per_unit;
        self.tax_rate_pct = input.tax_rate_pct;
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 언어 코드 (auto/ko/ko-kr/en/en-us)
    pub language: String,
    /// 외부 언어팩 디렉터리 (없으면 내장 문자열 사용)
    pub language_pack_dir: Option<String>,
    /// 통화/숫자 표시 옵션
    pub display: DisplayOptions,
    /// 폼 기본 입력값
    pub defaults: DefaultParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            display: DisplayOptions::default(),
            defaults: DefaultParams::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }
}
