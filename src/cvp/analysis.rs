use crate::cvp::calculator::{self, CvpError, CvpInput, CvpResult};
use crate::cvp::chart::{self, ChartPoint};
use crate::cvp::schedule::{self, ScheduleRow};
use crate::cvp::sensitivity::{self, SensitivityAdjustments};

/// 한 번의 재계산 사이클이 만들어내는 전체 출력.
///
/// 입력이 바뀔 때마다 새로 만들고 이전 것은 버린다. 부분 결과는 없다:
/// 계산이 거부되면 아무것도 만들어지지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct CvpAnalysis {
    /// 민감도 적용 후 실제 계산에 쓰인 파라미터
    pub input_used: CvpInput,
    /// 손익분기 지표
    pub result: CvpResult,
    /// 수량별 손익표
    pub schedule: Vec<ScheduleRow>,
    /// 차트 시리즈(수량 오름차순)
    pub chart: Vec<ChartPoint>,
}

/// 민감도 적용 → 지표 계산 → 손익표 → 차트 순으로 전체 분석을 수행한다.
pub fn analyze(
    base: &CvpInput,
    adjustments: &SensitivityAdjustments,
) -> Result<CvpAnalysis, CvpError> {
    let input_used = sensitivity::apply(base, adjustments);
    let result = calculator::compute(&input_used)?;
    let schedule = schedule::quantity_schedule(&input_used)?;
    let chart = chart::chart_series(&input_used, &result);
    Ok(CvpAnalysis {
        input_used,
        result,
        schedule,
        chart,
    })
}
