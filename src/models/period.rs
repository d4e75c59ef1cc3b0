use super::format;
use crate::error::EngineError;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0;

/// 闭区间 [start, end], 构造时保证 start <= end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    #[serde(with = "format::datetime")]
    start: NaiveDateTime,
    #[serde(with = "format::datetime")]
    end: NaiveDateTime,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvertedPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// 区间跨度, 单位为年 (365.25 天)
    pub fn years(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / SECONDS_PER_YEAR
    }
}

/// q: 窗口内的投入被替换为固定值
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPeriod {
    pub window: Window,
    pub fixed: BigDecimal,
}

/// p: 窗口内的投入额外加上 extra
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraPeriod {
    pub window: Window,
    pub extra: BigDecimal,
}

/// k: 仅用于分桶统计
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPeriod {
    pub window: Window,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixedPeriodSpec {
    #[serde(with = "format::decimal")]
    pub fixed: BigDecimal,
    #[serde(with = "format::datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "format::datetime")]
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtraPeriodSpec {
    #[serde(with = "format::decimal")]
    pub extra: BigDecimal,
    #[serde(with = "format::datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "format::datetime")]
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportPeriodSpec {
    #[serde(with = "format::datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "format::datetime")]
    pub end: NaiveDateTime,
}

impl TryFrom<FixedPeriodSpec> for FixedPeriod {
    type Error = EngineError;

    fn try_from(spec: FixedPeriodSpec) -> Result<Self, Self::Error> {
        Ok(FixedPeriod {
            window: Window::new(spec.start, spec.end)?,
            fixed: spec.fixed,
        })
    }
}

impl TryFrom<ExtraPeriodSpec> for ExtraPeriod {
    type Error = EngineError;

    fn try_from(spec: ExtraPeriodSpec) -> Result<Self, Self::Error> {
        Ok(ExtraPeriod {
            window: Window::new(spec.start, spec.end)?,
            extra: spec.extra,
        })
    }
}

impl TryFrom<ReportPeriodSpec> for ReportPeriod {
    type Error = EngineError;

    fn try_from(spec: ReportPeriodSpec) -> Result<Self, Self::Error> {
        Ok(ReportPeriod {
            window: Window::new(spec.start, spec.end)?,
        })
    }
}

/// 一次请求的全部窗口, q/p/k 各自保持输入顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSet {
    pub q: Vec<FixedPeriod>,
    pub p: Vec<ExtraPeriod>,
    pub k: Vec<ReportPeriod>,
}

impl PeriodSet {
    pub fn from_specs(
        q: Vec<FixedPeriodSpec>,
        p: Vec<ExtraPeriodSpec>,
        k: Vec<ReportPeriodSpec>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            q: q.into_iter().map(FixedPeriod::try_from).collect::<Result<_, _>>()?,
            p: p.into_iter().map(ExtraPeriod::try_from).collect::<Result<_, _>>()?,
            k: k.into_iter().map(ReportPeriod::try_from).collect::<Result<_, _>>()?,
        })
    }
}
