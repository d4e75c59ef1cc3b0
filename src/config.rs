use crate::error::EngineError;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5477,
        }
    }
}

/// 计算引擎的策略参数 (取整单位、收益率曲线、NPS 税收优惠)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rounding_unit: u32,
    /// 请求中的 wage 按月计, 年收入 = wage * 12
    pub wage_periods_per_year: u32,
    pub horizon: HorizonPolicy,
    pub nps_glide_path: GlidePath,
    pub index_glide_path: GlidePath,
    pub nps_tax: NpsTaxPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding_unit: 100,
            wage_periods_per_year: 12,
            horizon: HorizonPolicy::default(),
            nps_glide_path: GlidePath::nps(),
            index_glide_path: GlidePath::index(),
            nps_tax: NpsTaxPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// 启动时校验, 避免在请求路径上才暴露配置错误
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rounding_unit == 0 {
            return Err(EngineError::Config("rounding_unit must be positive".into()));
        }
        if self.wage_periods_per_year == 0 {
            return Err(EngineError::Config(
                "wage_periods_per_year must be positive".into(),
            ));
        }
        if self.nps_glide_path.bands.is_empty() || self.index_glide_path.bands.is_empty() {
            return Err(EngineError::Config("glide path needs at least one band".into()));
        }
        if self.nps_tax.slabs.is_empty() {
            return Err(EngineError::Config("nps tax policy needs at least one slab".into()));
        }
        Ok(())
    }
}

/// 复利计算的投资年限
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum HorizonPolicy {
    /// 距退休年龄的年数, 不足 min_years 按 min_years 计
    UntilRetirement { retirement_age: u32, min_years: u32 },
    /// 统计窗口本身的跨度 (end - start)
    BucketDuration,
}

impl Default for HorizonPolicy {
    fn default() -> Self {
        HorizonPolicy::UntilRetirement {
            retirement_age: 60,
            min_years: 5,
        }
    }
}

/// 年龄分段的名义年化收益率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlidePath {
    pub bands: Vec<GlideBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlideBand {
    pub up_to_age: u32,
    pub rate: f64,
}

impl GlidePath {
    pub fn nps() -> Self {
        Self::from_pairs(&[(35, 0.0711), (45, 0.0680), (55, 0.0640), (u32::MAX, 0.0600)])
    }

    pub fn index() -> Self {
        Self::from_pairs(&[(35, 0.1449), (45, 0.1350), (55, 0.1200), (u32::MAX, 0.1050)])
    }

    fn from_pairs(pairs: &[(u32, f64)]) -> Self {
        Self {
            bands: pairs
                .iter()
                .map(|&(up_to_age, rate)| GlideBand { up_to_age, rate })
                .collect(),
        }
    }

    /// 第一个 age <= up_to_age 的分段生效, 超出所有分段时取最后一段
    pub fn rate_for(&self, age: u32) -> f64 {
        self.bands
            .iter()
            .find(|b| age <= b.up_to_age)
            .or_else(|| self.bands.last())
            .map(|b| b.rate)
            .unwrap_or(0.0)
    }
}

/// NPS 税收优惠: 可扣除额 = min(投入, 年收入 * 比例, 上限), 优惠 = 扣除前后税额之差
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpsTaxPolicy {
    pub deduction_income_share: f64,
    pub deduction_cap: f64,
    pub slabs: Vec<TaxSlab>,
}

/// 累进税率档; up_to 为空表示最高档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub up_to: Option<f64>,
    pub rate: f64,
}

impl Default for NpsTaxPolicy {
    fn default() -> Self {
        let slab = |up_to: Option<f64>, rate: f64| TaxSlab { up_to, rate };
        Self {
            deduction_income_share: 0.10,
            deduction_cap: 200_000.0,
            slabs: vec![
                slab(Some(700_000.0), 0.0),
                slab(Some(1_000_000.0), 0.10),
                slab(Some(1_200_000.0), 0.15),
                slab(Some(1_500_000.0), 0.20),
                slab(None, 0.30),
            ],
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> roundup.toml (可选) -> ROUNDUP__* 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("ROUNDUP_CONFIG").unwrap_or_else(|_| "roundup".to_string());

        Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("ROUNDUP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
