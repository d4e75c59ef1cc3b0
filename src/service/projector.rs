use crate::config::{EngineConfig, GlidePath, HorizonPolicy, NpsTaxPolicy, TaxSlab};
use crate::models::Window;
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive, Zero};

/// 收益测算模型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Nps,
    Index,
}

/// 单个桶的测算输入; inflation 已经归一化为小数
#[derive(Debug, Clone)]
pub struct ProjectionInput<'a> {
    pub principal: &'a BigDecimal,
    pub age: u32,
    pub annual_income: f64,
    pub years: f64,
    pub inflation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub profits: BigDecimal,
    pub tax_benefit: BigDecimal,
}

/// NPS 与指数基金两种实现共用的能力
pub trait ReturnModel {
    fn project(&self, input: &ProjectionInput<'_>) -> Projection;
}

/// NPS: 按年龄取收益率, 另算税收优惠
pub struct NpsModel<'a> {
    glide_path: &'a GlidePath,
    tax: &'a NpsTaxPolicy,
}

impl<'a> NpsModel<'a> {
    pub fn new(glide_path: &'a GlidePath, tax: &'a NpsTaxPolicy) -> Self {
        Self { glide_path, tax }
    }
}

impl ReturnModel for NpsModel<'_> {
    fn project(&self, input: &ProjectionInput<'_>) -> Projection {
        let principal = input.principal.to_f64().unwrap_or(0.0);
        let nominal = self.glide_path.rate_for(input.age);
        let profits = real_profit(principal, nominal, input.inflation, input.years);
        let benefit = tax_benefit(self.tax, principal, input.annual_income);

        Projection {
            profits: to_money(profits),
            tax_benefit: to_money(benefit),
        }
    }
}

/// 指数基金: 无税收优惠
pub struct IndexModel<'a> {
    glide_path: &'a GlidePath,
}

impl<'a> IndexModel<'a> {
    pub fn new(glide_path: &'a GlidePath) -> Self {
        Self { glide_path }
    }
}

impl ReturnModel for IndexModel<'_> {
    fn project(&self, input: &ProjectionInput<'_>) -> Projection {
        let principal = input.principal.to_f64().unwrap_or(0.0);
        let nominal = self.glide_path.rate_for(input.age);

        Projection {
            profits: to_money(real_profit(principal, nominal, input.inflation, input.years)),
            tax_benefit: BigDecimal::zero(),
        }
    }
}

pub fn model_for(kind: ModelKind, config: &EngineConfig) -> Box<dyn ReturnModel + '_> {
    match kind {
        ModelKind::Nps => Box::new(NpsModel::new(&config.nps_glide_path, &config.nps_tax)),
        ModelKind::Index => Box::new(IndexModel::new(&config.index_glide_path)),
    }
}

/// 0 < r <= 1 视为小数, r > 1 视为百分数
pub fn normalize_inflation(rate: f64) -> f64 {
    if rate > 1.0 {
        rate / 100.0
    } else {
        rate
    }
}

pub fn horizon_years(policy: &HorizonPolicy, age: u32, window: &Window) -> f64 {
    match policy {
        HorizonPolicy::UntilRetirement {
            retirement_age,
            min_years,
        } => f64::from(retirement_age.saturating_sub(age).max(*min_years)),
        HorizonPolicy::BucketDuration => window.years(),
    }
}

/// 名义复利后按通胀折现, 返回实际增值
fn real_profit(principal: f64, nominal: f64, inflation: f64, years: f64) -> f64 {
    let nominal_value = principal * (1.0 + nominal).powf(years);
    let real_value = nominal_value / (1.0 + inflation).powf(years);
    real_value - principal
}

fn tax_benefit(policy: &NpsTaxPolicy, contribution: f64, annual_income: f64) -> f64 {
    let deduction = contribution
        .min(policy.deduction_income_share * annual_income)
        .min(policy.deduction_cap)
        .max(0.0);
    if deduction <= 0.0 {
        return 0.0;
    }
    let benefit = tax_owed(&policy.slabs, annual_income) - tax_owed(&policy.slabs, annual_income - deduction);
    benefit.max(0.0)
}

/// 累进税额
pub fn tax_owed(slabs: &[TaxSlab], income: f64) -> f64 {
    let mut owed = 0.0;
    let mut lower = 0.0;
    for slab in slabs {
        let upper = slab.up_to.unwrap_or(f64::INFINITY);
        if income > lower {
            owed += (income.min(upper) - lower) * slab.rate;
        }
        lower = upper;
    }
    owed
}

fn to_money(value: f64) -> BigDecimal {
    BigDecimal::from_f64(value)
        .map(|d| d.round(2))
        .unwrap_or_else(BigDecimal::zero)
}
