//! 线上格式: 时间统一为 `YYYY-MM-DD HH:mm:ss`, 金额按 JSON 数字输出

/// `%Y-%m-%d %H:%M:%S`, 不带时区
pub mod datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), FORMAT).map_err(|e| {
            serde::de::Error::custom(format!("invalid datetime {raw:?}, expected YYYY-MM-DD HH:mm:ss: {e}"))
        })
    }
}

/// 金额: 接受 JSON 数字或数字字符串; 整数输出为整数, 其余输出为浮点
pub mod decimal {
    use bigdecimal::{BigDecimal, ToPrimitive};
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        if value.with_scale(0) == *value {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.collect_str(value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
        Amount::deserialize(deserializer).map(|a| a.0)
    }

    /// 金额字符串长度上限, 在解析之前检查
    pub const MAX_TEXT_LEN: usize = 64;
    /// 规范化后的有效数字位数上限
    pub const MAX_DIGITS: u64 = 40;
    /// 规范化后的 scale 绝对值上限; 超出时取模运算的代价随指数增长
    pub const MAX_SCALE: i64 = 32;

    fn bounded<E: de::Error>(text: &str) -> Result<BigDecimal, E> {
        if text.len() > MAX_TEXT_LEN {
            return Err(E::custom(format!("amount longer than {MAX_TEXT_LEN} characters")));
        }
        let value = BigDecimal::from_str(text).map_err(E::custom)?;
        let normalized = value.normalized();
        let (_, scale) = normalized.as_bigint_and_exponent();
        if scale.abs() > MAX_SCALE || normalized.digits() > MAX_DIGITS {
            return Err(E::custom(format!(
                "amount {text:?} out of range: at most {MAX_DIGITS} significant digits and {MAX_SCALE} decimal places"
            )));
        }
        Ok(value)
    }

    struct Amount(BigDecimal);

    impl<'de> Deserialize<'de> for Amount {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(AmountVisitor).map(Amount)
        }
    }

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = BigDecimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if !v.is_finite() {
                return Err(E::custom("amount must be finite"));
            }
            // 走最短十进制表示, 避免 0.1 展开成二进制精确值
            bounded(&v.to_string())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            bounded(v.trim())
        }
    }

    pub mod option {
        use super::Amount;
        use bigdecimal::BigDecimal;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BigDecimal>, D::Error> {
            Option::<Amount>::deserialize(deserializer).map(|o| o.map(|a| a.0))
        }
    }
}
