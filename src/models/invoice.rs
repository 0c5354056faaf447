use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 发票明细行 (Invoice), 归属于唯一一个合同
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub spec_model: String,   // 规格型号
    pub quantity: i64,
    pub amount: BigDecimal,
    pub status: String,       // 核验状态标签 (仅展示)
    #[serde(with = "sqlite_timestamp")]
    pub created_at: NaiveDateTime,
}

/// 服务端返回 SQLite CURRENT_TIMESTAMP 文本 ("2024-01-15 10:30:00"),
/// 兼容 RFC 3339 变体
pub mod sqlite_timestamp {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(serde::de::Error::custom)
    }
}
