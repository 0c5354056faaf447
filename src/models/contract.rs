use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 合同履约状态 (由服务端计算, 客户端只展示, 不重算)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    /// 已开票金额与合同金额一致
    Complete,
    /// 尚有欠票金额
    Incomplete,
}

/// 合同行 (Contract)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub po_number: String,       // 采购单号
    pub order_date: String,      // 下单日期 (展示用)
    pub quantity: i64,           // 合同数量
    pub total_amount: BigDecimal,     // 合同金额
    pub invoiced_amount: BigDecimal,  // 已开票金额 (服务端聚合)
    pub invoiced_quantity: i64,       // 已开票数量 (服务端聚合)
    pub status: ContractStatus,
    pub invoice_count: i64,           // 已匹配发票张数
}

impl Contract {
    /// 欠票金额 = 合同金额 - 已开票金额 (仅展示用减法, 非对账逻辑)
    pub fn shortfall(&self) -> BigDecimal {
        (&self.total_amount - &self.invoiced_amount).normalized()
    }
}
