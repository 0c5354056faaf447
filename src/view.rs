use crate::models::{Contract, ContractStatus, Invoice};

/// 状态徽标: 完成只显示一致标记, 未完成显示欠票金额
/// (欠票金额 = 合同金额 - 已开票金额, 仅展示层减法)
pub fn status_label(contract: &Contract) -> String {
    match contract.status {
        ContractStatus::Complete => "✓ 金额一致".to_string(),
        ContractStatus::Incomplete => format!("欠 ¥{}", contract.shortfall()),
    }
}

/// 合同主行
pub fn contract_line(contract: &Contract) -> String {
    format!(
        "{}  {}  数量: {}  ¥{}  [{}]  {} 张发票",
        contract.po_number,
        contract.order_date,
        contract.quantity,
        contract.total_amount,
        status_label(contract),
        contract.invoice_count
    )
}

/// 发票明细行
pub fn invoice_line(invoice: &Invoice) -> String {
    format!(
        "  规格: {}  数量: {}  ¥{}  {}",
        invoice.spec_model, invoice.quantity, invoice.amount, invoice.status
    )
}

/// 渲染合同列表; expanded 指定展开的合同, detail 为其明细
/// (展开但明细未到时显示加载中)
pub fn render_roster(
    contracts: &[Contract],
    expanded: Option<i64>,
    detail: Option<&[Invoice]>,
) -> String {
    if contracts.is_empty() {
        return "暂无合同数据".to_string();
    }

    let mut out = Vec::new();
    for contract in contracts {
        out.push(contract_line(contract));
        if expanded == Some(contract.id) {
            out.push("  发票明细".to_string());
            match detail {
                Some([]) => out.push("  暂无发票".to_string()),
                Some(invoices) => out.extend(invoices.iter().map(invoice_line)),
                None => out.push("  加载中...".to_string()),
            }
        }
    }
    out.join("\n")
}
