use serde::{Deserialize, Serialize};

/// 购物小票 (POST /receipts/process 请求体)
///
/// 缺失的字段按空值处理, 由校验阶段给出具体字段名。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String, // YYYY-MM-DD
    pub purchase_time: String, // HH:MM (24小时制)
    pub items: Vec<Item>,
    pub total: String, // 十进制金额字符串
}

/// 小票明细
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}
