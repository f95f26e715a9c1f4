use crate::error::{ReceiptError, Result};
use crate::models::Receipt;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 非空校验 (只判断空串, 不做 trim)
pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ReceiptError::empty_field(field_name));
    }
    Ok(())
}

impl Validate for Receipt {
    /// 必填字段校验, 必须先于任何数值/日期解析执行
    fn validate(&self) -> Result<()> {
        validate_non_empty("retailer", &self.retailer)?;
        validate_non_empty("purchaseDate", &self.purchase_date)?;
        validate_non_empty("purchaseTime", &self.purchase_time)?;
        validate_non_empty("total", &self.total)?;

        for (index, item) in self.items.iter().enumerate() {
            validate_non_empty(
                &format!("items[{}].shortDescription", index),
                &item.short_description,
            )?;
            validate_non_empty(&format!("items[{}].price", index), &item.price)?;
        }

        Ok(())
    }
}
