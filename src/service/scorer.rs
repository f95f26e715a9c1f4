use crate::error::{ReceiptError, Result};
use crate::models::Receipt;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// 单条规则的得分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContribution {
    pub rule: &'static str, // e.g. "retailer_alnum", "item_description"
    pub points: u64,
}

/// 积分明细
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub contributions: Vec<RuleContribution>,
}

impl PointsBreakdown {
    fn add(&mut self, rule: &'static str, points: u64) {
        if points > 0 {
            self.contributions.push(RuleContribution { rule, points });
        }
    }

    pub fn total(&self) -> u64 {
        self.contributions
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.points))
    }
}

impl fmt::Display for PointsBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.contributions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=+{}", c.rule, c.points)?;
        }
        write!(f, "] total={}", self.total())
    }
}

/// 计算小票积分 (调用前需通过非空校验)
pub fn calculate_points(receipt: &Receipt) -> Result<u64> {
    score_receipt(receipt).map(|breakdown| breakdown.total())
}

/// 计算小票积分并返回各规则明细
///
/// 所有金额、时间、日期字段都会先解析; 任一字段格式错误即中止, 不会跳过。
pub fn score_receipt(receipt: &Receipt) -> Result<PointsBreakdown> {
    // 1. 解析全部字段
    let total = parse_amount(&receipt.total)
        .ok_or_else(|| ReceiptError::InvalidTotal { value: receipt.total.clone() })?;
    let total_cents = to_cents(&total);

    let mut prices = Vec::with_capacity(receipt.items.len());
    for (index, item) in receipt.items.iter().enumerate() {
        let price = parse_amount(&item.price).ok_or_else(|| ReceiptError::InvalidItemPrice {
            index,
            value: item.price.clone(),
        })?;
        prices.push(price);
    }

    let purchase_time = NaiveTime::parse_from_str(&receipt.purchase_time, "%H:%M").map_err(|_| {
        ReceiptError::InvalidPurchaseTime { value: receipt.purchase_time.clone() }
    })?;
    let purchase_date = NaiveDate::parse_from_str(&receipt.purchase_date, "%Y-%m-%d").map_err(|_| {
        ReceiptError::InvalidPurchaseDate { value: receipt.purchase_date.clone() }
    })?;

    // 2. 按规则累加
    let mut breakdown = PointsBreakdown::default();

    if (total_cents.clone() % BigDecimal::from(25)).is_zero() {
        breakdown.add("total_quarter_multiple", 25);
    }
    if (total_cents % BigDecimal::from(100)).is_zero() {
        breakdown.add("total_round_dollar", 50);
    }

    let alnum = receipt.retailer.chars().filter(|c| c.is_ascii_alphanumeric()).count();
    breakdown.add("retailer_alnum", alnum as u64);

    breakdown.add("item_pairs", (receipt.items.len() / 2) as u64 * 5);

    for (item, price) in receipt.items.iter().zip(&prices) {
        // 按字节计长度
        let description_len = item.short_description.trim().len();
        if description_len % 3 == 0 {
            breakdown.add("item_description", item_description_points(price));
        }
    }

    let minutes = purchase_time.hour() * 60 + purchase_time.minute();
    if minutes > 14 * 60 && minutes < 16 * 60 {
        breakdown.add("afternoon_purchase", 10);
    }

    if purchase_date.day() % 2 == 1 {
        breakdown.add("odd_day", 6);
    }

    Ok(breakdown)
}

/// 解析非负十进制金额, 只接受数字和一个小数点
fn parse_amount(raw: &str) -> Option<BigDecimal> {
    if !raw.chars().any(|c| c.is_ascii_digit())
        || !raw.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        return None;
    }
    BigDecimal::from_str(raw).ok()
}

/// 金额转为整数分 (四舍五入), 不限位数
fn to_cents(amount: &BigDecimal) -> BigDecimal {
    let half = BigDecimal::new(5.into(), 1);
    (amount * BigDecimal::from(100) + half).with_scale(0)
}

/// ceil(price * 0.2), 精确十进制运算; 超出 u64 时取 u64::MAX
fn item_description_points(price: &BigDecimal) -> u64 {
    let value = price * BigDecimal::new(2.into(), 1);
    let floor = value.with_scale(0);
    let ceil = if floor == value { floor } else { floor + BigDecimal::from(1) };
    ceil.to_u64().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn base(total: &str) -> Receipt {
        // 零售商名无字母数字, 偶数日, 非下午时段: 基础分为0
        Receipt {
            retailer: "&".to_string(),
            purchase_date: "2022-01-02".to_string(),
            purchase_time: "09:00".to_string(),
            items: vec![],
            total: total.to_string(),
        }
    }

    fn target_receipt() -> Receipt {
        Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![
                Item::new("Mountain Dew 12PK", "6.49"),
                Item::new("Emils Cheese Pizza", "12.25"),
                Item::new("Knorr Creamy Chicken", "1.26"),
                Item::new("Doritos Nacho Cheese", "3.35"),
                Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ],
            total: "35.35".to_string(),
        }
    }

    fn corner_market_receipt() -> Receipt {
        Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![Item::new("Gatorade", "2.25"); 4],
            total: "9.00".to_string(),
        }
    }

    #[test]
    fn test_target_example() {
        let breakdown = score_receipt(&target_receipt()).unwrap();
        assert_eq!(breakdown.total(), 28);
        assert!(breakdown
            .contributions
            .contains(&RuleContribution { rule: "retailer_alnum", points: 6 }));
        assert!(breakdown
            .contributions
            .contains(&RuleContribution { rule: "odd_day", points: 6 }));
    }

    #[test]
    fn test_corner_market_example() {
        assert_eq!(calculate_points(&corner_market_receipt()), Ok(109));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let receipt = target_receipt();
        assert_eq!(calculate_points(&receipt), calculate_points(&receipt));
    }

    #[test]
    fn test_total_bonuses() {
        assert_eq!(calculate_points(&base("0.00")), Ok(75));
        assert_eq!(calculate_points(&base("10.00")), Ok(75));
        assert_eq!(calculate_points(&base("10.75")), Ok(25));
        assert_eq!(calculate_points(&base("10.10")), Ok(0));
        assert_eq!(calculate_points(&base("7")), Ok(75));
    }

    #[test]
    fn test_total_rounds_to_nearest_cent() {
        assert_eq!(calculate_points(&base("0.249")), Ok(25));
        assert_eq!(calculate_points(&base("0.244")), Ok(0));
    }

    #[test]
    fn test_retailer_counts_ascii_alphanumerics_only() {
        let mut r = base("0.01");
        r.retailer = "M&M Corner Market".to_string();
        assert_eq!(calculate_points(&r), Ok(14));

        r.retailer = "Café 24".to_string();
        assert_eq!(calculate_points(&r), Ok(5));
    }

    #[test]
    fn test_item_pairs() {
        let mut r = base("0.01");
        r.items = vec![Item::new("ab", "1.00"); 5];
        assert_eq!(calculate_points(&r), Ok(10));
    }

    #[test]
    fn test_item_description_rounds_up() {
        let mut r = base("0.01");
        r.items = vec![Item::new(" abc ", "12.25")];
        assert_eq!(calculate_points(&r), Ok(3));

        r.items = vec![Item::new("abc", "5.00")];
        assert_eq!(calculate_points(&r), Ok(1));

        r.items = vec![Item::new("abc", "5.01")];
        assert_eq!(calculate_points(&r), Ok(2));

        r.items = vec![Item::new("abc", "0.00")];
        assert_eq!(calculate_points(&r), Ok(0));
    }

    #[test]
    fn test_description_length_counts_bytes() {
        // "Crème": 5 个字符, 6 个字节
        let mut r = base("0.01");
        r.items = vec![Item::new("Crème", "10.00")];
        assert_eq!(calculate_points(&r), Ok(2));

        r.items = vec![Item::new(" Café ", "10.00")];
        assert_eq!(calculate_points(&r), Ok(0));
    }

    #[test]
    fn test_large_amounts_are_scored() {
        assert_eq!(calculate_points(&base("100000000000000000000.00")), Ok(75));
        assert_eq!(calculate_points(&base("100000000000000000000.10")), Ok(0));

        let mut r = base("0.01");
        r.items = vec![Item::new("abc", "100000000000000000000000.00")];
        assert_eq!(calculate_points(&r), Ok(u64::MAX));
    }

    #[test]
    fn test_afternoon_window_is_exclusive() {
        let mut r = base("0.01");
        for (time, expected) in [
            ("14:00", 0),
            ("14:01", 10),
            ("15:59", 10),
            ("16:00", 0),
            ("13:59", 0),
        ] {
            r.purchase_time = time.to_string();
            assert_eq!(calculate_points(&r), Ok(expected), "time {}", time);
        }
    }

    #[test]
    fn test_odd_day() {
        let mut r = base("0.01");
        r.purchase_date = "2022-02-03".to_string();
        assert_eq!(calculate_points(&r), Ok(6));
        r.purchase_date = "2022-02-28".to_string();
        assert_eq!(calculate_points(&r), Ok(0));
    }

    #[test]
    fn test_malformed_total() {
        for total in ["abc", "-1.00", "1.2.3", ".", "1e3", " 1.00"] {
            assert_eq!(
                calculate_points(&base(total)),
                Err(ReceiptError::InvalidTotal { value: total.to_string() }),
                "total {:?}",
                total
            );
        }
    }

    #[test]
    fn test_malformed_price_is_not_skipped() {
        // 描述长度不是3的倍数, 价格仍需合法
        let mut r = base("1.00");
        r.items = vec![Item::new("abc", "1.00"), Item::new("ab", "oops")];
        assert_eq!(
            calculate_points(&r),
            Err(ReceiptError::InvalidItemPrice { index: 1, value: "oops".to_string() })
        );
    }

    #[test]
    fn test_malformed_time_and_date() {
        let mut r = base("1.00");
        r.purchase_time = "25:00".to_string();
        assert_eq!(
            calculate_points(&r),
            Err(ReceiptError::InvalidPurchaseTime { value: "25:00".to_string() })
        );

        let mut r = base("1.00");
        r.purchase_date = "2022-02-30".to_string();
        assert_eq!(
            calculate_points(&r),
            Err(ReceiptError::InvalidPurchaseDate { value: "2022-02-30".to_string() })
        );
    }

    #[test]
    fn test_breakdown_display() {
        let breakdown = score_receipt(&base("1.00")).unwrap();
        assert_eq!(
            breakdown.to_string(),
            "[total_quarter_multiple=+25, total_round_dollar=+50] total=75"
        );
    }
}
