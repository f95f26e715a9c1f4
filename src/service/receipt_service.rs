use crate::error::{ErrorKind, Result};
use crate::models::Receipt;
use crate::service::scorer;
use crate::service::validator::Validate;
use crate::store::ScoreStore;
use std::sync::Arc;

/// 积分服务接口 (HTTP 层依赖此 trait, 便于替换实现)
pub trait PointService: Send + Sync {
    /// 校验 -> 计分 -> 入库, 返回小票ID
    fn process_receipt(&self, receipt: &Receipt) -> Result<String>;

    /// 按ID查询积分
    fn get_points(&self, id: &str) -> Result<u64>;

    /// 已处理的小票数量
    fn receipt_count(&self) -> usize;
}

/// 基于内存存储的积分服务
pub struct ReceiptService {
    store: Arc<ScoreStore>,
}

impl ReceiptService {
    pub fn new(store: Arc<ScoreStore>) -> Self {
        Self { store }
    }
}

impl PointService for ReceiptService {
    fn process_receipt(&self, receipt: &Receipt) -> Result<String> {
        // 1. 非空校验
        if let Err(e) = receipt.validate() {
            tracing::warn!("Receipt from {:?} rejected: {}", receipt.retailer, e);
            return Err(e);
        }

        // 2. 计分
        let breakdown = match scorer::score_receipt(receipt) {
            Ok(breakdown) => breakdown,
            Err(e) => {
                tracing::warn!("Receipt from {:?} could not be scored: {}", receipt.retailer, e);
                return Err(e);
            }
        };
        let points = breakdown.total();

        // 3. 入库
        let id = self.store.put(points);
        tracing::debug!("Receipt {} breakdown: {}", id, breakdown);
        tracing::info!("Processed receipt {} from {:?}: {} points", id, receipt.retailer, points);

        Ok(id)
    }

    fn get_points(&self, id: &str) -> Result<u64> {
        self.store.get(id).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                tracing::info!("Points lookup miss for receipt {}", id);
            }
            e
        })
    }

    fn receipt_count(&self) -> usize {
        self.store.len()
    }
}
