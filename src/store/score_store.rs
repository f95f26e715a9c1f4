use crate::error::{ReceiptError, Result};
use dashmap::DashMap;
use uuid::Uuid;

/// 积分存储: 小票ID -> 积分
///
/// 只有写入与查询, 没有更新和删除; 记录一经写入在进程生命周期内不变。
/// 内部使用分片加锁的 DashMap, 可在多个请求间共享。
#[derive(Debug, Default)]
pub struct ScoreStore {
    scores: DashMap<String, u64>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成新ID并写入积分
    pub fn put(&self, points: u64) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            // v4 碰撞概率可忽略, 但已存在的记录不能被覆盖
            if let dashmap::mapref::entry::Entry::Vacant(slot) = self.scores.entry(id.clone()) {
                slot.insert(points);
                return id;
            }
        }
    }

    /// 按ID查询积分
    pub fn get(&self, id: &str) -> Result<u64> {
        self.scores
            .get(id)
            .map(|entry| *entry.value())
            .ok_or_else(|| ReceiptError::NotFound { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
