use thiserror::Error;

/// 错误分类 (边界层据此映射 HTTP 状态码)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Scoring,
    NotFound,
    Internal,
}

/// 小票处理错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("receipt field `{field}` must not be empty")]
    EmptyField { field: String },

    #[error("invalid total: {value:?}")]
    InvalidTotal { value: String },

    #[error("invalid price for item {index}: {value:?}")]
    InvalidItemPrice { index: usize, value: String },

    #[error("invalid purchaseTime: {value:?}, expected HH:MM")]
    InvalidPurchaseTime { value: String },

    #[error("invalid purchaseDate: {value:?}, expected YYYY-MM-DD")]
    InvalidPurchaseDate { value: String },

    #[error("no receipt found for id {id}")]
    NotFound { id: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ReceiptError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField { field: field.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyField { .. } => ErrorKind::Validation,
            Self::InvalidTotal { .. }
            | Self::InvalidItemPrice { .. }
            | Self::InvalidPurchaseTime { .. }
            | Self::InvalidPurchaseDate { .. } => ErrorKind::Scoring,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// 是否属于调用方输入错误 (校验或计分失败)
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Scoring)
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
