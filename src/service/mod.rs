pub mod receipt_service;
pub mod scorer;
pub mod validator;

pub use receipt_service::{PointService, ReceiptService};
pub use scorer::{calculate_points, score_receipt, PointsBreakdown, RuleContribution};
pub use validator::Validate;
