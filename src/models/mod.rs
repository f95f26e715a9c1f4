pub mod receipt;
pub mod response;

pub use receipt::{Item, Receipt};
pub use response::{HealthResponse, IdResponse, PointsResponse};
