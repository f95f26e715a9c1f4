pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use error::{ErrorKind, ReceiptError};
pub use service::{PointService, ReceiptService};
pub use store::ScoreStore;
