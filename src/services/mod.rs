pub mod complaint_service;
pub mod error;
pub mod user_service;

pub use complaint_service::ComplaintService;
pub use error::{ServiceError, ServiceResult};
pub use user_service::UserService;
