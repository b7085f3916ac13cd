pub mod complaint;
pub mod user;

pub use complaint::{Complaint, NewComplaint};
pub use user::{NewUser, User};
