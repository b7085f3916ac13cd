pub mod dto;
pub mod format;

pub use dto::{ComplaintDto, ComplaintInput, UserDto, UserInput};
pub use format::{complaint_to_dto, user_to_dto};
