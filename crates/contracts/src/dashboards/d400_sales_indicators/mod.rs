pub mod dto;
pub mod remote_dto;

pub use dto::*;
pub use remote_dto::*;
