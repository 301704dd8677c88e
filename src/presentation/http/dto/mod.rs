pub mod response_dto;

pub use response_dto::*;
