mod process_dto;

pub use process_dto::*;
