mod proof_dto;

pub use proof_dto::*;
