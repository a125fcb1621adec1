mod proof_handler;

pub use proof_handler::*;
