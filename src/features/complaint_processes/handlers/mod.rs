mod process_handler;

pub use process_handler::*;
