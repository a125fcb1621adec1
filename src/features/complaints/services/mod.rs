pub mod access;
mod complaint_service;

pub use complaint_service::{generate_complaint_id, ComplaintService};
