mod complaint;
mod complaint_activity;

pub use complaint::{Complaint, ComplaintStatus, ComplaintType, COMPLAINT_COLUMNS};
pub use complaint_activity::{ActivityType, ComplaintActivity};
