mod regency;

pub use regency::Regency;
