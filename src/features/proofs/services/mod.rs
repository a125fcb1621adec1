mod proof_service;

pub use proof_service::ProofService;
