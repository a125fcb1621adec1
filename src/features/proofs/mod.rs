//! Completion proofs (`unggah_bukti`) for complaints that are `On Progress`
//! or `Selesai`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProofService;
