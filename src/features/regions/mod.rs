//! Regencies (kabupaten/kota) used as complaint locations.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/regencies` | No | List regencies, optional `search` |
//! | GET | `/api/v1/regencies/{id}` | No | Get regency by BPS code |
//! | POST | `/api/v1/regencies/sync` | Super admin | Upsert a province's regencies from the geography API |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RegionService;
