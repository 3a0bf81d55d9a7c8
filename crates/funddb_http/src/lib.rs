//! HTTP transport for the campaign/contributor ledger.
//!
//! # Responsibility
//! - Map the `/v1/campaigns` routes onto core services.
//! - Translate core errors into the two-class status contract (400 / 500).
//!
//! # Invariants
//! - Handlers never touch SQL; every store call goes through core services.
//! - Store work runs on the blocking pool, never on async workers.

pub mod error;
pub mod routes;
pub mod state;

pub use error::HttpError;
pub use routes::build_router;
pub use state::AppState;
