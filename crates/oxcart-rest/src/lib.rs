//! # Oxcart REST
//!
//! Axum controllers, authentication plumbing, and the application router.
//! Controllers resolve the authenticated principal, delegate to the service
//! layer, and translate errors into structured response payloads.

pub mod auth;
pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use auth::*;
pub use responses::*;
pub use router::create_router;
pub use state::AppState;
