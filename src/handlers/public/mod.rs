// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Route Prefix: /api (signup and login), plus / and /health

pub mod auth;
pub mod status;

pub use auth::*;
pub use status::{health, root};
