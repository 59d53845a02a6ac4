// handlers/protected/mod.rs - Protected handlers (staff JWT required)
//
// Security Level: Bearer token with role `staff`
// Route Prefix: /users/staff/*
// Middleware: middleware::require_staff injects AuthUser

pub mod staff;

pub use staff::*;
