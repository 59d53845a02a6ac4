// handlers/elevated/mod.rs - Elevated handlers (admin JWT required)
//
// Security Level: Bearer token with role `admin`
// Route Prefix: /users/admin/*
// Middleware: middleware::require_admin injects AuthUser

pub mod admin;

pub use admin::*;
