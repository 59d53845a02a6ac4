// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) → Protected (staff JWT) → Elevated (admin JWT)

pub mod elevated; // /users/admin/*
pub mod protected; // /users/staff/*
pub mod public; // /, /health, /api/*
