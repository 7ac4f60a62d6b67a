// handlers/mod.rs - HTTP handlers
//
// Public:  GET /, GET /health
// Profile: GET /api/me, PUT /api/me

pub mod me;
pub mod system;
