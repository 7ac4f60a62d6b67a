pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod profile;
pub mod schema;
pub mod store;
pub mod validation;
