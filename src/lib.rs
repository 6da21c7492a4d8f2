// src/lib.rs

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod screens;
pub mod state;
pub mod utils;

pub use routes::create_router;
