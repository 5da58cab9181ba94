#![doc = "The `todolist` library crate."]
#![doc = ""]
#![doc = "Multi-user todo list service: session authentication, per-user task CRUD with"]
#![doc = "filtering and pagination, and the actix-web routes exposing them. The binary"]
#![doc = "(`main.rs`) only loads configuration, picks a store and starts the server."]

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use crate::app::AppState;
pub use crate::error::AppError;
