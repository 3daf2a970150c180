pub mod cache;
pub mod client;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod grid;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod toast;
pub mod views;
