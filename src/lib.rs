pub mod admin;
pub mod app;
pub mod auth;
pub mod config;
pub mod consumptions;
pub mod dashboard;
pub mod error;
pub mod meals;
pub mod products;
pub mod state;
