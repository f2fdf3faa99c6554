// Disease risk prediction API with minimal account management

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
