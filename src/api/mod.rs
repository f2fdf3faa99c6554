// API routes and handlers

pub mod auth;
pub mod health;
pub mod predictions;
pub mod routes;
