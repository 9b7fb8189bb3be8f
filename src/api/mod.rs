// API module organization
// Consul-compatible HTTP surface over the registration service

pub mod agent;
pub mod catalog;
pub mod health;
pub mod model;
pub mod route;
