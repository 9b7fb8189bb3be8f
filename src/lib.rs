pub mod api;
pub mod discovery;
pub mod error;
pub mod model;
pub mod service;
