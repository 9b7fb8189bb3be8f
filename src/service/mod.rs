// Service layer implementations

pub mod registration;
