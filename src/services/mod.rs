pub mod health_service;
pub mod submission_service;
