pub mod convergence_poller;
pub mod discovery_service;
