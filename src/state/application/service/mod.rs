pub mod compare_service;
pub mod sync_service;
