mod discovery_tests;
mod endpoint_tests;
