pub mod register_response;
