pub mod app;

pub use app::{empty_request, json_request, make_test_app, make_test_app_with, send, send_json};
