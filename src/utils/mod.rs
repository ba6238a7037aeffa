pub mod logging;
pub mod retry_handler;
