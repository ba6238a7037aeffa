pub mod errors;
pub mod models;
pub mod numeric;
pub mod protocol;
pub mod services;
