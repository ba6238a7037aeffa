pub mod ethereum;
pub mod persistence;
