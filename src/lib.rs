//! Aggregation engine for talent token protocol events
//!
//! Decoded contract events are reduced, one at a time and in chain order, into
//! Factory, Token, Supporter, SupporterToken and TokenDayData records.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod utils;
