pub mod day_rollup;
pub mod reducers;
pub mod unit_of_work;

pub use reducers::{apply_event, ReducerContext};
pub use unit_of_work::{InvariantViolation, UnitOfWork};
