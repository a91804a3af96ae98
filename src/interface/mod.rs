pub mod snapshot;
pub mod input;
