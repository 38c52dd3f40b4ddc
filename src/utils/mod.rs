// Utility functions

pub mod logger;
pub mod time;

pub use logger::*;
pub use time::*;
