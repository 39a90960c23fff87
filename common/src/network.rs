pub mod port;
pub mod range;
pub mod result;
pub mod target;
