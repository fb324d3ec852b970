pub mod diff;
pub mod replay;
