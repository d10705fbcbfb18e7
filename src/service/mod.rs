pub mod catalog;
pub mod inflight;
