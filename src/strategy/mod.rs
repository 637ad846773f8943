pub mod optimization;
pub mod sweep;
