pub mod inventory;
pub mod lead_time;
pub mod tier;
