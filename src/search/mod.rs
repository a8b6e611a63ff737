pub mod results;
pub mod dedup;
