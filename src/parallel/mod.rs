pub mod concurrent_map;
pub mod batch;
