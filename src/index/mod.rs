pub mod arena;
pub mod inverted;
