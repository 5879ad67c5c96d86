pub mod memory;
pub mod repositories;
