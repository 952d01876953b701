pub mod memory;

pub use memory::MemoryStorage;
