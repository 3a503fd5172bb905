mod in_memory_store;
mod local_store;

pub use in_memory_store::InMemoryObjectStore;
pub use local_store::LocalObjectStore;
