pub mod manager;
pub mod slot;
