pub mod filter;
pub mod task_store;
