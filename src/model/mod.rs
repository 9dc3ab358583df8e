pub mod alert;
pub mod config;
pub mod filter;
pub mod task;

pub use alert::*;
pub use config::*;
pub use filter::*;
pub use task::*;
