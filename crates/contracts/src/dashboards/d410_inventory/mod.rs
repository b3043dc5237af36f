pub mod dto;
pub mod filter;

pub use dto::*;
pub use filter::*;
