// src/tools/mod.rs
pub mod extract;
pub mod resolve;

pub use extract::Extractor;
pub use resolve::Resolver;
