//! Textbook library: upload, parse into units and knowledge points, browse.

pub mod client;
pub mod types;
