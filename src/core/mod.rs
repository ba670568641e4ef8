//! Core types & traits: the feed error model and the feed source seam.

pub mod error;
pub mod source;

pub use error::FeedError;
pub use source::FeedSource;
