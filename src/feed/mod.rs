mod client;
mod parser;

pub use client::FeedClient;
pub use parser::parse_papers;
