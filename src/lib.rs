// rewrite-relay - Streaming Gemini rewrite relay and Baidu translation backend

pub mod baidu;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gemini;
pub mod relay;
pub mod server;
pub mod utils;
