pub mod bedrock;
pub mod config;
pub mod env;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod registry;
pub mod request;
pub mod response;
