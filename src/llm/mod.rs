//! External strategic oracle backed by an LLM

pub mod client;
pub mod context;
pub mod oracle;
pub mod parser;

pub use client::LlmClient;
pub use oracle::LlmOracle;
pub use parser::{extract_json, OracleReply};
