//! Remote agent integration.

pub mod http_agent_client;

pub use http_agent_client::HttpAgentClient;
