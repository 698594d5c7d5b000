//! Port contracts for authentication.

pub mod gateway;

pub use gateway::AuthGateway;
