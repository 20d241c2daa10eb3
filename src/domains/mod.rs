//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently has a single domain, `tools`: the market data tools
//! together with their registry and dispatcher.

pub mod tools;
