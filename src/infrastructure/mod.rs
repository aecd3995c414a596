//! Adapters behind the domain ports: catalog sources and the simulated gateway.

pub mod in_memory;
pub mod json_catalog;
pub mod simulated_gateway;
