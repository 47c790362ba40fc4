//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The only transport today is HTTP, under [`http`].

pub mod http;
