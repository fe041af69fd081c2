//! Inbound adapters translating external requests into domain port calls.
//!
//! The JSON API under [`http`] is the only transport; handlers see ports,
//! never the record store.

pub mod http;
