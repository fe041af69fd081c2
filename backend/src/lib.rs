//! Syndicate desk backend library.
//!
//! Layers follow the ports-and-adapters split: [`domain`] holds records,
//! visibility rules and services; [`inbound`] exposes them over HTTP;
//! [`outbound`] implements storage and credential generation; [`server`]
//! wires everything into an Actix application configured by [`settings`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
