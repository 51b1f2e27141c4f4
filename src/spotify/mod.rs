//! Metadata service integration
//!
//! Covers the two halves of talking to the catalog: obtaining a session
//! token with the client-credentials grant and resolving references into
//! track collections. Wire-format structs stay private to this module; the
//! rest of the crate only sees [`crate::types`] values.

mod auth;
mod models;
mod resolver;

pub use auth::{Session, get_session};
pub use resolver::SpotifyClient;
