//! Domain layer
//!
//! Contains the invoice data model with no external dependencies.
//! - `entities`: Domain models mirroring the invoice backend contract
//! - `ports`: Trait definitions for the backend the client talks to

pub mod entities;
pub mod ports;
