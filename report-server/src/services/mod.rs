//! External collaborator services
//!
//! Everything here is consumed, not owned: failures degrade the optional
//! data they would have produced and never fail the surrounding operation.

pub mod geocoding;

pub use geocoding::{GeocodingService, SequenceGate};
