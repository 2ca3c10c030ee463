//! Shared data model for cartridge edition codes.
//!
//! This crate holds the identity types every other crate speaks in: the
//! hardware family prefix, the region letter, the canonical
//! `{prefix}-{game}{region}-{revision}` code, the raw dump record, and the
//! data-driven rules the code deriver consults.

pub mod code;
pub mod error;
pub mod record;
pub mod region;
pub mod rules;
pub mod system;

pub use code::CanonicalCode;
pub use error::{CodeError, RulesError};
pub use record::DumpRecord;
pub use region::Region;
pub use rules::{DeriveRules, RegionMarker, RevisionTag, UnresolvedRegionPolicy};
pub use system::SystemPrefix;
