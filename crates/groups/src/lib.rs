//! `splitledger-groups` — group records, membership, creator authorization.

pub mod group;
pub mod registry;

pub use group::Group;
pub use registry::GroupRegistry;
