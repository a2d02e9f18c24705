//! papertrade — interactive stock trading simulator.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The menu loop lives in
//! [`session`] and the command line in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod session;
pub mod cli;
