//! adapter-dns: network adapter and name-server discovery.
//!
//! A library for reading the adapter list produced by the Windows IP Helper
//! API into owned records, and for discovering the DNS name servers a
//! resolver should use on the current host.

pub mod config;
pub mod dns;
pub mod layout;
pub mod network;
