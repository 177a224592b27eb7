//! Domain logic: the pure aggregator and the command service the
//! presentation layer drives.

pub mod aggregator;
pub mod entry_service;
