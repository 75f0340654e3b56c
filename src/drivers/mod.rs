//! Peripheral helpers that sit below the port traits.

pub mod edge_poll;

pub use edge_poll::PolledEdgeInterrupt;
