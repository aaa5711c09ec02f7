//! Tests that run the `dpf` binary

mod listing;
