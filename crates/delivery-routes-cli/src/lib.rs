//! Delivery routes CLI library.
//!
//! Output formatting shared by the `delivery-routes` binary and its tests.

pub mod output;
