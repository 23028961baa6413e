//! Client for the keyword lookup proxy.

pub mod client;

pub use client::{ClientError, LookupClient, LookupRequest};
