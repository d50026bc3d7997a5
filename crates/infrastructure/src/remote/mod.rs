//! Remote store adapters.

mod http;

pub use http::HttpRemoteStore;
