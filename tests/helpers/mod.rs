//! Shared fixtures for the wiremock-backed integration tests.
//!
//! Each test binary compiles this module separately and uses a subset of it.

#![allow(dead_code)]

use bunny_stream::{Client, ClientBuilder};
use wiremock::{MockServer, Request};

pub const ACCESS_KEY: &str = "test-access-key-1234";
pub const LIBRARY_ID: &str = "90210";

/// Client scoped to the test library, pointed at the mock server.
pub fn test_client(server: &MockServer) -> Client {
    ClientBuilder::new()
        .access_key(ACCESS_KEY)
        .library_id(LIBRARY_ID)
        .base_url(server.uri())
        .build()
        .expect("test client should build")
}

/// Request path under the test library: `lib_path("videos")` -> `/90210/videos`.
pub fn lib_path(rest: &str) -> String {
    format!("/{LIBRARY_ID}/{rest}")
}

/// The recorded request's query pairs, in transmission order.
pub fn query_pairs(request: &Request) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Decode the recorded request's body as JSON.
pub fn body_as_json(request: &Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

/// Owned form of a literal pair list, for comparing against [`query_pairs`].
pub fn owned_pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
