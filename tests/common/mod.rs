#![allow(dead_code, reason = "shared across test binaries")]

use httpmock::MockServer;
use wdb_client_sdk::{Client, Config, TimePolicy, Timestamp};

pub const SECRET: &str = "s3cr3t";
pub const TS: Timestamp = 1_700_000_000;

/// Client pinned to `TS` so signatures are literal values.
pub fn client(server: &MockServer) -> Client {
    let config = Config::from_raw(&server.base_url(), SECRET)
        .expect("valid config")
        .with_time_policy(TimePolicy::Fixed(TS));
    Client::new(config)
}

pub fn ok(data: &str) -> serde_json::Value {
    serde_json::json!({ "code": 200, "msg": "", "data": data })
}
