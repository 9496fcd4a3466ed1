#![allow(dead_code)]

use multipart_codec::{Part, ReadOutcome};

pub fn tracing_init() {
    // From env var: `RUST_LOG`
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();
}

pub fn expect_part(outcome: ReadOutcome) -> Part {
    match outcome {
        ReadOutcome::Part(part) => part,
        other => panic!("expected a part, got {other:?}"),
    }
}
