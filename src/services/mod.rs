pub mod warmup;

pub use warmup::{Banner, ProbeFailure, ProbeStatus, RetryAction, WarmupProbe};
