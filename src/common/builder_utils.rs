use crate::{common::error::ConfigError, policy::ResizePolicy};

pub(crate) fn ensure_policy_or_panic(policy: Result<ResizePolicy, ConfigError>) -> ResizePolicy {
    match policy {
        Ok(policy) => policy,
        Err(e) => panic!("invalid resize policy: {e}"),
    }
}
