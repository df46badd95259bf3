// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    resource_exhausted  = { Code::ResourceExhausted,  "resource_exhausted",  true },
    aborted             = { Code::Aborted,            "aborted",             true },
    not_found           = { Code::NotFound,           "not_found",           false },
    failed_precondition = { Code::FailedPrecondition, "failed_precondition", false },
    invalid_argument    = { Code::InvalidArgument,    "invalid_argument",    false },
)]
fn code_names_and_retry(code: Code, name: &str, retryable: bool) {
    assert_eq!(code.as_str(), name);
    assert_eq!(code.to_string(), name);
    assert_eq!(code.is_retryable(), retryable);
    assert_eq!(serde_json::to_value(code).unwrap(), serde_json::json!(name));
}

#[test]
fn status_display_and_roundtrip() {
    let status = Status::new(Code::ResourceExhausted, "no available instances for exec");
    assert_eq!(
        status.to_string(),
        "resource_exhausted: no available instances for exec"
    );

    let json = serde_json::to_string(&status).unwrap();
    let back: Status = serde_json::from_str(&json).unwrap();
    assert_eq!(back, status);
}
