//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock model clients with canned responses
//! - A fixed clock
//! - Scenario fixtures
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Local, TimeZone};

use crate::error::GatewayError;
use crate::traits::{CompletionResponse, MockModelClient, MockTimeProvider};

/// Create a mock model client that always returns `response`.
///
/// # Example
///
/// ```ignore
/// let mock = mock_model_success("[]");
/// let result = mock.complete(CompletionRequest::new("x")).await;
/// assert_eq!(result.unwrap().content, "[]");
/// ```
#[must_use]
pub fn mock_model_success(response: impl Into<String>) -> MockModelClient {
    let response = response.into();
    let mut mock = MockModelClient::new();
    mock.expect_complete()
        .returning(move |_| Ok(CompletionResponse::new(response.clone(), "local")));
    mock
}

/// Create a mock model client that always fails with `error`.
#[must_use]
pub fn mock_model_error(error: GatewayError) -> MockModelClient {
    let mut mock = MockModelClient::new();
    mock.expect_complete()
        .returning(move |_| Err(error.clone()));
    mock
}

/// Create a mock model client that returns `responses` in order, one per call.
///
/// Panics in the test if called more often than there are responses.
#[must_use]
pub fn mock_model_sequence(responses: Vec<String>) -> MockModelClient {
    let queue = Mutex::new(responses.into_iter().collect::<VecDeque<_>>());
    let mut mock = MockModelClient::new();
    mock.expect_complete().returning(move |_| {
        let next = queue.lock().unwrap().pop_front().expect("unexpected model call");
        Ok(CompletionResponse::new(next, "local"))
    });
    mock
}

/// The instant every fixed clock reports: 2026-03-15 09:30 local time.
#[must_use]
pub fn fixed_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).unwrap()
}

/// Create a time provider frozen at [`fixed_time`].
#[must_use]
pub fn fixed_clock() -> MockTimeProvider {
    let mut mock = MockTimeProvider::new();
    mock.expect_now().return_const(fixed_time());
    mock
}

/// Model responses for one fully elaborated item, in call order
/// (ETA, analogy, stakeholders, innovation, future timelines).
#[must_use]
pub fn item_detail_responses(item: &str) -> Vec<String> {
    vec![
        format!(r#"{{"eta":"{item} by 2030"}}"#),
        r#"{"event":"Printing press","similarity":"Spread knowledge","lesson":"Access matters"}"#
            .to_string(),
        r#"{"stakeholders":[{"name":"Teachers","role":"Beneficiary","description":"Gain time"}]}"#
            .to_string(),
        r#"{"idea":"Global tutor mesh","potential":"Universal access","challenges":"Cost"}"#
            .to_string(),
        r#"{"optimistic":"Fast","pessimistic":"Slow","realistic":"Steady"}"#.to_string(),
    ]
}
