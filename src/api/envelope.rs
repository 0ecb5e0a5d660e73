//! The JSON envelope wrapped around every response body.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// `{ status, count?, data, message? }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            count: None,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl Envelope<()> {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            count: None,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Payload of the aggregate endpoints.
#[derive(Debug, Serialize)]
pub struct Report<T> {
    pub count: usize,
    pub result: Vec<T>,
}

impl<T> From<Vec<T>> for Report<T> {
    fn from(result: Vec<T>) -> Self {
        Self {
            count: result.len(),
            result,
        }
    }
}
