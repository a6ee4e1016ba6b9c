//! Instance lifecycle operations and their endpoints.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;
use crate::http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Onboard,
    Activate,
    Deactivate,
    Update,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Onboard,
        Operation::Activate,
        Operation::Deactivate,
        Operation::Update,
    ];

    /// Name used by the CI job and in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Onboard => "onboardInstance",
            Operation::Activate => "activateInstance",
            Operation::Deactivate => "deactivateInstance",
            Operation::Update => "updateInstance",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Onboard => "/api/v1/instance-controller/onboard",
            Operation::Activate => "/api/v1/instance-controller/activate",
            Operation::Deactivate => "/api/v1/instance-controller/deactivate",
            Operation::Update => "/api/v1/instance-controller/update",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Operation::Update => Method::Put,
            _ => Method::Post,
        }
    }

    /// Full URL for this operation under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.endpoint())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ApiError::validation(format!("Invalid operation: {}", s)))
    }
}
