//! Validation of the instance parameters supplied by the CI job.

use log::debug;

use crate::error::ApiError;
use crate::operation::Operation;

pub const INSTANCE_NAME_MIN_LEN: usize = 3;
pub const INSTANCE_NAME_MAX_LEN: usize = 50;

const DEFAULT_ENABLE_DISABLE_ENTITY: &str = "all";
const DEFAULT_EXECUTED_BY: &str = "System";

/// Parameters as they arrive from the environment, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pub operation: Option<String>,
    pub instance_name: Option<String>,
    pub region: Option<String>,
    pub retailer: Option<String>,
    pub retailer_variant: Option<String>,
    pub activate: Option<String>,
    pub enable_disable_entity: Option<String>,
    pub executed_by: Option<String>,
    pub build_number: Option<String>,
}

/// Validated, typed parameters for one lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceParams {
    pub operation: Operation,
    pub instance_name: String,
    pub region: Option<String>,
    pub retailer: Option<String>,
    pub retailer_variant: Option<String>,
    pub activate: bool,
    pub enable_disable_entity: String,
    pub executed_by: String,
    pub build_number: Option<String>,
}

impl RawParams {
    /// Checks required fields, then the instance name, then the operation.
    pub fn validate(self) -> Result<InstanceParams, ApiError> {
        let operation = require(self.operation, "operation")?;
        let instance_name = require(self.instance_name, "instanceName")?;

        validate_instance_name(&instance_name)?;
        let operation = operation.parse::<Operation>()?;

        debug!("Parameters validated for {} on {}", operation, instance_name);

        Ok(InstanceParams {
            operation,
            instance_name,
            region: self.region,
            retailer: self.retailer,
            retailer_variant: self.retailer_variant,
            activate: self
                .activate
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
            enable_disable_entity: self
                .enable_disable_entity
                .unwrap_or_else(|| DEFAULT_ENABLE_DISABLE_ENTITY.to_string()),
            executed_by: self
                .executed_by
                .unwrap_or_else(|| DEFAULT_EXECUTED_BY.to_string()),
            build_number: self.build_number,
        })
    }
}

fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!(
            "Missing required field: {}",
            field
        ))),
    }
}

/// 3 to 50 characters, each alphanumeric, `-` or `_`.
pub fn validate_instance_name(name: &str) -> Result<(), ApiError> {
    let len = name.chars().count();
    if !(INSTANCE_NAME_MIN_LEN..=INSTANCE_NAME_MAX_LEN).contains(&len) {
        return Err(ApiError::validation(format!(
            "Instance name must be between {} and {} characters",
            INSTANCE_NAME_MIN_LEN, INSTANCE_NAME_MAX_LEN
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ApiError::validation(
            "Instance name can only contain alphanumeric characters, hyphens, and underscores",
        ));
    }

    Ok(())
}
