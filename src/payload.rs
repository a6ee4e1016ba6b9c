//! Request body for lifecycle operations.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::params::InstanceParams;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstancePayload<'a> {
    instance_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retailer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retailer_variant: Option<&'a str>,
    activate: bool,
    enable_disable_entity: &'a str,
    metadata: Metadata<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    executed_by: &'a str,
    build_number: Option<&'a str>,
    timestamp: String,
}

/// RFC 3339 in UTC; the fraction is microseconds and is left out when zero.
fn timestamp(now: DateTime<Utc>) -> String {
    let format = if now.nanosecond() / 1_000 == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    now.to_rfc3339_opts(format, true)
}

/// Builds the JSON body sent for `params`, stamped with `now`.
pub fn build_payload(params: &InstanceParams, now: DateTime<Utc>) -> Value {
    let payload = InstancePayload {
        instance_name: &params.instance_name,
        region: params.region.as_deref(),
        retailer: params.retailer.as_deref(),
        retailer_variant: params.retailer_variant.as_deref(),
        activate: params.activate,
        enable_disable_entity: &params.enable_disable_entity,
        metadata: Metadata {
            executed_by: &params.executed_by,
            build_number: params.build_number.as_deref(),
            timestamp: timestamp(now),
        },
    };

    // Plain strings, bools and options; serialization cannot fail.
    serde_json::to_value(payload).unwrap_or(Value::Null)
}
