use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ParseError;

/// ident.me 返回的单个地址记录，除地址外所有字段都是可选的
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdentityRecord {
    #[serde(rename = "ip")]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(rename = "aso", skip_serializing_if = "Option::is_none")]
    pub as_organization: Option<String>,
    #[serde(rename = "asn", skip_serializing_if = "Option::is_none")]
    pub as_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "cc", skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "postal", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "tz", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[cfg(test)]
impl IdentityRecord {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }
}

/// 解析响应体。
///
/// `ip` 缺失或不是字符串时整体失败；其他字段类型不符时只把该字段当作缺失。
pub fn parse_record(body: &[u8]) -> Result<IdentityRecord, ParseError> {
    let doc: Value = serde_json::from_slice(body)?;
    let obj = doc.as_object().ok_or(ParseError::MissingMandatoryField)?;

    let address = obj
        .get("ip")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingMandatoryField)?
        .to_string();

    Ok(IdentityRecord {
        address,
        hostname: optional(obj, "hostname", |v| v.as_str().map(str::to_string)),
        as_organization: optional(obj, "aso", |v| v.as_str().map(str::to_string)),
        as_number: optional(obj, "asn", |v| v.as_u64().and_then(|n| u32::try_from(n).ok())),
        continent: optional(obj, "continent", |v| v.as_str().map(str::to_string)),
        country: optional(obj, "country", |v| v.as_str().map(str::to_string)),
        country_code: optional(obj, "cc", |v| v.as_str().map(str::to_string)),
        city: optional(obj, "city", |v| v.as_str().map(str::to_string)),
        postal_code: optional(obj, "postal", |v| v.as_str().map(str::to_string)),
        latitude: optional(obj, "latitude", Value::as_f64),
        longitude: optional(obj, "longitude", Value::as_f64),
        timezone: optional(obj, "tz", |v| v.as_str().map(str::to_string)),
    })
}

fn optional<T>(obj: &Map<String, Value>, key: &str, decode: impl Fn(&Value) -> Option<T>) -> Option<T> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let decoded = decode(value);
            if decoded.is_none() {
                log::debug!("字段 {} 类型不符，已忽略: {}", key, value);
            }
            decoded
        }
    }
}
