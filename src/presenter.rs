use serde_json::{Map, Value};
use std::fmt::{self, Write};

use crate::config::{Family, Selection};
use crate::coordinator::AggregateResult;
use crate::record::IdentityRecord;

/// 文本报告。成对的字段只在两者都存在时输出；被 -4/-6 排除的地址族不输出任何内容
pub fn render_text(result: &AggregateResult, selection: Selection) -> Result<String, fmt::Error> {
    let mut out = String::new();

    for family in [Family::V4, Family::V6] {
        match result.get(family) {
            Some(record) => write_record(&mut out, family.label(), record)?,
            None if selection.includes(family) => writeln!(out, "{} not available.", family.label())?,
            None => {}
        }
    }

    Ok(out)
}

fn write_record(out: &mut String, label: &str, r: &IdentityRecord) -> fmt::Result {
    writeln!(out, "{} address: {}", label, r.address)?;

    if let Some(hostname) = &r.hostname {
        writeln!(out, "  Hostname: {}", hostname)?;
    }
    if let (Some(aso), Some(asn)) = (&r.as_organization, r.as_number) {
        writeln!(out, "  AS: {} ({})", aso, asn)?;
    }
    if let Some(continent) = &r.continent {
        writeln!(out, "  Continent: {}", continent)?;
    }
    if let (Some(country), Some(cc)) = (&r.country, &r.country_code) {
        writeln!(out, "  Country: {} ({})", country, cc)?;
    }
    if let (Some(city), Some(postal)) = (&r.city, &r.postal_code) {
        writeln!(out, "  City: {} ({})", city, postal)?;
    }
    if let (Some(lat), Some(lon)) = (r.latitude, r.longitude) {
        writeln!(out, "  Coordinates: {}, {}", lat, lon)?;
    }
    if let Some(tz) = &r.timezone {
        writeln!(out, "  Timezone: {}", tz)?;
    }
    Ok(())
}

/// 结构化输出，每个存在的字段都单独输出，不做配对
pub fn render_structured(result: &AggregateResult) -> Result<Value, serde_json::Error> {
    let mut doc = Map::new();
    for (key, record) in [("ipv4", &result.ipv4), ("ipv6", &result.ipv6)] {
        if let Some(record) = record {
            doc.insert(key.to_string(), serde_json::to_value(record)?);
        }
    }
    Ok(Value::Object(doc))
}

pub fn render_json(result: &AggregateResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&render_structured(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_record;
    use serde_json::json;

    fn springfield() -> IdentityRecord {
        parse_record(br#"{"ip":"203.0.113.5","city":"Springfield","postal":"00000"}"#).unwrap()
    }

    #[test]
    fn test_text_city_line() {
        let result = AggregateResult {
            ipv4: Some(springfield()),
            ipv6: None,
        };
        let text = render_text(&result, Selection::Both).unwrap();
        assert_eq!(
            text,
            "IPv4 address: 203.0.113.5\n  City: Springfield (00000)\nIPv6 not available.\n"
        );
    }

    #[test]
    fn test_structured_city() {
        let result = AggregateResult {
            ipv4: Some(springfield()),
            ipv6: None,
        };
        assert_eq!(
            render_structured(&result).unwrap(),
            json!({"ipv4": {"ip": "203.0.113.5", "city": "Springfield", "postal": "00000"}})
        );
    }

    #[test]
    fn test_half_pairs_text_vs_structured() {
        let record = IdentityRecord {
            as_organization: Some("Example Networks".to_string()),
            country_code: Some("DE".to_string()),
            city: Some("Berlin".to_string()),
            latitude: Some(52.52),
            ..IdentityRecord::new("192.0.2.1")
        };
        let result = AggregateResult {
            ipv4: Some(record),
            ipv6: None,
        };

        assert_eq!(render_text(&result, Selection::V4Only).unwrap(), "IPv4 address: 192.0.2.1\n");
        assert_eq!(
            render_structured(&result).unwrap(),
            json!({"ipv4": {
                "ip": "192.0.2.1",
                "aso": "Example Networks",
                "cc": "DE",
                "city": "Berlin",
                "latitude": 52.52
            }})
        );
    }

    #[test]
    fn test_text_full_record() {
        let record = IdentityRecord {
            hostname: Some("host.example.net".to_string()),
            as_organization: Some("Example Networks".to_string()),
            as_number: Some(64496),
            continent: Some("EU".to_string()),
            country: Some("Germany".to_string()),
            country_code: Some("DE".to_string()),
            city: Some("Berlin".to_string()),
            postal_code: Some("10115".to_string()),
            latitude: Some(52.52),
            longitude: Some(13.405),
            timezone: Some("Europe/Berlin".to_string()),
            ..IdentityRecord::new("2001:db8::1")
        };
        let result = AggregateResult {
            ipv4: None,
            ipv6: Some(record),
        };

        let expected = "\
IPv4 not available.
IPv6 address: 2001:db8::1
  Hostname: host.example.net
  AS: Example Networks (64496)
  Continent: EU
  Country: Germany (DE)
  City: Berlin (10115)
  Coordinates: 52.52, 13.405
  Timezone: Europe/Berlin
";
        assert_eq!(render_text(&result, Selection::Both).unwrap(), expected);
    }

    #[test]
    fn test_excluded_family_is_silent() {
        let result = AggregateResult::default();
        assert_eq!(render_text(&result, Selection::V6Only).unwrap(), "IPv6 not available.\n");
        assert_eq!(render_text(&result, Selection::V4Only).unwrap(), "IPv4 not available.\n");
        assert_eq!(
            render_text(&result, Selection::Both).unwrap(),
            "IPv4 not available.\nIPv6 not available.\n"
        );
    }

    #[test]
    fn test_structured_empty_and_both() {
        assert_eq!(render_structured(&AggregateResult::default()).unwrap(), json!({}));

        let result = AggregateResult {
            ipv4: Some(IdentityRecord::new("192.0.2.1")),
            ipv6: Some(IdentityRecord::new("2001:db8::1")),
        };
        assert_eq!(
            render_structured(&result).unwrap(),
            json!({"ipv4": {"ip": "192.0.2.1"}, "ipv6": {"ip": "2001:db8::1"}})
        );
        assert!(render_json(&result).unwrap().contains("\"ipv6\""));
    }
}
