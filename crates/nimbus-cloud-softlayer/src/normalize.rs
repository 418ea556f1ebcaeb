//! Conversion of raw SoftLayer records into normalized nodes and locations
//!
//! Hardware and virtual guest records do not share a structure: the status
//! code lives in `hardwareStatusId` or `statusId` respectively. The kind is
//! resolved here once and carried on the node, so later operations never
//! re-inspect raw fields to decide where to dispatch.

use crate::catalog;
use crate::error::{Result, SoftLayerError};
use crate::model::{ResourceKind, SoftLayerExtra, SoftLayerNode};
use nimbus_cloud::{Node, NodeLocation};
use serde_json::Value;

/// Convert one hardware or virtual guest record
pub fn to_node(record: Value) -> Result<SoftLayerNode> {
    let id = record
        .get("id")
        .and_then(id_string)
        .ok_or_else(|| SoftLayerError::UnexpectedResponse(format!("record without id: {}", record)))?;

    let kind = ResourceKind::detect(&record);
    let state = kind
        .and_then(|k| record.get(k.status_field()))
        .and_then(Value::as_i64)
        .unwrap_or(0);

    let name = record
        .get("hostname")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Node {
        id,
        name,
        state,
        public_ip: address(&record, "primaryIpAddress"),
        private_ip: address(&record, "primaryBackendIpAddress"),
        extra: SoftLayerExtra { kind, raw: record },
    })
}

/// Convert a collection, preserving its order
pub fn to_nodes(records: Vec<Value>) -> Result<Vec<SoftLayerNode>> {
    records.into_iter().map(to_node).collect()
}

/// Convert a datacenter record; `None` unless it is on the allow-list
pub fn to_location(record: &Value) -> Option<NodeLocation> {
    let name = record.get("name").and_then(Value::as_str)?;
    let country = catalog::datacenter_country(name)?;
    let id = record.get("id").and_then(id_string)?;

    Some(NodeLocation {
        id,
        name: name.to_string(),
        country: country.to_string(),
    })
}

// Addresses are unassigned for a few minutes after provisioning; the API
// reports them as empty strings or omits them
fn address(record: &Value, field: &str) -> Option<String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hardware_record() {
        let node = to_node(json!({
            "id": 42,
            "hostname": "h1",
            "hardwareStatusId": 5,
            "primaryIpAddress": "",
            "primaryBackendIpAddress": "10.0.0.1",
        }))
        .unwrap();

        assert_eq!(node.id, "42");
        assert_eq!(node.name, "h1");
        assert_eq!(node.state, 5);
        assert_eq!(node.public_ip, None);
        assert_eq!(node.private_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(node.extra.kind, Some(ResourceKind::Hardware));
        assert_eq!(node.extra.raw["hardwareStatusId"], 5);
        assert_eq!(node.extra.remote_id(), Some(&json!(42)));
    }

    #[test]
    fn test_virtual_guest_record() {
        let node = to_node(json!({
            "id": 1001,
            "hostname": "cci1",
            "statusId": 1001,
            "primaryIpAddress": "203.0.113.10",
            "primaryBackendIpAddress": null,
        }))
        .unwrap();

        assert_eq!(node.state, 1001);
        assert_eq!(node.public_ip.as_deref(), Some("203.0.113.10"));
        assert_eq!(node.private_ip, None);
        assert_eq!(node.extra.kind, Some(ResourceKind::VirtualGuest));
    }

    #[test]
    fn test_record_without_status() {
        let node = to_node(json!({ "id": 7, "hostname": "mystery" })).unwrap();

        assert_eq!(node.state, 0);
        assert_eq!(node.extra.kind, None);
        assert_eq!(node.public_ip, None);
        assert_eq!(node.private_ip, None);
    }

    #[test]
    fn test_record_without_id() {
        assert!(matches!(
            to_node(json!({ "hostname": "ghost", "statusId": 1 })),
            Err(SoftLayerError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_to_nodes_keeps_order() {
        let nodes = to_nodes(vec![
            json!({ "id": 3, "hostname": "c", "statusId": 1 }),
            json!({ "id": 1, "hostname": "a", "statusId": 1 }),
            json!({ "id": 2, "hostname": "b", "statusId": 1 }),
        ])
        .unwrap();

        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_location_allow_list() {
        let wdc = to_location(&json!({ "id": 37473, "name": "wdc01", "longName": "Washington 1" }));
        assert_eq!(
            wdc,
            Some(NodeLocation {
                id: "37473".to_string(),
                name: "wdc01".to_string(),
                country: "US".to_string(),
            })
        );

        assert_eq!(to_location(&json!({ "id": 265592, "name": "ams01" })), None);
        assert_eq!(to_location(&json!({ "id": 1 })), None);
    }
}
