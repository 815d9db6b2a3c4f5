//! Data models for the vulnerability management platform entities
//! (clients, assets, paged API responses) and the flattening of assets
//! into fixed CSV rows.

use crate::format::CsvRecordProducer;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Pagination metadata reported by the server alongside each page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub pagination: PaginationMeta,
}

/// One page of a list-style endpoint response.
///
/// The server reports the full result-set size in `meta.pagination.total`
/// with every page; `status` carries the literal success marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub status: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub meta: ResponseMeta,
}

/// A client (tenant) owning a set of assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "client_id")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub poc: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Name: {} | ID: {} | Tags: [{}]",
            self.name,
            self.id,
            self.tags.join(", ")
        )
    }
}

/// A single open port entry on an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
}

impl Port {
    /// Renders the port in the platform's compound notation, e.g.
    /// `80//tcp//http//1.1/`.
    pub fn render(&self) -> String {
        format!(
            "{}//{}//{}//{}/",
            self.number, self.protocol, self.service, self.version
        )
    }
}

/// Back-reference to a parent asset. A relation only, not ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentRef {
    #[serde(default)]
    pub asset: String,
    #[serde(default)]
    pub id: String,
}

/// A tracked host/device/resource with security metadata.
///
/// Every field is optional on the wire, and the platform sends explicit
/// `null` for cleared values; both flatten to empty CSV cells rather
/// than errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "asset", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        rename = "assetCriticality",
        default,
        deserialize_with = "null_as_default"
    )]
    pub criticality: String,
    #[serde(rename = "knownIps", default, deserialize_with = "null_as_default")]
    pub known_ips: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: BTreeMap<String, Port>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    // May contain HTML markup straight from the platform's editor.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_parent")]
    pub parent: Option<ParentRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub physical_location: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub asset_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host_fqdn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host_rdns: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dns_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub netbios_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operating_system: Vec<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_cves: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pci_status: String,
}

/// Accepts a JSON `null` as the field's default value. `#[serde(default)]`
/// alone only covers missing fields; the platform also sends explicit
/// nulls for cleared ones.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON string or number and yields its textual form. The
/// platform is inconsistent about numeric fields such as `total_cves`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// The server occasionally sends a non-object placeholder for `parent`;
/// anything that is not a structured reference is treated as absent.
fn lenient_parent<'de, D>(deserializer: D) -> Result<Option<ParentRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value::<ParentRef>(value).ok())
}

/// Comma-joins list-like fields without the bracket/quote decoration a
/// naive stringification would add: `["a", "b"]` renders as `a, b`.
pub fn join_list(values: &[String]) -> String {
    values.join(", ")
}

/// Maps the platform's lowercase PCI markers to their report labels.
/// Unknown or unset values render as an empty cell.
pub fn pci_status_label(pci_status: &str) -> String {
    match pci_status {
        "pass" => "Pass".to_string(),
        "fail" => "Fail".to_string(),
        _ => String::new(),
    }
}

impl Asset {
    fn rendered_ports(&self) -> String {
        let ports: Vec<String> = self.ports.values().map(Port::render).collect();
        join_list(&ports)
    }

    fn parent_name(&self) -> String {
        self.parent
            .as_ref()
            .map(|p| p.asset.clone())
            .unwrap_or_default()
    }
}

impl CsvRecordProducer for Asset {
    fn csv_header() -> Vec<String> {
        [
            "name",
            "ip addresses",
            "criticality",
            "data owner",
            "physical location",
            "system owner",
            "ports",
            "tags",
            "description",
            "parent",
            "type",
            "host fqdn",
            "hostname",
            "host rdns",
            "dns name",
            "mac address",
            "netbios name",
            "total cves",
            "pci status",
            "operating system",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.name.clone(),
            join_list(&self.known_ips),
            self.criticality.clone(),
            self.data_owner.clone(),
            self.physical_location.clone(),
            self.system_owner.clone(),
            self.rendered_ports(),
            join_list(&self.tags),
            self.description.clone(),
            self.parent_name(),
            self.asset_type.clone(),
            self.host_fqdn.clone(),
            self.hostname.clone(),
            self.host_rdns.clone(),
            self.dns_name.clone(),
            self.mac_address.clone(),
            self.netbios_name.clone(),
            self.total_cves.clone(),
            pci_status_label(&self.pci_status),
            join_list(&self.operating_system),
        ]]
    }
}

/// An ordered collection of assets, flattened to CSV in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetList {
    assets: Vec<Asset>,
}

impl AssetList {
    pub fn new(assets: Vec<Asset>) -> AssetList {
        AssetList { assets }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }
}

impl CsvRecordProducer for AssetList {
    fn csv_header() -> Vec<String> {
        Asset::csv_header()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        self.assets
            .iter()
            .flat_map(|asset| asset.as_csv_records())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_asset() -> Asset {
        serde_json::from_value(serde_json::json!({
            "asset": "Test Asset All Fields",
            "assetCriticality": "High",
            "id": "cloxe6ukz00t30hrr3rwrfn82",
            "parent": {
                "asset": "Parent Asset",
                "id": "cloxe594h00t20hrrdqjo6sz5"
            },
            "system_owner": "System Owner",
            "type": "Workstation",
            "data_owner": "Data Owner",
            "hostname": "Hostname",
            "operating_system": ["windows"],
            "dns_name": "DNS Name",
            "host_fqdn": "Host FQDN",
            "host_rdns": "Host RDNS",
            "mac_address": "MAC Address",
            "physical_location": "Physical Location",
            "netbios_name": "NetBIOS Name",
            "total_cves": "5",
            "pci_status": "pass",
            "description": "Asset Description",
            "knownIps": ["1.1.1.1"],
            "tags": ["test"],
            "ports": {
                "1234": {
                    "number": "1234",
                    "service": "service",
                    "protocol": "protocol",
                    "version": "version"
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn header_has_twenty_columns_in_report_order() {
        let header = Asset::csv_header();
        assert_eq!(header.len(), 20);
        assert_eq!(header[0], "name");
        assert_eq!(header[1], "ip addresses");
        assert_eq!(header[19], "operating system");
    }

    #[test]
    fn full_asset_flattens_to_single_row() {
        let records = full_asset().as_csv_records();
        assert_eq!(records.len(), 1);
        let row = &records[0];
        assert_eq!(row.len(), 20);
        assert_eq!(row[0], "Test Asset All Fields");
        assert_eq!(row[1], "1.1.1.1");
        assert_eq!(row[2], "High");
        assert_eq!(row[6], "1234//protocol//service//version/");
        assert_eq!(row[9], "Parent Asset");
        assert_eq!(row[17], "5");
        assert_eq!(row[18], "Pass");
        assert_eq!(row[19], "windows");
    }

    #[test]
    fn flattening_is_deterministic() {
        let asset = full_asset();
        assert_eq!(asset.as_csv_records(), asset.as_csv_records());
    }

    #[test]
    fn missing_fields_flatten_to_empty_cells() {
        let asset: Asset = serde_json::from_str("{}").unwrap();
        let records = asset.as_csv_records();
        let row = &records[0];
        assert_eq!(row.len(), 20);
        assert!(row.iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn null_fields_flatten_to_empty_cells() {
        let asset: Asset = serde_json::from_value(serde_json::json!({
            "asset": "Host",
            "description": null,
            "pci_status": null,
            "hostname": null,
            "tags": null,
            "knownIps": null,
            "operating_system": null,
            "ports": null,
            "total_cves": null
        }))
        .unwrap();
        let records = asset.as_csv_records();
        let row = &records[0];
        assert_eq!(row[0], "Host");
        assert!(row[1..].iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn null_port_fields_render_as_empty_segments() {
        let asset: Asset = serde_json::from_value(serde_json::json!({
            "ports": {
                "8080": { "number": "8080", "protocol": null, "service": null, "version": null }
            }
        }))
        .unwrap();
        assert_eq!(asset.as_csv_records()[0][6], "8080///////");
    }

    #[test]
    fn client_tolerates_null_tags() {
        let client: Client = serde_json::from_value(serde_json::json!({
            "client_id": 7,
            "name": "Null Tags Client",
            "tags": null
        }))
        .unwrap();
        assert!(client.tags.is_empty());
    }

    #[test]
    fn pci_status_mapping() {
        assert_eq!(pci_status_label("pass"), "Pass");
        assert_eq!(pci_status_label("fail"), "Fail");
        assert_eq!(pci_status_label(""), "");
        assert_eq!(pci_status_label("unknown"), "");
    }

    #[test]
    fn list_fields_render_without_brackets_or_quotes() {
        assert_eq!(
            join_list(&["a".to_string(), "b".to_string()]),
            "a, b".to_string()
        );
        assert_eq!(join_list(&[]), "".to_string());
    }

    #[test]
    fn ports_render_in_compound_notation() {
        let asset: Asset = serde_json::from_value(serde_json::json!({
            "ports": {
                "80": {
                    "number": "80",
                    "protocol": "tcp",
                    "service": "http",
                    "version": "1.1"
                }
            }
        }))
        .unwrap();
        assert_eq!(asset.as_csv_records()[0][6], "80//tcp//http//1.1/");
    }

    #[test]
    fn multiple_ports_are_comma_joined() {
        let asset: Asset = serde_json::from_value(serde_json::json!({
            "ports": {
                "22": { "number": "22", "protocol": "tcp", "service": "ssh", "version": "" },
                "80": { "number": "80", "protocol": "tcp", "service": "http", "version": "1.1" }
            }
        }))
        .unwrap();
        assert_eq!(
            asset.as_csv_records()[0][6],
            "22//tcp//ssh///, 80//tcp//http//1.1/"
        );
    }

    #[test]
    fn numeric_wire_values_flatten_to_text() {
        let asset: Asset = serde_json::from_value(serde_json::json!({
            "total_cves": 5,
            "ports": { "443": { "number": 443, "protocol": "tcp" } }
        }))
        .unwrap();
        let row = &asset.as_csv_records()[0];
        assert_eq!(row[17], "5");
        assert_eq!(row[6], "443//tcp/////");
    }

    #[test]
    fn non_object_parent_is_treated_as_absent() {
        let asset: Asset = serde_json::from_value(serde_json::json!({
            "parent": "orphaned"
        }))
        .unwrap();
        assert_eq!(asset.parent, None);
        assert_eq!(asset.as_csv_records()[0][9], "");
    }

    #[test]
    fn client_deserializes_wire_names() {
        let client: Client = serde_json::from_value(serde_json::json!({
            "client_id": 4155,
            "name": "Test Client",
            "poc": "poc name",
            "tags": ["test"]
        }))
        .unwrap();
        assert_eq!(client.id, 4155);
        assert_eq!(client.name, "Test Client");
        assert_eq!(
            client.to_string(),
            "Name: Test Client | ID: 4155 | Tags: [test]"
        );
    }

    #[test]
    fn asset_list_produces_one_record_per_asset() {
        let list = AssetList::new(vec![full_asset(), Asset::default()]);
        assert_eq!(list.len(), 2);
        let csv = list.to_csv_with_header().unwrap();
        assert_eq!(csv.lines().count(), 3);
    }
}
