use bridge_registry::{DeviceCatalog, RegistryError, StaticDeviceCatalog};
use std::io::Write;

#[tokio::test]
async fn demo_catalog_has_single_power_endpoint() {
    let endpoints = StaticDeviceCatalog::demo().list().await;
    assert_eq!(endpoints.len(), 1);
    let endpoint = &endpoints[0];
    assert_eq!(endpoint.endpoint_id, "demo_id");
    assert_eq!(endpoint.friendly_name, "Bedroom Outlet");
    assert_eq!(endpoint.display_categories, vec!["SWITCH".to_string()]);
    assert_eq!(endpoint.cookie.len(), 4);
    let interfaces: Vec<&str> = endpoint
        .capabilities
        .iter()
        .map(|capability| capability.interface.as_str())
        .collect();
    assert_eq!(interfaces, vec!["Alexa", "Alexa.PowerController"]);
    assert!(endpoint.capabilities.iter().all(|capability| capability.version == "3"));
}

#[test]
fn loads_wrapped_catalog_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        file,
        r#"{{
            "endpoints": [{{
                "endpointId": "kitchen-1",
                "manufacturerName": "Acme",
                "friendlyName": "Kitchen Light",
                "description": "Ceiling light",
                "displayCategories": ["LIGHT"],
                "capabilities": [
                    {{ "type": "AlexaInterface", "interface": "Alexa", "version": "3" }}
                ]
            }}]
        }}"#
    )
    .expect("write");

    let catalog = StaticDeviceCatalog::from_json_file(file.path()).expect("catalog");
    assert_eq!(catalog.endpoints().len(), 1);
    assert_eq!(catalog.endpoints()[0].endpoint_id, "kitchen-1");
    assert!(catalog.endpoints()[0].cookie.is_empty());
}

#[test]
fn loads_bare_array_catalog() {
    let text = r#"[
        { "endpointId": "a", "manufacturerName": "m", "friendlyName": "A",
          "description": "d", "displayCategories": ["SWITCH"], "capabilities": [] },
        { "endpointId": "b", "manufacturerName": "m", "friendlyName": "B",
          "description": "d", "displayCategories": ["SWITCH"], "capabilities": [] }
    ]"#;
    let catalog = StaticDeviceCatalog::from_json_str(text).expect("catalog");
    assert_eq!(catalog.endpoints().len(), 2);
}

#[test]
fn duplicate_endpoint_ids_are_rejected() {
    let text = r#"[
        { "endpointId": "a", "manufacturerName": "m", "friendlyName": "A",
          "description": "d", "displayCategories": [], "capabilities": [] },
        { "endpointId": "a", "manufacturerName": "m", "friendlyName": "B",
          "description": "d", "displayCategories": [], "capabilities": [] }
    ]"#;
    let err = StaticDeviceCatalog::from_json_str(text).expect_err("duplicate");
    assert!(matches!(err, RegistryError::Invalid(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = StaticDeviceCatalog::from_json_file("/nonexistent/catalog.json").expect_err("io");
    assert!(matches!(err, RegistryError::Io(_)));
}

#[test]
fn malformed_catalog_is_parse_error() {
    let err = StaticDeviceCatalog::from_json_str("{ not json").expect_err("parse");
    assert!(matches!(err, RegistryError::Parse(_)));
}
