use crate::{
    NodeId, RedfishEndpointRegistration, RegistrationOutcome, SmdError,
    tests::support::{client_for, endpoint_list, lab_credentials},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

#[tokio::test]
async fn test_redfish_endpoints_list_success() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("GET"))
        .and(path("/hsm/v2/Inventory/RedfishEndpoints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(endpoint_list(&[
            ("x0c0s1b0", Some("DiscoverOK")),
            ("x0c0s2b0", Some("DiscoveryStarted")),
            ("x0c0s3b0", None),
        ])))
        .mount(&mock_server)
        .await;

    let endpoints = client.redfish_endpoints().await.unwrap();
    assert_eq!(endpoints.len(), 3);
    assert_eq!(endpoints[0].id.as_str(), "x0c0s1b0");
    assert_eq!(endpoints[0].fqdn.as_deref(), Some("x0c0s1b0"));
    assert!(endpoints[0].last_discovery_status().unwrap().is_discover_ok());
    assert_eq!(
        endpoints[1].last_discovery_status().unwrap().as_str(),
        "DiscoveryStarted"
    );
    assert!(endpoints[2].last_discovery_status().is_none());
}

#[tokio::test]
async fn test_redfish_endpoints_list_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("GET"))
        .and(path("/hsm/v2/Inventory/RedfishEndpoints"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&mock_server)
        .await;

    let result = client.redfish_endpoints().await;
    match result {
        Err(SmdError::Api { url, status, body }) => {
            assert!(url.ends_with("/hsm/v2/Inventory/RedfishEndpoints"));
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_sends_expected_body() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("POST"))
        .and(path("/hsm/v2/Inventory/RedfishEndpoints"))
        .and(body_json(serde_json::json!({
            "RedfishEndpoints": [{
                "ID": "x0c0s1b0",
                "FQDN": "x0c0s1b0",
                "RediscoverOnUpdate": true,
                "User": "root",
                "Password": "root_password"
            }]
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!([{"URI": "/hsm/v2/Inventory/RedfishEndpoints/x0c0s1b0"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let node = NodeId::new("x0c0s1b0").unwrap();
    let request = RedfishEndpointRegistration::for_node(&node, &lab_credentials()).into_request();
    let outcome = client.register_redfish_endpoints(&request).await.unwrap();
    assert_eq!(outcome, RegistrationOutcome::Created);
}

#[tokio::test]
async fn test_register_conflict_is_idempotent() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("POST"))
        .and(path("/hsm/v2/Inventory/RedfishEndpoints"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
        .mount(&mock_server)
        .await;

    let node = NodeId::new("x0c0s1b0").unwrap();
    let request = RedfishEndpointRegistration::for_node(&node, &lab_credentials()).into_request();
    let outcome = client.register_redfish_endpoints(&request).await.unwrap();
    assert_eq!(outcome, RegistrationOutcome::AlreadyRegistered);
}

#[tokio::test]
async fn test_register_bad_request_is_an_error() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("POST"))
        .and(path("/hsm/v2/Inventory/RedfishEndpoints"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid xname"))
        .mount(&mock_server)
        .await;

    let node = NodeId::new("x0c0s1b0").unwrap();
    let request = RedfishEndpointRegistration::for_node(&node, &lab_credentials()).into_request();
    let result = client.register_redfish_endpoints(&request).await;
    assert!(matches!(result, Err(SmdError::Api { status: 400, .. })));
}
