use crate::{
    DiscoveryService, NodeId, SmdError,
    tests::support::{FLEET, client_for, endpoint_list, fast_poll, lab_credentials},
};
use std::collections::BTreeSet;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const ENDPOINTS: &str = "/hsm/v2/Inventory/RedfishEndpoints";

fn fleet() -> Vec<NodeId> {
    FLEET.iter().map(|id| NodeId::new(*id).unwrap()).collect()
}

fn set(ids: &[&str]) -> BTreeSet<NodeId> {
    ids.iter().map(|id| NodeId::new(*id).unwrap()).collect()
}

#[tokio::test]
async fn test_discovery_registers_and_converges() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    // Initial listing: nothing registered yet.
    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(endpoint_list(&[])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    // First poll: discovery still running.
    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(endpoint_list(&[
            ("x0c0s1b0", Some("DiscoverOK")),
            ("x0c0s2b0", Some("DiscoveryStarted")),
            ("x0c0s3b0", Some("DiscoveryStarted")),
            ("x0c0s4b0", None),
        ])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    // Afterwards: everything discovered.
    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(endpoint_list(&[
            ("x0c0s1b0", Some("DiscoverOK")),
            ("x0c0s2b0", Some("DiscoverOK")),
            ("x0c0s3b0", Some("DiscoverOK")),
            ("x0c0s4b0", Some("DiscoverOK")),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(201))
        .expect(4)
        .mount(&mock_server)
        .await;

    let service = DiscoveryService::new(lab_credentials(), fast_poll(5));
    let report = service.execute(&client, &fleet()).await.unwrap();

    assert!(report.is_complete());
    assert!(report.already_discovered.is_empty());
    assert_eq!(report.registered, set(&FLEET));
}

#[tokio::test]
async fn test_already_discovered_nodes_are_not_registered() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(endpoint_list(&[
            ("x0c0s1b0", Some("DiscoverOK")),
            ("x0c0s2b0", Some("DiscoverOK")),
            ("x0c0s3b0", Some("DiscoverOK")),
            ("x0c0s4b0", Some("DiscoverOK")),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = DiscoveryService::new(lab_credentials(), fast_poll(5));
    let report = service.execute(&client, &fleet()).await.unwrap();

    assert_eq!(report.already_discovered, set(&FLEET));
    assert!(report.registered.is_empty());
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_unconverged_nodes_are_reported() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    // 1 initial listing + 3 poll attempts.
    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(endpoint_list(&[
            ("x0c0s1b0", Some("DiscoverOK")),
            ("x0c0s2b0", Some("HTTPsGetFailed")),
        ])))
        .expect(4)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DiscoveryService::new(lab_credentials(), fast_poll(3));
    let nodes = vec![NodeId::new("x0c0s1b0").unwrap(), NodeId::new("x0c0s2b0").unwrap()];
    let report = service.execute(&client, &nodes).await.unwrap();

    assert_eq!(report.already_discovered, set(&["x0c0s1b0"]));
    assert_eq!(report.undiscovered, set(&["x0c0s2b0"]));
    assert!(matches!(
        report.ensure_complete(),
        Err(SmdError::DiscoveryIncomplete(_))
    ));
}

#[tokio::test]
async fn test_polling_tolerates_transient_failures() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(endpoint_list(&[])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(endpoint_list(&[("x0c0s1b0", Some("DiscoverOK"))])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let service = DiscoveryService::new(lab_credentials(), fast_poll(5));
    let report = service
        .execute(&client, &[NodeId::new("x0c0s1b0").unwrap()])
        .await
        .unwrap();
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_initial_listing_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = DiscoveryService::new(lab_credentials(), fast_poll(5));
    let result = service.execute(&client, &fleet()).await;
    assert!(matches!(result, Err(SmdError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_registration_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server, "primary");

    Mock::given(method("GET"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(endpoint_list(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(ENDPOINTS))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DiscoveryService::new(lab_credentials(), fast_poll(5));
    let result = service.execute(&client, &fleet()).await;
    assert!(matches!(result, Err(SmdError::Api { status: 400, .. })));
}
