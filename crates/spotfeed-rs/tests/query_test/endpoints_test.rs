use spotfeed_rs::SpotFeedClient;
use spotfeed_rs::errors::SpotFeedError;
use spotfeed_rs::query::models::HistoryQuery;

/// Client pointed at a port nothing listens on; every call must come back
/// as a structured error, never a panic.
fn unreachable_client() -> SpotFeedClient {
    let base = Some("http://127.0.0.1:9/".to_string());
    SpotFeedClient::new_with_config(base.clone(), base.clone(), base)
}

#[tokio::test]
async fn test_history_transport_failure_is_an_error_value() {
    let client = unreachable_client();
    let result = client
        .get_history(&HistoryQuery {
            table_name: "aws".to_string(),
            instance_type: "*".to_string(),
            region: "*".to_string(),
            az: Some("*".to_string()),
            start: "2024-01-01".to_string(),
            end: "2024-01-02".to_string(),
            ..Default::default()
        })
        .await;
    match result {
        Err(SpotFeedError::RequestError(e)) => println!("transport error as expected: {e}"),
        other => panic!("expected RequestError, got {:?}", other.map(|r| r.to_string())),
    }
}

#[tokio::test]
async fn test_latest_transport_failure_is_an_error_value() {
    let client = unreachable_client();
    let result = client.get_latest("aws").await;
    match result {
        Err(SpotFeedError::RequestError(e)) => println!("transport error as expected: {e}"),
        other => panic!("expected RequestError, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_association_transport_failure_is_an_error_value() {
    let client = unreachable_client();
    let result = client.get_aws_association().await;
    assert!(result.is_err());
}
