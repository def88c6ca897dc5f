use spotfeed_rs::query::models::*;
#[test]
fn test_aws_params_serialize_in_wire_order() {
    let params = HistoryQuery {
        table_name: "aws".to_string(),
        instance_type: "m5.large".to_string(),
        region: "*".to_string(),
        az: Some("use1-az1".to_string()),
        instance_tier: None,
        availability_zone: None,
        start: "2024-01-01".to_string(),
        end: "2024-01-03".to_string(),
    };
    let query = serde_urlencoded::to_string(&params).unwrap();
    assert_eq!(
        query,
        "TableName=aws&InstanceType=m5.large&Region=*&AZ=use1-az1&Start=2024-01-01&End=2024-01-03"
    );
}
#[test]
fn test_azure_params_include_tier_and_availability_zone() {
    let params = HistoryQuery {
        table_name: "azure".to_string(),
        instance_type: "Standard_D2s_v3".to_string(),
        region: "eastus".to_string(),
        az: None,
        instance_tier: Some("*".to_string()),
        availability_zone: Some("*".to_string()),
        start: "2024-01-01".to_string(),
        end: "2024-01-03".to_string(),
    };
    let query = serde_urlencoded::to_string(&params).unwrap();
    assert!(query.contains("InstanceTier=*"));
    assert!(query.contains("AvailabilityZone=*"));
    assert!(!query.contains("AZ="));
}
#[test]
fn test_gcp_params_omit_unset_zone_fields() {
    let params = HistoryQuery {
        table_name: "gcp".to_string(),
        instance_type: "*".to_string(),
        region: "us-central1".to_string(),
        start: "2024-01-01".to_string(),
        end: "2024-01-03".to_string(),
        ..Default::default()
    };
    let query = serde_urlencoded::to_string(&params).unwrap();
    assert_eq!(
        query,
        "TableName=gcp&InstanceType=*&Region=us-central1&Start=2024-01-01&End=2024-01-03"
    );
}
#[test]
fn test_history_response_deserialization() {
    let json = r#"{"Status":200,"Data":[{"InstanceType":"m5.large","SpotPrice":0.05}]}"#;
    let resp: HistoryResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.status, Some(200));
    assert_eq!(resp.data.len(), 1);
}
#[test]
fn test_history_response_defaults() {
    let resp: HistoryResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(resp.status, None);
    assert!(resp.data.is_empty());
}
