use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mouth_core::api::{ApiResponse, OrderAccepted, PlaceOrderRequest, handle_place_order};
use mouth_core::config::AppConfig;
use mouth_core::errors::SinkError;
use mouth_core::order::OrderPlacer;
use mouth_core::sink::{AppendReceipt, EventSink, StreamRecord};

/// Keeps every appended record and hands out per-partition sequence numbers,
/// the way a single-shard stream would.
#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<StreamRecord>>,
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn append(&self, record: StreamRecord) -> Result<AppendReceipt, SinkError> {
        let mut records = self.records.lock().unwrap();
        records.push(record);
        Ok(AppendReceipt {
            shard_id: "shardId-000000000000".to_string(),
            sequence_number: format!("{:020}", records.len()),
        })
    }
}

fn order_request(email: &str, restaurant: &str) -> PlaceOrderRequest {
    PlaceOrderRequest {
        user_email: Some(email.to_string()),
        body: Some(format!(r#"{{"restaurantName":"{restaurant}"}}"#).into_bytes()),
    }
}

#[tokio::test]
async fn test_order_reaches_stream_under_its_own_partition() {
    let sink = Arc::new(RecordingSink::default());
    let placer = OrderPlacer::new(sink.clone());

    let response = handle_place_order(&placer, order_request("a@b.com", "Fangtasia")).await;
    assert_eq!(response.status, 200);
    let accepted: OrderAccepted = serde_json::from_str(&response.body).unwrap();

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].partition_key, accepted.order_id);

    let expected = format!(
        r#"{{"orderId":"{}","userEmail":"a@b.com","restaurantName":"Fangtasia","eventType":"order_placed"}}"#,
        accepted.order_id
    );
    assert_eq!(String::from_utf8(records[0].data.clone()).unwrap(), expected);
}

#[tokio::test]
async fn test_retried_order_is_not_deduplicated() {
    let sink = Arc::new(RecordingSink::default());
    let placer = OrderPlacer::new(sink.clone());

    let first = handle_place_order(&placer, order_request("a@b.com", "Fangtasia")).await;
    let second = handle_place_order(&placer, order_request("a@b.com", "Fangtasia")).await;
    assert_ne!(first.body, second.body);

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].partition_key, records[1].partition_key);
}

#[tokio::test]
async fn test_unauthorized_order_never_reaches_stream() {
    let sink = Arc::new(RecordingSink::default());
    let placer = OrderPlacer::new(sink.clone());

    let response = handle_place_order(&placer, order_request("", "Fangtasia")).await;

    assert_eq!(response, ApiResponse::text(401, "Unauthorized"));
    assert!(sink.records.lock().unwrap().is_empty());
}

#[test]
fn test_config_requires_stream_for_order_placement() {
    let config = AppConfig::from_lookup(|key| match key {
        "restaurants_table" => Some("restaurants".to_string()),
        _ => None,
    });

    assert!(config.require_stream().is_err());
    assert_eq!(config.require_table().unwrap(), "restaurants");
}
