use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::{OrderError, SinkError};
use crate::sink::{AppendReceipt, EventSink, StreamRecord};

pub const ORDER_PLACED: &str = "order_placed";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    /// Comes from the authorizer claim, never from the request body.
    pub user_email: String,
    pub restaurant_name: String,
}

impl Order {
    /// Starts an order under a freshly generated id.
    pub fn new(user_email: impl Into<String>, restaurant_name: impl Into<String>) -> Self {
        Self {
            order_id: Uuid::new_v4().to_string(),
            user_email: user_email.into(),
            restaurant_name: restaurant_name.into(),
        }
    }

    /// Pure precondition check; the caller identity is checked first.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.user_email.trim().is_empty() {
            return Err(OrderError::Unauthorized);
        }
        if self.restaurant_name.trim().is_empty() {
            return Err(OrderError::MissingRestaurantName);
        }
        Ok(())
    }
}

/// The envelope downstream consumers read: order fields plus a discriminator.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacedEvent<'a> {
    #[serde(flatten)]
    pub order: &'a Order,
    pub event_type: &'static str,
}

impl<'a> OrderPlacedEvent<'a> {
    pub fn new(order: &'a Order) -> Self {
        Self {
            order,
            event_type: ORDER_PLACED,
        }
    }

    pub fn to_record(&self) -> Result<StreamRecord, SinkError> {
        Ok(StreamRecord {
            partition_key: self.order.order_id.clone(),
            data: serde_json::to_vec(self)?,
        })
    }
}

/// Publishes validated orders to the order events stream.
pub struct OrderPlacer {
    sink: Arc<dyn EventSink>,
}

impl OrderPlacer {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Validates the order and appends one `order_placed` event keyed by the
    /// order id. No retry happens here; a failed append leaves nothing to
    /// undo.
    pub async fn place(&self, order: &Order) -> Result<AppendReceipt, OrderError> {
        order.validate()?;

        let record = OrderPlacedEvent::new(order)
            .to_record()
            .map_err(OrderError::PublishFailed)?;

        match self.sink.append(record).await {
            Ok(receipt) => {
                info!(
                    order_id = %order.order_id,
                    shard_id = %receipt.shard_id,
                    sequence_number = %receipt.sequence_number,
                    "published 'order_placed' event"
                );
                Ok(receipt)
            }
            Err(e) => {
                error!(order_id = %order.order_id, error = ?e, "unable to publish 'order_placed' event");
                Err(OrderError::PublishFailed(e))
            }
        }
    }
}
