//! Transport-neutral request handling. Each handler turns an already
//! extracted request into an [`ApiResponse`]; the Lambda runner only converts
//! between this shape and API Gateway events.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::errors::{OrderError, ServiceError};
use crate::order::{Order, OrderPlacer};
use crate::restaurant::{Restaurant, RestaurantCatalog};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

/// What the order endpoint needs from an inbound request.
#[derive(Debug, Clone, Default)]
pub struct PlaceOrderRequest {
    /// Email claim from the authorizer, if any.
    pub user_email: Option<String>,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderBody {
    restaurant_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderAccepted {
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    theme: Option<String>,
}

impl ApiResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_TEXT,
            body: body.into(),
        }
    }

    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                content_type: CONTENT_TYPE_JSON,
                body,
            },
            Err(e) => {
                error!(error = %e, "unable to serialize response body");
                Self::text(500, "Internal Server Error")
            }
        }
    }

    /// Maps an error to its response. Server-side failures get a generic
    /// body; their detail only goes to the log.
    pub fn from_error(err: &ServiceError) -> Self {
        match err {
            ServiceError::Order(OrderError::Unauthorized) => Self::text(401, "Unauthorized"),
            ServiceError::Order(OrderError::MissingRestaurantName) => {
                Self::text(400, "restaurantName is required")
            }
            ServiceError::BadRequest { reason } => Self::text(400, reason.clone()),
            _ => Self::text(err.status_code(), "Internal Server Error"),
        }
    }

    fn from_result<T: Serialize>(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(value) => Self::json(200, &value),
            Err(err) => {
                if err.is_client_error() {
                    warn!(error = %err, status = err.status_code(), "request rejected");
                } else {
                    error!(error = ?err, "request failed");
                }
                Self::from_error(&err)
            }
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: Option<&[u8]>) -> Result<T, ServiceError> {
    let bytes = body
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ServiceError::BadRequest {
            reason: "Request body is required".to_string(),
        })?;

    let invalid = |e: serde_json::Error| ServiceError::BadRequest {
        reason: format!("Invalid request body: {e}"),
    };

    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(invalid)?;
    if !value.is_object() {
        return Err(ServiceError::BadRequest {
            reason: "Invalid request body: expected a JSON object".to_string(),
        });
    }

    serde_json::from_value(value).map_err(invalid)
}

async fn place_order(
    placer: &OrderPlacer,
    request: PlaceOrderRequest,
) -> Result<OrderAccepted, ServiceError> {
    let user_email = request.user_email.unwrap_or_default();
    if user_email.trim().is_empty() {
        return Err(OrderError::Unauthorized.into());
    }

    let body: PlaceOrderBody = parse_body(request.body.as_deref())?;
    let order = Order::new(user_email, body.restaurant_name.unwrap_or_default());
    placer.place(&order).await?;

    Ok(OrderAccepted {
        order_id: order.order_id,
    })
}

pub async fn handle_place_order(placer: &OrderPlacer, request: PlaceOrderRequest) -> ApiResponse {
    ApiResponse::from_result(place_order(placer, request).await)
}

pub async fn handle_list_restaurants(catalog: &RestaurantCatalog) -> ApiResponse {
    ApiResponse::from_result(catalog.list().await.map_err(ServiceError::from))
}

async fn search_restaurants(
    catalog: &RestaurantCatalog,
    body: Option<&[u8]>,
) -> Result<Vec<Restaurant>, ServiceError> {
    let body: SearchBody = parse_body(body)?;
    let theme = body.theme.ok_or_else(|| ServiceError::BadRequest {
        reason: "theme is required".to_string(),
    })?;
    catalog.search(&theme).await
}

pub async fn handle_search_restaurants(
    catalog: &RestaurantCatalog,
    body: Option<&[u8]>,
) -> ApiResponse {
    ApiResponse::from_result(search_restaurants(catalog, body).await)
}
