//! Glue between API Gateway proxy events and the handlers in `mouth_core::api`.

use lambda_http::request::RequestContext;
use lambda_http::{Body, Error, Request, RequestExt, Response};
use mouth_core::api::{ApiResponse, PlaceOrderRequest};
use mouth_core::config::{AppConfig, load_config};

const EMAIL_CLAIM: &str = "email";

/// Environment variable pointing at an optional YAML config file.
pub const CONFIG_PATH_ENV: &str = "MOUTH_CONFIG";

/// Loads configuration at cold start, from `MOUTH_CONFIG` when set and from
/// the function environment otherwise.
pub fn startup_config() -> Result<AppConfig, Error> {
    let path = std::env::var(CONFIG_PATH_ENV).ok();
    Ok(load_config(path.as_deref())?)
}

/// Email claim placed on the request by a Cognito (REST API) or JWT (HTTP API)
/// authorizer. The request body is never consulted.
pub fn claimed_email(request: &Request) -> Option<String> {
    let email = match request.request_context_ref()? {
        RequestContext::ApiGatewayV1(context) => context
            .authorizer
            .fields
            .get("claims")
            .and_then(|claims| claims.get(EMAIL_CLAIM))
            .and_then(|email| email.as_str())
            .map(str::to_string),
        RequestContext::ApiGatewayV2(context) => context
            .authorizer
            .as_ref()?
            .jwt
            .as_ref()?
            .claims
            .get(EMAIL_CLAIM)
            .cloned(),
        _ => None,
    };

    email.filter(|email| !email.is_empty())
}

pub fn body_bytes(request: &Request) -> Option<Vec<u8>> {
    match request.body() {
        Body::Empty => None,
        body => Some(body.to_vec()),
    }
}

pub fn place_order_request(request: &Request) -> PlaceOrderRequest {
    PlaceOrderRequest {
        user_email: claimed_email(request),
        body: body_bytes(request),
    }
}

pub fn into_http_response(response: ApiResponse) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(response.status)
        .header("content-type", response.content_type)
        .body(Body::Text(response.body))?;
    Ok(response)
}
