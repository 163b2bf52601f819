//! REST routing of API Gateway proxy events onto the property service.

use lambda_http::http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode};
use lambda_http::{Body, Request, RequestExt, Response};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::ServiceError;
use crate::property::Property;
use crate::service::PropertyService;

/// Name of the path parameter carrying the property id.
pub const ID_PARAMETER_NAME: &str = "id";

pub const HTTP_METHOD_NOT_SUPPORTED: &str = "HTTP Method Not Supported";
pub const REQUEST_BODY_CANNOT_BE_EMPTY: &str = "Request Body Cannot Be Empty";
pub const REQUEST_BODY_NOT_A_PROPERTY: &str = "Request Body Is Not A Valid Property";
pub const ID_PARAMETER_MISSING: &str = "Id parameter missing";
pub const JSON_TRANSFORMATION_ERROR: &str = "JSON Transformation Error";

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Lambda entry point. Every outcome, including failures, is a response.
pub async fn function_handler(
    service: &PropertyService,
    request: Request,
) -> Result<Response<Body>, lambda_http::Error> {
    if let Some(context) = request.lambda_context_ref() {
        debug!(request_id = %context.request_id, "Received event");
    }
    Ok(handle_request(service, request).await)
}

/// Dispatches one request to exactly one service operation.
pub async fn handle_request(service: &PropertyService, request: Request) -> Response<Body> {
    let id = request
        .path_parameters_ref()
        .and_then(|params| params.first(ID_PARAMETER_NAME));
    let body = request.body();
    info!(
        method = %request.method(),
        id = ?id,
        body_size = body.len(),
        "Dispatching request"
    );
    debug!(headers = ?request.headers(), "Request headers");

    match (request.method(), id) {
        (&Method::GET, Some(id)) => handle_get(service, id).await,
        (&Method::GET, None) => handle_get_list(service).await,
        (&Method::POST, _) => {
            if body.is_empty() {
                return reject(StatusCode::BAD_REQUEST, REQUEST_BODY_CANNOT_BE_EMPTY);
            }
            handle_post(service, body).await
        }
        (&Method::PUT, Some(id)) => {
            if body.is_empty() {
                return reject(StatusCode::BAD_REQUEST, REQUEST_BODY_CANNOT_BE_EMPTY);
            }
            handle_put(service, id, body).await
        }
        (&Method::DELETE, Some(id)) => handle_delete(service, id).await,
        (&Method::PUT, None) | (&Method::DELETE, None) => {
            reject(StatusCode::BAD_REQUEST, ID_PARAMETER_MISSING)
        }
        _ => reject(StatusCode::BAD_REQUEST, HTTP_METHOD_NOT_SUPPORTED),
    }
}

async fn handle_get_list(service: &PropertyService) -> Response<Body> {
    debug!("(GET) LIST");
    match service.list_all().await {
        Ok(properties) => to_json_response(&properties),
        Err(err) => from_service_error(err),
    }
}

async fn handle_get(service: &PropertyService, id: &str) -> Response<Body> {
    debug!("(GET) ITEM");
    match service.get_by_id(id).await {
        Ok(property) => to_json_response(&property),
        Err(err) => from_service_error(err),
    }
}

async fn handle_post(service: &PropertyService, body: &[u8]) -> Response<Body> {
    debug!("(POST) ITEM");
    let Some(property) = decode_property(body) else {
        return reject(StatusCode::BAD_REQUEST, REQUEST_BODY_NOT_A_PROPERTY);
    };
    match service.create(property).await {
        Ok(property) => to_json_response(&property),
        Err(err) => from_service_error(err),
    }
}

async fn handle_put(service: &PropertyService, id: &str, body: &[u8]) -> Response<Body> {
    debug!("(PUT) ITEM");
    let Some(property) = decode_property(body) else {
        return reject(StatusCode::BAD_REQUEST, REQUEST_BODY_NOT_A_PROPERTY);
    };
    match service.update(id, property).await {
        Ok(property) => to_json_response(&property),
        Err(err) => from_service_error(err),
    }
}

async fn handle_delete(service: &PropertyService, id: &str) -> Response<Body> {
    debug!("(DELETE) ITEM");
    match service.delete(id).await {
        Ok(()) => Response::new(Body::Empty),
        Err(err) => from_service_error(err),
    }
}

fn decode_property(body: &[u8]) -> Option<Property> {
    serde_json::from_slice(body)
        .map_err(|e| debug!("Failed to decode property: {e}"))
        .ok()
}

fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Body>) -> Response<Body> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// A rejection detected before the service was called.
fn reject(status: StatusCode, message: &'static str) -> Response<Body> {
    info!(status = status.as_u16(), "Rejected request: {message}");
    respond(status, CONTENT_TYPE_TEXT, message)
}

fn from_service_error(err: ServiceError) -> Response<Body> {
    let kind = err.kind();
    if kind.is_client_error() {
        warn!(kind = ?kind, "{err}");
    } else {
        error!(kind = ?kind, "{err}");
    }
    respond(kind.status_code(), CONTENT_TYPE_TEXT, kind.message())
}

fn to_json_response<T: Serialize>(value: &T) -> Response<Body> {
    match serde_json::to_string(value) {
        Ok(body) => respond(StatusCode::OK, CONTENT_TYPE_JSON, body),
        Err(e) => {
            error!("Failed to encode response: {e}");
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                CONTENT_TYPE_TEXT,
                JSON_TRANSFORMATION_ERROR,
            )
        }
    }
}
