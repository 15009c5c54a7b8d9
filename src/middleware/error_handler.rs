use actix_web::http::StatusCode;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result, dev::ServiceResponse};
use log::error;
use serde_json::json;

/// Replace any 500 body with a static message so no internal detail reaches the
/// client. The underlying error is logged server-side.
pub fn handle_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    if let Some(err) = res.response().error() {
        error!("unhandled error: {err}");
    }

    let new_response = HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(json!({
        "success": false,
        "message": "Something went wrong, please try again later.",
        "httpStatusCode": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        "error": "INTERNAL_SERVER_ERROR",
        "service": std::env::var("SERVICE_NAME").unwrap_or_else(|_| "Unknown".to_string()),
    }));
    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}
