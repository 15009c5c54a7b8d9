use crate::user::model::RegisterRequest;
use crate::user::service::UserService;
use crate::utils::error::CustomError;
use crate::utils::model::LoginRequest;
use actix_web::{HttpResponse, web};
use serde_json::json;

pub async fn register_user(
    user_service: web::Data<UserService>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, CustomError> {
    let user_info = body.into_inner();

    user_service
        .create_user(
            user_info.username,
            user_info.email,
            user_info.password,
            user_info.role,
        )
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "User registered successfully",
        "httpStatusCode": 201
    })))
}

pub async fn login_user(
    user_service: web::Data<UserService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, CustomError> {
    let (token, user) = user_service.login(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Logged in successfully",
        "httpStatusCode": 200,
        "token": token,
        "user": user
    })))
}

pub async fn logout_user() -> HttpResponse {
    // JWTs are not tracked server side; the client discards its token.
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Logged out successfully",
        "httpStatusCode": 200
    }))
}
