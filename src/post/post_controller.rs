use crate::middleware::auth::get_claims_from_request;
use crate::post::post_model::{CreatePostRequest, Post, UpdatePostRequest};
use crate::post::post_service::PostService;
use crate::utils::error::CustomError;
use actix_web::{HttpRequest, HttpResponse, web};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

fn author_from_request(req: &HttpRequest) -> Result<ObjectId, CustomError> {
    let claims = get_claims_from_request(req)
        .ok_or_else(|| CustomError::UnauthorizedError("No claims found".into()))?;

    ObjectId::parse_str(&claims.id)
        .map_err(|_| CustomError::BadRequestError("Invalid user id in token".into()))
}

pub async fn create_post(
    post_service: web::Data<PostService>,
    body: web::Json<CreatePostRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, CustomError> {
    // Author comes from the token, never from the body
    let author_id = author_from_request(&req)?;

    let new_post = Post {
        id: ObjectId::new(),
        title: body.title.clone(),
        content: body.content.clone(),
        author_id,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };

    let inserted_post = post_service.create_post(new_post).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Post created successfully",
        "httpStatusCode": 201,
        "post": inserted_post
    })))
}

pub async fn list_posts(
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let posts = post_service.list_posts().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Posts fetched successfully",
        "httpStatusCode": 200,
        "count": posts.len(),
        "posts": posts
    })))
}

pub async fn get_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .get_post_with_author(&post_id.into_inner())
        .await?;

    match post {
        Some(p) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Post fetched successfully",
            "httpStatusCode": 200,
            "post": p
        }))),
        None => Err(CustomError::NotFoundError("Post not found".into())),
    }
}

pub async fn update_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    body: web::Json<UpdatePostRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, CustomError> {
    let author_id = author_from_request(&req)?;

    let post = post_service
        .get_post(&post_id.into_inner())
        .await?
        .ok_or_else(|| CustomError::NotFoundError("Post not found".into()))?;

    if post.author_id != author_id {
        return Err(CustomError::ForbiddenError("Forbidden".into()));
    }

    let update = body.into_inner();
    let updated_post = post_service
        .update_post(&post.id, update.title, update.content)
        .await?
        .ok_or_else(|| CustomError::NotFoundError("Post not found".into()))?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post updated successfully",
        "httpStatusCode": 200,
        "post": updated_post
    })))
}

pub async fn delete_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    req: HttpRequest,
) -> Result<HttpResponse, CustomError> {
    let author_id = author_from_request(&req)?;

    let post = post_service
        .get_post(&post_id.into_inner())
        .await?
        .ok_or_else(|| CustomError::NotFoundError("Post not found".into()))?;

    if post.author_id != author_id {
        return Err(CustomError::ForbiddenError("Forbidden".into()));
    }

    let deleted = post_service.delete_post(&post.id).await?;

    if deleted {
        Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Post deleted successfully",
            "httpStatusCode": 200
        })))
    } else {
        Err(CustomError::NotFoundError("Post not found".into()))
    }
}
