use super::post_controller::{create_post, delete_post, get_post, list_posts, update_post};
use crate::middleware::auth::verify_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

/// Reads are public; the mutating resources are wrapped with the bearer
/// middleware so both live under the same path prefix.
pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .route("", web::get().to(list_posts))
            .route("/{id}", web::get().to(get_post))
            .service(
                web::resource("")
                    .wrap(HttpAuthentication::bearer(verify_token))
                    .route(web::post().to(create_post)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(HttpAuthentication::bearer(verify_token))
                    .route(web::put().to(update_post))
                    .route(web::delete().to(delete_post)),
            ),
    );
}
