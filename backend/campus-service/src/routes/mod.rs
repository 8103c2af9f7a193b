pub mod chats;
pub mod connections;
pub mod events;
pub mod feed;
pub mod users;

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::{error::ServiceError, state::AppState};

/// Register every HTTP endpoint
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and queries get the same JSON error shape as everything else
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::InvalidInput(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ServiceError::InvalidInput(err.to_string()).into()
    }))
    .service(health)
    .service(users::register)
    .service(users::search)
    .service(users::update_me)
    .service(users::get_user)
    .service(connections::connect)
    .service(connections::disconnect)
    .service(connections::is_connected)
    .service(chats::list_chats)
    .service(chats::direct)
    .service(chats::create_group)
    .service(chats::get_messages)
    .service(chats::send_message)
    .service(feed::get_feed)
    .service(feed::create_post)
    .service(feed::add_comment)
    .service(events::list_events)
    .service(events::create_event)
    .service(events::attend)
    .service(events::leave);
}

/// GET /health
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": state.notifications.version(),
    }))
}
