mod chain;
mod health;
pub mod models;

use actix_web::{
    HttpResponse,
    error::InternalError,
    web::{self, ServiceConfig},
};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("rejected request body: {err}");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().body(chain::INVALID_TRANSACTION),
        )
        .into()
    }))
    .service(health::health_check)
    .service(chain::get_blocks)
    .service(chain::mine_block)
    .service(chain::validate_chain);
}
