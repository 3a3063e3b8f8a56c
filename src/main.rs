use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{get, middleware::Logger, post, web, App, HttpResponse, HttpServer};
use log::{error, info, warn};
use std::sync::Arc;

mod clock;
mod config;
mod error;
mod export;
mod schemas;
mod split;
mod store;

use crate::clock::LocalClock;
use crate::config::Config;
use crate::error::{ApiError, ValidationError};
use crate::export::{attachment_name, render_bill};
use crate::schemas::{CalculateRequest, CalculateResponse};
use crate::split::calculate;
use crate::store::{BillStore, InMemoryBillStore};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

#[post("/api/calculate")]
async fn calculate_bill(
    store: web::Data<dyn BillStore>,
    request: web::Json<CalculateRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let split = calculate(&request.dishes, &request.people, &request.assignments).map_err(|err| {
        warn!("Rejected bill: {}", err);
        ApiError::from(err)
    })?;

    let bill_id = store.store(split.clone()).map_err(|err| {
        error!("Couldn't store bill: {}", err);
        ApiError::BadRequest(err.to_string())
    })?;
    info!(
        "Stored bill {} for {} people, total {:.2}",
        bill_id,
        split.results.len(),
        split.total
    );

    Ok(HttpResponse::Ok().json(CalculateResponse {
        success: true,
        results: split.results,
        total: split.total,
        bill_id,
    }))
}

#[get("/api/download/{bill_id}")]
async fn download_bill(
    store: web::Data<dyn BillStore>,
    bill_id: web::Path<String>,
) -> HttpResponse {
    let bill_id = bill_id.into_inner();
    match store.retrieve(&bill_id) {
        Ok(bill) => HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(attachment_name(&bill.id))],
            })
            .body(render_bill(&bill)),
        Err(err) => {
            let err = ApiError::from(err);
            if let ApiError::Internal(message) = &err {
                error!("Couldn't export bill {}: {}", bill_id, message);
            }
            actix_web::ResponseError::error_response(&err)
        }
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected calculation payload: {}", err);
        ApiError::from(ValidationError::Malformed(err.to_string())).into()
    })
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index)
        .service(calculate_bill)
        .service(download_bill);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    info!("Listening on {}:{}", config.host, config.port);

    let store: Arc<dyn BillStore> = Arc::new(InMemoryBillStore::new(Arc::new(LocalClock)));
    let store = web::Data::from(store);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
