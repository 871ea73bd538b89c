//! HTTP handlers: the tracking endpoint and the two reports.
//!
//! Handlers never panic on request failures; every error path maps to a
//! response and a server-side log line, and the process stays up.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use tracing::error;

use crate::event::{Clock, TrackEvent, TrackPayload};
use crate::report;
use crate::store::EventStore;

/// `POST /track`: normalize the payload into a full record and append it.
pub async fn track(
    store: web::Data<EventStore>,
    clock: web::Data<dyn Clock>,
    req: HttpRequest,
    payload: web::Json<TrackPayload>,
) -> impl Responder {
    let ua_header =
        req.headers().get(header::USER_AGENT).and_then(|v| v.to_str().ok());
    let event = TrackEvent::from_payload(payload.into_inner(), ua_header, clock.get_ref());

    match store.append(&event).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "ok": true })),
        Err(e) => {
            error!(error = %e, "event append failed");
            HttpResponse::InternalServerError()
                .json(json!({ "ok": false, "error": "write_failed" }))
        }
    }
}

/// `GET /report.json`: every record, newest first. An unreadable store
/// degrades to `[]`, never an error response.
pub async fn report_json(store: web::Data<EventStore>) -> impl Responder {
    match store.load().await {
        Ok(mut events) => {
            report::sort_newest_first(&mut events);
            HttpResponse::Ok().json(events)
        }
        Err(e) => {
            error!(error = %e, "json report degraded to empty");
            HttpResponse::Ok().json(Vec::<TrackEvent>::new())
        }
    }
}

/// `GET /report.csv`: fixed 12-column CSV in file order.
pub async fn report_csv(store: web::Data<EventStore>) -> impl Responder {
    match store.load().await {
        Ok(events) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(report::to_csv(&events)),
        Err(e) => {
            error!(error = %e, "csv report failed");
            HttpResponse::InternalServerError().body("error")
        }
    }
}
