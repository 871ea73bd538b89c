use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use quiztrack::event::{Clock, SystemClock};
use quiztrack::{handlers, Config, EventStore};

/// Request bodies on `/track` are capped at 200 KB.
const JSON_BODY_LIMIT: usize = 200 * 1024;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let subscriber = FmtSubscriber::builder().with_env_filter("info").finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let config = Config::from_env();
    let store = EventStore::new(&config.events_file);
    store
        .ensure_exists()
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    info!(port = config.port, store = %config.events_file.display(), "quiztrack listening");

    let store = web::Data::new(store);
    let clock: web::Data<dyn Clock> = web::Data::from(Arc::new(SystemClock) as Arc<dyn Clock>);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .app_data(clock.clone())
            .app_data(web::JsonConfig::default().limit(JSON_BODY_LIMIT))
            .route("/track", web::post().to(handlers::track))
            .route("/report.json", web::get().to(handlers::report_json))
            .route("/report.csv", web::get().to(handlers::report_csv))
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
