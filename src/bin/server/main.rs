use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use env_logger::Env;
use pathways::email::SmtpMailer;
use pathways::notifications::Dispatcher;
use pathways::programs::{DbProgramDirectory, ProgramDirectory};
use pathways::reports::store::{DbReportStore, ReportStore};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_lib_mods();
    pathways::app_config::init();
    pathways::db::init_db(std::env::var("DATABASE_URL").expect("DATABASE_URL must be set.")).await;

    let mailer = Arc::new(SmtpMailer::from_env().expect("SMTP configuration is invalid."));
    let dispatcher = Dispatcher::from_env(mailer);

    let store: Arc<dyn ReportStore> =
        Arc::new(DbReportStore::new(pathways::db::get_db_pool().clone()));
    let programs: Arc<dyn ProgramDirectory> =
        Arc::new(DbProgramDirectory::new(pathways::db::get_db_pool().clone()));

    let bind = pathways::app_config::get().server.bind;
    log::info!("Listening on {}", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(store.clone()))
            .app_data(Data::new(programs.clone()))
            .app_data(Data::new(dispatcher.clone()))
            // Security headers - applied to all responses
            .wrap(
                DefaultHeaders::new()
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .wrap(Logger::new("%a %{User-Agent}i"))
            .configure(pathways::web::configure)
    })
    .bind(bind)?
    .run()
    .await
}

/// Initialize third party crates we rely on but don't have control over.
fn init_lib_mods() {
    // This should be calls to crates without any transformative work applied.
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
