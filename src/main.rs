mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::io;

use config::Settings;
use services::employee::EmployeeService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    // Initialize the employee store
    let store = db::connect(&settings)
        .await
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    if settings.seed_data {
        db::seed::seed_employees(store.as_ref())
            .await
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    }

    let service = web::Data::new(EmployeeService::new(store));
    let bind_address = settings.bind_address();

    info!("Starting server at {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
