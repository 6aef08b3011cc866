use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use biteswift_orders::config::ServerConfig;
use biteswift_orders::db::establish_connection_pool;
use biteswift_orders::repository::DieselRepository;
use biteswift_orders::routes::api::{
    api_get_order, api_list_orders, api_list_products, api_place_order, show_index,
};
use biteswift_orders::services::catalog::seed_catalog;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    if config.seed_catalog {
        if let Err(e) = seed_catalog(&repo) {
            log::error!("Failed to seed catalog: {e}");
            std::process::exit(1);
        }
    }

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(show_index)
            .service(api_list_products)
            .service(api_place_order)
            .service(api_list_orders)
            .service(api_get_order)
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((config.address, config.port))?
    .run()
    .await
}
