use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::io::{Error, ErrorKind};

use todolist::auth::CredentialHasher;
use todolist::config::Config;
use todolist::store::pool;
use todolist::{routes, AppState};

fn startup_error(context: &str, e: impl std::fmt::Display) -> Error {
    error!("{}: {}", context, e);
    Error::new(ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    let hasher = CredentialHasher::new(&config.password_salt)
        .map_err(|e| startup_error("Invalid PASSWORD_SALT", e))?;

    let state = match &config.database_url {
        Some(url) => {
            let pool = pool::connect(
                url,
                config.database_max_connections,
                config.database_connect_attempts,
                config.database_connect_delay,
            )
            .await
            .map_err(|e| startup_error("Failed to connect to database", e))?;

            if config.run_migrations {
                pool::run_migrations(&pool)
                    .await
                    .map_err(|e| startup_error("Failed to run migrations", e))?;
            }
            AppState::with_pool(pool, hasher)
        }
        None => {
            info!("DATABASE_URL is not set; keeping data in memory");
            AppState::in_memory(hasher)
        }
    };
    let state = web::Data::new(state);

    info!("Starting todolist server at {}", config.server_url());

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
