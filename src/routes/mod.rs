pub mod health;
pub mod tasks;
pub mod user;

use actix_web::web;

use crate::app;
use crate::auth::SessionAuth;

/// Registers every endpoint together with the extractor error handlers.
///
/// Expects `web::Data<AppState>` to be registered on the `App`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(app::json_config())
        .app_data(app::query_config())
        .app_data(app::path_config())
        .service(health::health)
        .service(
            web::scope("/user")
                .service(user::register)
                .service(user::login)
                .service(user::logout),
        )
        .service(
            web::scope("/task")
                .wrap(SessionAuth)
                .service(tasks::list_tasks)
                .service(tasks::paginate_tasks)
                .service(tasks::filter_tasks)
                .service(tasks::all_tasks)
                .service(tasks::create_task)
                .service(tasks::set_task_status)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
