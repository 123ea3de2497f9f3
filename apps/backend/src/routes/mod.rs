use actix_web::web;

pub mod health;
pub mod realtime;
pub mod trials;

#[cfg(test)]
mod tests_trials;

/// Configure application routes.
///
/// Trial endpoints live at the root to match the client contract;
/// health and the realtime upgrade get their own scopes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));
    cfg.service(web::scope("/health").configure(health::configure_routes));

    trials::configure_routes(cfg);

    // Realtime upgrade: /ws
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
