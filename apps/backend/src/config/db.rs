use std::env;

/// Optional database URL from the environment.
///
/// Without one the server runs memory-only: trials live in their
/// coordinators and nothing survives a restart.
pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL").ok().filter(|url| !url.is_empty())
}
