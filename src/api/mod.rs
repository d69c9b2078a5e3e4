/*
 * Responsibility
 * - Route table: public /_gateway/health + everything else forwarded behind the admission gate
 */
pub mod handlers;
mod routes;

pub use routes::{HEALTH_PATH, proxied, public};
