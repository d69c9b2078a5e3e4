/*
 * Responsibility
 * - Public interface of the middleware layers
 * - auth::admission (bearer admission gate), http (request id / tracing / timeout)
 */
pub mod auth;
pub mod http;
