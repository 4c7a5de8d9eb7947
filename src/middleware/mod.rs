/*
 * Responsibility
 * - middleware public interface
 *   - auth::access: bearer token gate for protected routes
 *   - http: request id / sensitive headers / body limit / timeout / tracing
 */
pub mod auth;
pub mod http;
