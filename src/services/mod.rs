/*
 * Responsibility
 * - Domain services shared through AppState
 *   - auth: bearer token issuance / validation
 *   - credentials: username + password lookup for the login endpoint
 */
pub mod auth;
pub mod credentials;
