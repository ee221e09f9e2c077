/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Service banner and liveness
/// - `auth`: Registration, login, current-user lookup
/// - `projects`: Project create/list
/// - `tasks`: Task CRUD and status/priority patches
/// - `comments`: Comment create/list/delete
/// - `analytics`: On-demand task rollup

pub mod analytics;
pub mod auth;
pub mod comments;
pub mod health;
pub mod projects;
pub mod tasks;
