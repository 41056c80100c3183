// Composition root for the appointment booking backend.
//
// Responsibilities
// - Read config from environment.
// - Connect the database and the media host through their connectors.
// - Compose CORS, body limits, static assets, route groups and liveness into one router.
// - Bind the listener and serve until shutdown.

pub mod bootstrap;
pub mod config;
pub mod http;
pub mod route_groups;
pub mod state;
