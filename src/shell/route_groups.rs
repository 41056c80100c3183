// Route groups mounted by the bootstrap.
//
// Each group is owned by an external collaborator that hands over a Router;
// the bootstrap only decides where it is mounted. A group nobody supplied is
// still mounted, answering 501 so the prefix never falls through to another
// handler.

use axum::{Json, Router, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    User,
    Admin,
    Doctors,
    Appointments,
    Payment,
}

impl RouteGroup {
    /// Mount order.
    pub const ALL: [RouteGroup; 5] = [
        RouteGroup::User,
        RouteGroup::Admin,
        RouteGroup::Doctors,
        RouteGroup::Appointments,
        RouteGroup::Payment,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            RouteGroup::User => "/api/user",
            RouteGroup::Admin => "/api/admin",
            RouteGroup::Doctors => "/api/doctors",
            RouteGroup::Appointments => "/api/appointments",
            RouteGroup::Payment => "/api/payment",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RouteGroup::User => "user",
            RouteGroup::Admin => "admin",
            RouteGroup::Doctors => "doctors",
            RouteGroup::Appointments => "appointments",
            RouteGroup::Payment => "payment",
        }
    }
}

#[derive(Serialize)]
pub struct UnwiredResponse {
    pub success: bool,
    pub message: String,
}

pub struct RouteGroups<S> {
    routers: HashMap<RouteGroup, Router<S>>,
}

impl<S> Default for RouteGroups<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RouteGroups<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            routers: HashMap::new(),
        }
    }

    pub fn with(mut self, group: RouteGroup, router: Router<S>) -> Self {
        self.routers.insert(group, router);
        self
    }

    pub fn is_wired(&self, group: RouteGroup) -> bool {
        self.routers.contains_key(&group)
    }

    /// Nests every group under its prefix.
    pub fn mount(mut self, mut app: Router<S>) -> Router<S> {
        for group in RouteGroup::ALL {
            let router = match self.routers.remove(&group) {
                Some(router) => router,
                None => {
                    tracing::warn!(group = group.name(), "route group not wired");
                    unwired(group)
                }
            };
            tracing::debug!(
                group = group.name(),
                prefix = group.prefix(),
                "mounting route group"
            );
            app = app.nest(group.prefix(), router);
        }
        app
    }
}

fn unwired<S>(group: RouteGroup) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().fallback(move || async move {
        (
            StatusCode::NOT_IMPLEMENTED,
            Json(UnwiredResponse {
                success: false,
                message: format!("{} routes are not available", group.name()),
            }),
        )
            .into_response()
    })
}
