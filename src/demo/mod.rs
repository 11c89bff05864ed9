//! The application served by the `switchyard` binary.
//!
//! # Data Flow
//! ```text
//! builder()  → controllers + the declared routes
//! app(extra) → builder() + config routes + the 404 catch-all → App
//! ```
//!
//! Config-declared routes land between the declared routes and the
//! catch-all, so they can add paths but never shadow the ones below.

pub mod controllers;

pub use controllers::{About, Project, Rabbit};

use serde_json::json;

use crate::app::{App, AppBuilder};
use crate::config::RouteConfig;
use crate::routing::{Handler, Route, RouteResult, RouteTable};

fn text(reply: &'static str) -> Handler {
    Handler::inline(move |_| Ok(reply.into()))
}

/// The declared routes, in evaluation order.
pub fn routes() -> RouteTable {
    RouteTable::new()
        .get("/", text("Hello world!"))
        .post(
            "/user/(any)",
            Handler::inline(|call| {
                let title = call.input().post_or("title", "Guest");
                Ok(format!("Hello {} {}!", title, call.arg(0).unwrap_or_default()).into())
            }),
        )
        .get("/projects", "Project")
        .route(Route::get("/project/(num)", "Project").method("view"))
        .controller("/team", "Project")
        .controller("/about", "About")
        .group("/planet", |planet| {
            planet
                .get("/", text("Hello Cosmos!"))
                .get(
                    "/(name:any)/moons/(count:num)",
                    Handler::inline(|call| {
                        let name = call.params().str("name").unwrap_or_default();
                        let count = call.params().int("count").unwrap_or_default();
                        Ok(format!("{} has {} moons.", name, count).into())
                    }),
                )
                .fallthrough()
        })
        .group("/api", |api| {
            api.get(
                "/users/(id:num)",
                Handler::inline(|call| {
                    Ok(json!({
                        "id": call.params().int("id"),
                        "verbose": call.input().get("verbose").is_some(),
                    })
                    .into())
                }),
            )
            .route(
                Route::post(
                    "/jobs",
                    Handler::inline(|call| {
                        Ok(json!({ "accepted": true, "early": call.early_ack() }).into())
                    }),
                )
                .early_ack(),
            )
            .fallthrough()
        })
        .controller("/rabbit", "Rabbit")
}

/// Controllers and declared routes, ready for more routes.
pub fn builder() -> AppBuilder {
    App::builder()
        .controller("Project", Project)
        .controller("About", About)
        .controller("Rabbit", Rabbit)
        .routes(routes())
}

/// The complete application with `extra` routes ahead of the catch-all.
pub fn app(extra: &[RouteConfig]) -> RouteResult<App> {
    builder()
        .config_routes(extra)
        .routes(RouteTable::new().any(
            "(all)",
            Handler::inline(|call| {
                Ok(format!("Oops, 404! \"{}\" does not exist.", call.arg(0).unwrap_or_default()).into())
            }),
        ))
        .build()
}
