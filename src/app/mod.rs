//! Application assembly and top-level resolution.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     AppBuilder (controllers + route tables, appended in call order)
//!     → RouteTable::validate (fail fast on misconfiguration)
//!     → App (immutable, shared via Arc)
//!
//! Per request:
//!     (method, path, Input)
//!     → RequestContext (borrows registry, pattern cache, input)
//!     → RouteTable::dispatch
//!     → Resolution read back by the caller
//! ```

pub mod registry;

pub use crate::routing::input::Input;
pub use registry::ControllerRegistry;

use std::sync::Arc;

use crate::config::schema::{RouteConfig, RouteKind};
use crate::routing::{
    Controller, Handler, PatternCache, RequestContext, Resolution, Route, RouteResult, RouteTable,
};

/// A validated route table plus the collaborators it needs.
#[derive(Debug)]
pub struct App {
    table: RouteTable,
    controllers: ControllerRegistry,
    patterns: PatternCache,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    /// Route one request. Handler failures come back as `RouteError::Handler`.
    pub fn handle(&self, method: &str, path: &str, input: &Input) -> RouteResult<Resolution> {
        let mut ctx = RequestContext::new(method, path, input, &self.controllers, &self.patterns);
        self.table.dispatch(&mut ctx)?;
        Ok(ctx.into_resolution())
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }

    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }
}

#[derive(Debug, Default)]
pub struct AppBuilder {
    table: RouteTable,
    controllers: ControllerRegistry,
}

impl AppBuilder {
    pub fn controller<C>(mut self, name: impl Into<String>, controller: C) -> Self
    where
        C: Controller + 'static,
    {
        self.controllers.register(name, Arc::new(controller));
        self
    }

    /// Append `table` after the routes added so far.
    pub fn routes(mut self, table: RouteTable) -> Self {
        self.table = self.table.extend(table);
        self
    }

    /// Append config-declared routes, in file order, after the routes
    /// added so far.
    pub fn config_routes(self, routes: &[RouteConfig]) -> Self {
        self.routes(config_table(routes))
    }

    pub fn build(self) -> RouteResult<App> {
        let patterns = PatternCache::new();
        self.table.validate(&patterns, &self.controllers)?;

        tracing::info!(
            entries = self.table.len(),
            controllers = self.controllers.len(),
            patterns = patterns.len(),
            "Route table validated"
        );

        Ok(App {
            table: self.table,
            controllers: self.controllers,
            patterns,
        })
    }
}

fn config_table(routes: &[RouteConfig]) -> RouteTable {
    routes.iter().fold(RouteTable::new(), |table, config| {
        let handler = Handler::controller(config.controller.clone());
        match config.kind {
            RouteKind::Leaf => {
                let mut route = Route::new(config.verb, config.path.clone(), handler);
                if let Some(method) = &config.method {
                    route = route.method(method.clone());
                }
                table.route(route)
            }
            RouteKind::Controller => table.controller(config.path.clone(), handler),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::routing::table::Entry;
    use crate::routing::{Call, HandlerResult, Reply, RouteError, Verb};

    struct About;

    impl Controller for About {
        fn call(&self, name: &str, _call: &Call<'_, '_>) -> Option<HandlerResult> {
            match name {
                "index" => Some(Ok("about".into())),
                _ => None,
            }
        }
    }

    #[test]
    fn test_config_routes_keep_file_order() {
        let routes = vec![
            RouteConfig {
                kind: RouteKind::Controller,
                verb: Verb::Any,
                path: "/about".into(),
                controller: "About".into(),
                method: None,
            },
            RouteConfig {
                kind: RouteKind::Leaf,
                verb: Verb::Get,
                path: "/about/(num)".into(),
                controller: "About".into(),
                method: Some("view".into()),
            },
        ];
        let table = config_table(&routes);
        assert_eq!(table.len(), 2);
        assert!(matches!(&table.entries()[0], Entry::Controller { prefix, .. } if prefix == "/about"));
        match &table.entries()[1] {
            Entry::Route(route) => {
                assert_eq!(route.verb(), Verb::Get);
                assert_eq!(route.method_name(), Some("view"));
            }
            other => panic!("unexpected entry {:?}", other),
        }

        let app = App::builder()
            .controller("About", About)
            .config_routes(&routes[..1])
            .build()
            .unwrap();
        assert_eq!(
            app.handle("GET", "/about", &Input::default()).unwrap(),
            Resolution::Reply(Reply::from("about"))
        );
    }

    #[test]
    fn test_build_rejects_unknown_controller() {
        let err = App::builder()
            .routes(RouteTable::new().controller("/about", "About"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteError::UnknownController(_)));
    }

    #[test]
    fn test_handle_creates_fresh_context_per_request() {
        let app = App::builder()
            .controller("About", About)
            .routes(
                RouteTable::new()
                    .controller("/about", "About")
                    .any("(all)", Handler::inline(|call| Ok(format!("404 {}", call.arg(0).unwrap_or("")).into()))),
            )
            .build()
            .unwrap();

        let input = Input::default();
        assert_eq!(
            app.handle("GET", "/about", &input).unwrap(),
            Resolution::Reply(Reply::from("about"))
        );
        assert_eq!(
            app.handle("GET", "/nope", &input).unwrap(),
            Resolution::Reply(Reply::from("404 /nope"))
        );
    }

    #[test]
    fn test_unsettled_without_catch_all() {
        let app = App::builder()
            .routes(RouteTable::new().get("/", Handler::inline(|_| Ok("root".into()))))
            .build()
            .unwrap();
        assert_eq!(
            app.handle("GET", "/missing", &Input::default()).unwrap(),
            Resolution::Unsettled
        );
    }
}
