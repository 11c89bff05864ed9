//! Declarative route tables.
//!
//! A `RouteTable` is the application's route script written down as data:
//! the same leaf, controller, group and back steps the imperative API
//! offers, evaluated in order against one `RequestContext`. Being data, it
//! can be validated once at build time.

use crate::routing::cache::PatternCache;
use crate::routing::context::RequestContext;
use crate::routing::controller::ControllerLoader;
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::handler::Handler;
use crate::routing::pattern::trim_trailing_slash;
use crate::routing::route::Route;
use crate::routing::verb::Verb;

#[derive(Debug, Clone)]
pub enum Entry {
    Route(Route),
    Controller { prefix: String, handler: Handler },
    Group { prefix: String, table: RouteTable },
    /// `back()` from the enclosing group.
    Back,
    /// `fallthrough()` from the enclosing group.
    Fallthrough,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<Entry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, route: Route) -> Self {
        self.entries.push(Entry::Route(route));
        self
    }

    pub fn get(self, description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        self.route(Route::get(description, handler))
    }

    pub fn post(self, description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        self.route(Route::post(description, handler))
    }

    pub fn put(self, description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        self.route(Route::put(description, handler))
    }

    pub fn delete(self, description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        self.route(Route::delete(description, handler))
    }

    pub fn any(self, description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        self.route(Route::any(description, handler))
    }

    pub fn controller(mut self, prefix: impl Into<String>, handler: impl Into<Handler>) -> Self {
        self.entries.push(Entry::Controller {
            prefix: prefix.into(),
            handler: handler.into(),
        });
        self
    }

    pub fn group<F>(mut self, prefix: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(RouteTable) -> RouteTable,
    {
        self.entries.push(Entry::Group {
            prefix: prefix.into(),
            table: build(RouteTable::new()),
        });
        self
    }

    pub fn back(mut self) -> Self {
        self.entries.push(Entry::Back);
        self
    }

    pub fn fallthrough(mut self) -> Self {
        self.entries.push(Entry::Fallthrough);
        self
    }

    /// Append every entry of `other` after this table's entries.
    pub fn extend(mut self, other: RouteTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluate every entry in order.
    pub fn dispatch(&self, ctx: &mut RequestContext<'_>) -> RouteResult<()> {
        for entry in &self.entries {
            match entry {
                Entry::Route(route) => {
                    ctx.route(route)?;
                }
                Entry::Controller { prefix, handler } => {
                    ctx.fit_controller(prefix, handler)?;
                }
                Entry::Group { prefix, table } => {
                    ctx.group(prefix, |ctx| table.dispatch(ctx))?;
                }
                Entry::Back => {
                    ctx.back();
                }
                Entry::Fallthrough => {
                    ctx.fallthrough();
                }
            }
        }
        Ok(())
    }

    /// Check the table before it serves traffic.
    ///
    /// Compiles every description, checks every named controller can be
    /// loaded, and rejects a leaf route that an earlier leaf on the same
    /// level with the same description always shadows (the earlier one is
    /// `any`, or has the same verb).
    pub fn validate(&self, patterns: &PatternCache, loader: &dyn ControllerLoader) -> RouteResult<()> {
        let mut seen: Vec<(&str, Verb)> = Vec::new();

        for entry in &self.entries {
            match entry {
                Entry::Route(route) => {
                    patterns.get_or_compile(route.description())?;
                    match route.handler() {
                        Handler::ControllerRef(name) => {
                            loader.load(name)?;
                        }
                        Handler::Inline(_) => {
                            if let Some(method) = route.method_name() {
                                return Err(RouteError::InlineMethod(method.to_string()));
                            }
                        }
                        Handler::ControllerInstance(_) => {}
                    }

                    let description = trim_trailing_slash(route.description());
                    let verb = route.verb();
                    if let Some((_, first)) = seen.iter().find(|(d, v)| {
                        *d == description && (*v == verb || *v == Verb::Any)
                    }) {
                        return Err(RouteError::Ambiguous {
                            description: description.to_string(),
                            first: *first,
                            second: verb,
                        });
                    }
                    seen.push((description, verb));
                }
                Entry::Controller { prefix, handler } => match handler {
                    Handler::ControllerRef(name) => {
                        loader.load(name)?;
                    }
                    Handler::Inline(_) => return Err(RouteError::InlineController(prefix.clone())),
                    Handler::ControllerInstance(_) => {}
                },
                Entry::Group { table, .. } => table.validate(patterns, loader)?,
                Entry::Back | Entry::Fallthrough => {}
            }
        }
        Ok(())
    }
}
