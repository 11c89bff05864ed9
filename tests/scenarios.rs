//! End-to-end routing scenarios against a bare application.

use std::sync::Arc;

use switchyard::app::{App, Input};
use switchyard::demo::{About, Project};
use switchyard::routing::{
    Call, Controller, Handler, HandlerResult, Reply, RequestContext, Resolution, Route,
    RouteResult, RouteTable,
};

mod common;

use common::{not_found, reply_text, request, text};

#[test]
fn test_hello_world() {
    let app = App::builder()
        .routes(RouteTable::new().get("/", text("Hello world!")))
        .build()
        .unwrap();
    assert_eq!(reply_text(request(&app, "GET", "/")), "Hello world!");
}

#[test]
fn test_post_greeting_reads_input() {
    let app = App::builder()
        .routes(RouteTable::new().post(
            "/user/(any)",
            Handler::inline(|call| {
                let title = call.input().post_or("title", "Guest");
                Ok(format!("Hello {} {}!", title, call.arg(0).unwrap_or_default()).into())
            }),
        ))
        .build()
        .unwrap();

    assert_eq!(
        reply_text(request(&app, "POST", "/user/Someone")),
        "Hello Guest Someone!"
    );

    let input = Input::default().with_post("title", "Mr.");
    assert_eq!(
        reply_text(app.handle("POST", "/user/Someone", &input).unwrap()),
        "Hello Mr. Someone!"
    );

    assert_eq!(request(&app, "GET", "/user/Someone"), Resolution::Unsettled);
}

#[test]
fn test_controller_leaf_routes_and_catch_all() {
    let app = App::builder()
        .controller("Project", Project)
        .routes(
            RouteTable::new()
                .get("/projects", "Project")
                .route(Route::get("/project/(num)", "Project").method("view"))
                .get("(all)", not_found()),
        )
        .build()
        .unwrap();

    assert_eq!(reply_text(request(&app, "GET", "/projects")), "Projects");
    assert_eq!(reply_text(request(&app, "GET", "/project/23")), "Project #23");
    assert_eq!(
        reply_text(request(&app, "GET", "/project/oops")),
        "Oops, 404! \"/project/oops\" does not exist."
    );
}

#[test]
fn test_controller_index_normalization() {
    let app = App::builder()
        .controller("About", About)
        .routes(RouteTable::new().controller("/about", "About"))
        .build()
        .unwrap();

    for path in ["/about", "/about/", "/about//", "/about/index", "/about/index/"] {
        assert_eq!(reply_text(request(&app, "GET", path)), "about", "path {}", path);
    }
    assert_eq!(request(&app, "GET", "/aboutus"), Resolution::Unsettled);
    assert_eq!(request(&app, "GET", "/about/join"), Resolution::Unsettled);
}

#[test]
fn test_group_back_restores_uri_for_catch_all() {
    let app = App::builder()
        .routes(
            RouteTable::new()
                .group("/planet", |planet| planet.get("/", text("Hello Cosmos!")).back())
                .get("(all)", not_found()),
        )
        .build()
        .unwrap();

    assert_eq!(
        reply_text(request(&app, "GET", "/planet/mars")),
        "Oops, 404! \"/planet/mars\" does not exist."
    );
}

#[test]
fn test_group_without_back_claims_request() {
    let app = App::builder()
        .routes(
            RouteTable::new()
                .group("/planet", |planet| planet.get("/", text("Hello Cosmos!")))
                .get("(all)", not_found()),
        )
        .build()
        .unwrap();

    assert_eq!(request(&app, "GET", "/planet/mars"), Resolution::Empty);
    assert_eq!(reply_text(request(&app, "GET", "/planet")), "Hello Cosmos!");
}

/// Routes its own URI space; the `/play` group always gives its prefix back.
struct Warren;

impl Controller for Warren {
    fn call(&self, name: &str, call: &Call<'_, '_>) -> Option<HandlerResult> {
        match name {
            "view" => Some(Ok(format!("hole {}", call.arg(0).unwrap_or_default()).into())),
            _ => None,
        }
    }

    fn resolves(&self) -> bool {
        true
    }

    fn resolve(self: Arc<Self>, ctx: &mut RequestContext<'_>) -> RouteResult<Option<Reply>> {
        ctx.route(&Route::get("/(num)", Handler::instance(self)).method("view"))?;
        ctx.group("/play", |ctx| {
            ctx.get("/(hole:num)", text("playing"))?;
            ctx.back();
            Ok(())
        })?;
        ctx.get(
            "/play/(all)",
            Handler::inline(|call| {
                Ok(format!("Sorry but \"{}\" is not here. 404.", call.arg(0).unwrap_or_default()).into())
            }),
        )?;
        Ok(None)
    }
}

#[test]
fn test_controller_resolve_with_nested_group() {
    let app = App::builder()
        .controller("Warren", Warren)
        .routes(RouteTable::new().controller("", "Warren"))
        .build()
        .unwrap();

    assert_eq!(
        reply_text(request(&app, "GET", "/play/Mr.Rabbit")),
        "Sorry but \"Mr.Rabbit\" is not here. 404."
    );
    assert_eq!(reply_text(request(&app, "GET", "/17")), "hole 17");
    assert_eq!(request(&app, "GET", "/elsewhere"), Resolution::Empty);
}

/// Same as `Warren`, but its catch-all is a bare `(all)`.
struct Burrow;

impl Controller for Burrow {
    fn call(&self, _name: &str, _call: &Call<'_, '_>) -> Option<HandlerResult> {
        None
    }

    fn resolves(&self) -> bool {
        true
    }

    fn resolve(self: Arc<Self>, ctx: &mut RequestContext<'_>) -> RouteResult<Option<Reply>> {
        ctx.group("/play", |ctx| {
            ctx.get("/(hole:num)", text("playing"))?;
            ctx.back();
            Ok(())
        })?;
        ctx.get(
            "(all)",
            Handler::inline(|call| {
                Ok(format!("Sorry but \"{}\" is not here. 404.", call.arg(0).unwrap_or_default()).into())
            }),
        )?;
        Ok(None)
    }
}

#[test]
fn test_bare_catch_all_sees_uri_restored_by_back() {
    let app = App::builder()
        .controller("Burrow", Burrow)
        .routes(RouteTable::new().controller("", "Burrow"))
        .build()
        .unwrap();

    assert_eq!(
        reply_text(request(&app, "GET", "/play/Mr.Rabbit")),
        "Sorry but \"/play/Mr.Rabbit\" is not here. 404."
    );
}

#[test]
fn test_demo_application_covers_every_scenario() {
    let app = switchyard::demo::app(&[]).unwrap();

    assert_eq!(reply_text(request(&app, "GET", "/")), "Hello world!");
    assert_eq!(
        reply_text(request(&app, "POST", "/user/Someone")),
        "Hello Guest Someone!"
    );
    assert_eq!(reply_text(request(&app, "GET", "/project/23")), "Project #23");
    assert_eq!(
        reply_text(request(&app, "GET", "/project/oops")),
        "Oops, 404! \"/project/oops\" does not exist."
    );
    assert_eq!(reply_text(request(&app, "GET", "/about/index/")), "about");
    assert_eq!(
        reply_text(request(&app, "GET", "/planet/mars")),
        "Oops, 404! \"/planet/mars\" does not exist."
    );
    assert_eq!(
        reply_text(request(&app, "GET", "/rabbit/play/Mr.Rabbit")),
        "Sorry but \"Mr.Rabbit\" is not here. 404."
    );
    assert_eq!(
        reply_text(request(&app, "GET", "/rabbit/carrots")),
        "Oops, 404! \"/rabbit/carrots\" does not exist."
    );
}
