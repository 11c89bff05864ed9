//! Invariants of the router checked over a spread of inputs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use switchyard::app::{App, Input};
use switchyard::demo::Project;
use switchyard::routing::uri::UriStack;
use switchyard::routing::{
    CompiledPattern, Handler, ParamValue, PatternCache, RequestContext, Resolution, RouteTable,
};

mod common;

use common::{request, text};

const PATHS: &[&str] = &[
    "/",
    "/a",
    "/a/",
    "/a/b/c",
    "/projects/12/members",
    "/planet//mars",
    "/x.y/z-1",
];

#[test]
fn test_strip_then_pop_restores_uri() {
    for path in PATHS {
        for prefix in ["", "/", "/a", "/projects", "/planet/"] {
            let mut stack = UriStack::new(*path);
            if stack.strip_prefix(prefix) {
                assert_eq!(stack.depth(), 1);
                assert!(stack.current().starts_with('/'), "{} - {}", path, prefix);
                assert!(stack.pop());
            }
            assert_eq!(stack.current(), *path);
            assert_eq!(stack.depth(), 0);
        }
    }
}

#[test]
fn test_back_is_one_shot() {
    let app = App::builder()
        .routes(RouteTable::new().any("(all)", text("caught")))
        .build()
        .unwrap();

    for path in PATHS.iter().filter(|p| p.starts_with("/a")) {
        let input = Input::default();
        let mut ctx = RequestContext::new("GET", path, &input, app.controllers(), app.patterns());
        let mut calls = Vec::new();
        ctx.group("/a", |ctx| {
            calls.push(ctx.back());
            let restored = ctx.uri().to_string();
            calls.push(ctx.back());
            assert_eq!(ctx.uri(), restored);
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, vec![true, false]);
        assert_eq!(ctx.uri(), *path);
        assert!(!ctx.is_settled());
    }
}

#[test]
fn test_back_outside_scope_fails() {
    let input = Input::default();
    let app = App::builder().build().unwrap();
    let mut ctx = RequestContext::new("GET", "/", &input, app.controllers(), app.patterns());
    assert!(!ctx.back());
    assert!(!ctx.fallthrough());
}

#[test]
fn test_num_params_are_integers() {
    let pattern = CompiledPattern::compile("/item/(id:num)").unwrap();
    for id in ["0", "7", "0042", "123456789", "99999999999999999999999"] {
        let captured = pattern.matches(&format!("/item/{}", id)).unwrap();
        assert_eq!(captured.named.len(), 1);
        assert!(
            matches!(captured.named[0].1, ParamValue::Int(_)),
            "{} did not coerce",
            id
        );
    }
    for id in ["x", "1a", "-1", "1.5", ""] {
        assert!(pattern.matches(&format!("/item/{}", id)).is_none(), "{} matched", id);
    }
}

#[test]
fn test_substituted_description_matches_its_values() {
    let cases: &[(&str, &[(&str, &str)])] = &[
        ("/user/(name:any)", &[("name", "ada")]),
        ("/user/(name:any)/post/(id:num)", &[("name", "grace"), ("id", "31")]),
        ("/files/(path:all)", &[("path", "a/b/c.txt")]),
    ];
    for (description, values) in cases {
        let mut uri = description.to_string();
        for (name, value) in values.iter() {
            for kind in ["any", "num", "all"] {
                uri = uri.replace(&format!("({}:{})", name, kind), value);
            }
        }

        let captured = CompiledPattern::compile(description)
            .unwrap()
            .matches(&uri)
            .unwrap_or_else(|| panic!("{} did not match {}", description, uri));
        for (name, value) in values.iter() {
            let got = captured
                .named
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.to_string());
            assert_eq!(got.as_deref(), Some(*value));
        }
    }
}

#[test]
fn test_leaf_routes_never_consume_uri() {
    let patterns = PatternCache::new();
    let app = App::builder().controller("Project", Project).build().unwrap();
    let input = Input::default();

    for path in PATHS {
        let mut ctx = RequestContext::new("GET", path, &input, app.controllers(), &patterns);
        let _ = ctx.get("/a/(any)", text("hit")).unwrap();
        let _ = ctx.get("(all)", text("fallback")).unwrap();
        assert_eq!(ctx.uri(), *path);
        assert_eq!(ctx.uri_depth(), 0);
        assert!(ctx.is_settled());
    }
}

#[test]
fn test_nothing_runs_after_settlement() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let app = App::builder()
        .routes(
            RouteTable::new()
                .get("(all)", text("first"))
                .get(
                    "/(all)",
                    Handler::inline(move |_| {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok("second".into())
                    }),
                ),
        )
        .build()
        .unwrap();

    for path in PATHS {
        assert_eq!(request(&app, "GET", path), Resolution::Reply("first".into()));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
