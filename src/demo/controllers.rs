//! Controllers served by the demo application.

use std::sync::Arc;

use serde_json::json;

use crate::routing::{
    Call, Controller, Handler, HandlerResult, Reply, RequestContext, Route, RouteResult,
};

/// Project listing and membership.
pub struct Project;

impl Controller for Project {
    fn call(&self, name: &str, call: &Call<'_, '_>) -> Option<HandlerResult> {
        let reply = match name {
            "index" => Reply::from("Projects"),
            "view" => match call.arg(0) {
                Some(id) => format!("Project #{}", id).into(),
                None => "Project #?".into(),
            },
            "join" => "Fill in the form to join a project.".into(),
            "POSTjoin" => format!(
                "Welcome aboard, {}!",
                call.input().post_or("name", "stranger")
            )
            .into(),
            "members" => json!({
                "project": call.arg(0),
                "members": ["ada", "grace"],
            })
            .into(),
            _ => return None,
        };
        Some(Ok(reply))
    }

    fn name(&self) -> &str {
        "Project"
    }
}

pub struct About;

impl Controller for About {
    fn call(&self, name: &str, _call: &Call<'_, '_>) -> Option<HandlerResult> {
        match name {
            "index" => Some(Ok("about".into())),
            "team" => Some(Ok("The switchyard crew.".into())),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        "About"
    }
}

/// Routes everything below its prefix by itself.
///
/// `/(num)` goes to `view`, `/play/(hole:num)` jumps into a hole, and any
/// other `/play/...` is reported missing. Anything else is handed back.
pub struct Rabbit;

impl Controller for Rabbit {
    fn call(&self, name: &str, call: &Call<'_, '_>) -> Option<HandlerResult> {
        match name {
            "view" => Some(Ok(format!("Rabbit #{}", call.arg(0).unwrap_or("?")).into())),
            _ => None,
        }
    }

    fn resolves(&self) -> bool {
        true
    }

    fn resolve(self: Arc<Self>, ctx: &mut RequestContext<'_>) -> RouteResult<Option<Reply>> {
        ctx.route(&Route::get("/(num)", Handler::instance(self)).method("view"))?;

        ctx.group("/play", |ctx| {
            ctx.get(
                "/(hole:num)",
                Handler::inline(|call| {
                    let hole = call.params().int("hole").unwrap_or_default();
                    Ok(format!("Down hole {} we go.", hole).into())
                }),
            )?;
            ctx.fallthrough();
            Ok(())
        })?;

        ctx.get(
            "/play/(all)",
            Handler::inline(|call| {
                Ok(format!("Sorry but \"{}\" is not here. 404.", call.arg(0).unwrap_or_default()).into())
            }),
        )?;

        ctx.fallthrough();
        Ok(None)
    }

    fn name(&self) -> &str {
        "Rabbit"
    }
}
