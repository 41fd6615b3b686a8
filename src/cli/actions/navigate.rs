use crate::{
    cli::actions::context::{AppContext, print_json},
    features::auth::AuthGuard,
    routes::{Navigation, Router},
};
use anyhow::{Context, Result};
use serde_json::{Value, json};

#[derive(Debug)]
pub struct Args {
    pub path: String,
}

/// Runs one navigation through the router and the session guard.
/// # Errors
/// Returns an error if the path matches no page.
pub fn execute(ctx: &AppContext, args: &Args) -> Result<()> {
    let mut router = Router::new(AuthGuard::new(ctx.session.subscribe()));
    let navigation = router
        .push(&args.path)
        .with_context(|| format!("Cannot open {}", args.path))?;
    print_json(&describe(&navigation))
}

fn describe(navigation: &Navigation) -> Value {
    let route = &navigation.route;
    let params: serde_json::Map<String, Value> = route
        .params
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();

    json!({
        "route": route.name().as_str(),
        "path": route.full_path(),
        "view": route.route.view,
        "params": params,
        "redirected_from": navigation.redirected_from,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{GuardDecision, RouteMatch};

    #[test]
    fn describe_reports_redirect() {
        let guard = |to: &RouteMatch, _: Option<&RouteMatch>| {
            crate::features::auth::guards::decide(to.meta(), &to.full_path(), false)
        };
        let mut router = Router::new(guard);
        let navigation = router.push("/textbooks/7").unwrap();
        let view = describe(&navigation);
        assert_eq!(view["route"], "Login");
        assert_eq!(view["view"], "LoginPage");
        assert_eq!(view["path"], "/login?redirect=%2Ftextbooks%2F7");
        assert_eq!(view["redirected_from"], "/textbooks/7");
    }

    #[test]
    fn describe_lists_params() {
        let mut router = Router::new(|_: &RouteMatch, _: Option<&RouteMatch>| GuardDecision::Allow);
        let navigation = router.push("/test/9/result").unwrap();
        let view = describe(&navigation);
        assert_eq!(view["params"]["id"], "9");
        assert!(view["redirected_from"].is_null());
    }
}
