//! Recursive route listing.

use spindle_core::{MethodSet, Middlewares, Routes};

/// Visit every endpoint reachable from `routes`, descending into mounted
/// routers.
///
/// `f` is called once per method with the full pattern (mount prefixes
/// joined) and the middleware stack that applies to it, outermost first.
/// Mount placeholders are skipped. The first error returned by `f` stops the
/// walk.
///
/// ```rust,ignore
/// walk(&router, |method, pattern, _| {
///     println!("{method} {pattern}");
///     Ok::<_, Infallible>(())
/// })?;
/// ```
pub fn walk<F, E>(routes: &dyn Routes, mut f: F) -> Result<(), E>
where
    F: FnMut(MethodSet, &str, &Middlewares) -> Result<(), E>,
{
    walk_inner(routes, "", &Middlewares::new(), &mut f)
}

fn walk_inner<F, E>(
    routes: &dyn Routes,
    prefix: &str,
    parent: &Middlewares,
    f: &mut F,
) -> Result<(), E>
where
    F: FnMut(MethodSet, &str, &Middlewares) -> Result<(), E>,
{
    let mut stack = parent.clone();
    stack.extend_from(&routes.middlewares());

    for route in routes.routes() {
        let full = format!("{prefix}{}", route.pattern).replace("/*/", "/");

        if let Some(subroutes) = &route.subroutes {
            walk_inner(subroutes.as_ref(), &full, &stack, f)?;
            continue;
        }
        if route.is_mount {
            continue;
        }
        for method in route.methods.methods() {
            f(method, &full, &stack)?;
        }
    }
    Ok(())
}
