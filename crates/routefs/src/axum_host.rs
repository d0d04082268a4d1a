// File: src/axum_host.rs
// Purpose: Registers discovered routes on an axum Router

use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    routing::MethodRouter,
    Router,
};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::host::{Middleware, RouteHost};

pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Pre-handler middleware for a route module
///
/// # Examples
///
/// ```
/// use axum::{extract::Request, http::StatusCode, middleware::Next, response::IntoResponse};
/// use routefs::RouteMiddleware;
///
/// let require_auth = RouteMiddleware::new(|req: Request, next: Next| async move {
///     if req.headers().contains_key("authorization") {
///         next.run(req).await
///     } else {
///         StatusCode::UNAUTHORIZED.into_response()
///     }
/// });
/// ```
#[derive(Clone)]
pub struct RouteMiddleware(Arc<dyn Fn(Request, Next) -> BoxFuture + Send + Sync>);

impl RouteMiddleware {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self(Arc::new(move |req, next| Box::pin(f(req, next))))
    }

    pub fn call(&self, req: Request, next: Next) -> BoxFuture {
        (self.0)(req, next)
    }
}

impl fmt::Debug for RouteMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RouteMiddleware(..)")
    }
}

/// Host wrapping an axum [`Router`]
///
/// File names become axum path syntax as they are, so `users/:id.js` serves
/// `/users/:id`. axum panics on a route that overlaps an existing one or is
/// malformed, so such routes are dropped with a warning instead:
///
/// - a route equal to a registered one once parameter names are ignored
///   (`/users/:id` then `/users/:name`)
/// - a route whose parameter at some position has a different name than a
///   registered route with the same prefix (`/users/:id/posts` then
///   `/users/:uid/comments`)
/// - a catch-all beside any other segment at the same position
///   (`/files/*path` then `/files/readme`)
/// - a `:` or `*` that does not start a segment, an unnamed parameter, or a
///   catch-all that is not the last segment
///
/// The first registration of a route keeps its handler. Routes already
/// present on a router passed to [`from_router`](Self::from_router) are not
/// tracked.
pub struct AxumHost<S = ()> {
    router: Router<S>,
    routes: Vec<String>,
}

impl<S> AxumHost<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::from_router(Router::new())
    }

    /// Register routes onto an existing router
    pub fn from_router(router: Router<S>) -> Self {
        Self {
            router,
            routes: Vec::new(),
        }
    }

    /// List registered routes in registration order
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    pub fn into_router(self) -> Router<S> {
        self.router
    }
}

impl<S> Default for AxumHost<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RouteHost for AxumHost<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Handler = MethodRouter<S>;
    type Middleware = RouteMiddleware;

    fn register(
        &mut self,
        route: &str,
        middleware: Middleware<RouteMiddleware>,
        handler: MethodRouter<S>,
    ) {
        let Some(segments) = parse_route(route) else {
            warn!("Route {} is not a valid axum path, skipping", route);
            return;
        };
        if let Some(existing) = self
            .routes
            .iter()
            .find(|existing| parse_route(existing).is_some_and(|other| overlaps(&other, &segments)))
        {
            warn!(
                "Route {} conflicts with registered route {}, keeping the first handler",
                route, existing
            );
            return;
        }

        let handler = match middleware {
            Middleware::Passthrough => handler,
            Middleware::Custom(middleware) => {
                handler.layer(from_fn(move |req: Request, next: Next| middleware.call(req, next)))
            }
        };

        let router = std::mem::replace(&mut self.router, Router::new());
        self.router = router.route(route, handler);
        self.routes.push(route.to_string());
        debug!("Mounted {} on axum router", route);
    }
}

/// One `/`-separated piece of an axum path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Static(&'a str),
    /// `:name`
    Param(&'a str),
    /// `*name`, only valid as the last segment
    CatchAll(&'a str),
}

/// Split `route` into segments, or `None` if axum would reject it
fn parse_route(route: &str) -> Option<Vec<Segment<'_>>> {
    let pieces: Vec<&str> = route.strip_prefix('/')?.split('/').collect();
    let last = pieces.len() - 1;

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| {
            let segment = match piece.chars().next() {
                Some(':') => Segment::Param(&piece[1..]),
                Some('*') if i == last => Segment::CatchAll(&piece[1..]),
                Some('*') => return None,
                _ => Segment::Static(piece),
            };
            match segment {
                Segment::Param(name) | Segment::CatchAll(name)
                    if name.is_empty() || name.contains([':', '*']) =>
                {
                    None
                }
                Segment::Static(text) if text.contains([':', '*']) => None,
                segment => Some(segment),
            }
        })
        .collect()
}

/// Whether axum would refuse to hold both routes in one router
///
/// Static segments may sit beside a parameter at the same position. A
/// catch-all must be alone at its position, and two parameters at the same
/// position must share a name.
fn overlaps(a: &[Segment<'_>], b: &[Segment<'_>]) -> bool {
    for (left, right) in a.iter().zip(b) {
        match (left, right) {
            (x, y) if x == y => continue,
            (Segment::CatchAll(_), _) | (_, Segment::CatchAll(_)) => return true,
            (Segment::Static(_), _) | (_, Segment::Static(_)) => return false,
            (Segment::Param(_), Segment::Param(_)) => return true,
        }
    }

    a.len() == b.len()
}
