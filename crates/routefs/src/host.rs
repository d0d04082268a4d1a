// File: src/host.rs
// Purpose: Host application interface that discovered routes are registered with

/// Middleware to run before a route's handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Middleware<M> {
    /// Continue straight to the handler
    Passthrough,
    /// The route module's own pre-handler
    Custom(M),
}

impl<M> Middleware<M> {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Middleware::Passthrough)
    }

    /// Get the custom middleware, if any
    pub fn custom(&self) -> Option<&M> {
        match self {
            Middleware::Passthrough => None,
            Middleware::Custom(middleware) => Some(middleware),
        }
    }
}

impl<M> From<Option<M>> for Middleware<M> {
    fn from(middleware: Option<M>) -> Self {
        middleware.map_or(Middleware::Passthrough, Middleware::Custom)
    }
}

/// A web application that accepts route registrations
///
/// Requests matching `route` go to `middleware` first, then to `handler`.
/// Registration order is discovery order; how a host resolves overlapping
/// routes is up to the host.
pub trait RouteHost {
    type Handler;
    type Middleware;

    fn register(
        &mut self,
        route: &str,
        middleware: Middleware<Self::Middleware>,
        handler: Self::Handler,
    );
}

/// A single recorded registration
#[derive(Debug, Clone, PartialEq)]
pub struct Registration<H, M> {
    pub route: String,
    pub middleware: Middleware<M>,
    pub handler: H,
}

/// Host that records registrations in order
///
/// Useful for inspecting what a load would register, and as the host of a
/// custom dispatcher.
#[derive(Debug, Clone)]
pub struct RouteTable<H, M> {
    registrations: Vec<Registration<H, M>>,
}

impl<H, M> RouteTable<H, M> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Get all registrations in registration order
    pub fn registrations(&self) -> &[Registration<H, M>] {
        &self.registrations
    }

    /// First registration for `route`
    pub fn get(&self, route: &str) -> Option<&Registration<H, M>> {
        self.registrations.iter().find(|r| r.route == route)
    }

    /// List registered routes in registration order
    pub fn routes(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.route.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<H, M> Default for RouteTable<H, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, M> RouteHost for RouteTable<H, M> {
    type Handler = H;
    type Middleware = M;

    fn register(&mut self, route: &str, middleware: Middleware<M>, handler: H) {
        self.registrations.push(Registration {
            route: route.to_string(),
            middleware,
            handler,
        });
    }
}

impl<H, M> IntoIterator for RouteTable<H, M> {
    type Item = Registration<H, M>;
    type IntoIter = std::vec::IntoIter<Registration<H, M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.registrations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middleware_from_option() {
        assert_eq!(Middleware::from(Some(1)), Middleware::Custom(1));
        assert_eq!(Middleware::<i32>::from(None), Middleware::Passthrough);
        assert!(Middleware::<i32>::Passthrough.is_passthrough());
        assert_eq!(Middleware::Custom(7).custom(), Some(&7));
    }

    #[test]
    fn test_route_table_keeps_order_and_duplicates() {
        let mut table: RouteTable<&str, &str> = RouteTable::new();
        table.register("/users", Middleware::Passthrough, "first");
        table.register("/", Middleware::Custom("auth"), "home");
        table.register("/users", Middleware::Passthrough, "second");

        assert_eq!(table.routes(), vec!["/users", "/", "/users"]);
        assert_eq!(table.get("/users").unwrap().handler, "first");
        assert_eq!(table.len(), 3);
    }
}
