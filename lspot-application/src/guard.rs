//! Access gate for navigation. The UI asks before entering a route; the
//! answer depends only on the (ready) session state and the route's
//! requirements.

use lspot_core::gateways::auth::AuthGateway;

use crate::{session::SessionStore, Db};

/// Access requirements of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
    /// Set on the one-time admin bootstrap route. Deliberately not enforced
    /// by the gate; the backend rejects a second admin anyway.
    pub requires_first_admin: bool,
}

/// Where the navigation should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Proceed,
    RedirectHome,
}

const AUTH: RouteMeta = RouteMeta {
    requires_auth: true,
    requires_admin: false,
    requires_first_admin: false,
};

const PUBLIC: RouteMeta = RouteMeta {
    requires_auth: false,
    requires_admin: false,
    requires_first_admin: false,
};

/// The requirements of a concrete path. Unknown paths are public.
pub fn route_meta(path: &str) -> RouteMeta {
    match path {
        "/" | "/auth/callback" => PUBLIC,
        "/dashboard" | "/add-location" => AUTH,
        "/admin" => RouteMeta {
            requires_auth: true,
            requires_admin: true,
            requires_first_admin: false,
        },
        "/admin/setup" => RouteMeta {
            requires_auth: true,
            requires_admin: false,
            requires_first_admin: true,
        },
        _ if path.starts_with("/location/") || path.starts_with("/invite/") => PUBLIC,
        _ => PUBLIC,
    }
}

/// Decides whether a navigation may proceed.
///
/// Blocks until the session store has finished initializing, so a page load
/// into a guarded route cannot slip past the gate while the persisted
/// session is still being restored.
pub fn before_navigation<A, D>(session: &SessionStore<A, D>, meta: RouteMeta) -> NavOutcome
where
    A: AuthGateway + Send + Sync + 'static,
    D: Db + Send + Sync + 'static,
{
    session.wait_until_ready();
    if meta.requires_auth && !session.is_logged_in() {
        return NavOutcome::RedirectHome;
    }
    if meta.requires_admin && !session.is_admin() {
        return NavOutcome::RedirectHome;
    }
    NavOutcome::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_routes() {
        assert!(route_meta("/dashboard").requires_auth);
        assert!(route_meta("/add-location").requires_auth);
        assert!(route_meta("/admin").requires_admin);
        assert!(route_meta("/admin/setup").requires_first_admin);
        assert_eq!(route_meta("/"), PUBLIC);
        assert_eq!(route_meta("/auth/callback"), PUBLIC);
        assert_eq!(route_meta("/location/abc123"), PUBLIC);
        assert_eq!(route_meta("/invite/xyz"), PUBLIC);
        assert_eq!(route_meta("/no/such/route"), PUBLIC);
    }
}
