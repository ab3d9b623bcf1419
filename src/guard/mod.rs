//! Auth redirect guard.
//!
//! Keeps signed-out users off protected pages and signed-in users off the
//! login-type pages. Navigation goes through an injected [`Navigator`] and
//! always replaces the current history entry.

use tokio::sync::watch;

use crate::api::routes;
use crate::session::SessionState;
use crate::types::UserId;

/// Navigation capability supplied by the host
pub trait Navigator {
    /// Go to `route`, replacing the current history entry
    fn replace(&mut self, route: &str);
}

/// Records every navigation, in order
impl Navigator for Vec<String> {
    fn replace(&mut self, route: &str) {
        self.push(route.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    ToLogin,
    ToHome,
}

/// Where each redirect lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardRoutes {
    pub login: &'static str,
    pub home: &'static str,
    /// Pages where a signed-in session is sent home
    pub login_pages: &'static [&'static str],
    /// Watch the admin slot of the session instead of the user slot
    pub admin: bool,
}

impl GuardRoutes {
    pub const USER: GuardRoutes = GuardRoutes {
        login: routes::auth::LOGIN,
        home: routes::user::HOME,
        login_pages: routes::auth::LOGIN_PAGES,
        admin: false,
    };

    pub const ADMIN: GuardRoutes = GuardRoutes {
        login: routes::admin::LOGIN,
        home: routes::admin::DASHBOARD,
        login_pages: routes::admin::LOGIN_PAGES,
        admin: true,
    };

    pub fn target(&self, redirect: Redirect) -> &'static str {
        match redirect {
            Redirect::ToLogin => self.login,
            Redirect::ToHome => self.home,
        }
    }

    pub fn is_login_page(&self, path: &str) -> bool {
        routes::is_one_of(path, self.login_pages)
    }

    /// The signed-in identity this guard cares about
    pub fn subject<'a>(&self, state: &'a SessionState) -> Option<&'a UserId> {
        if self.admin {
            state.admin_id()
        } else {
            state.user_id()
        }
    }
}

impl Default for GuardRoutes {
    fn default() -> Self {
        Self::USER
    }
}

/// Redirect owed for a (user, page) state, if any
pub fn decide(user_id: Option<&UserId>, is_login_page: bool) -> Option<Redirect> {
    match (user_id.is_some(), is_login_page) {
        (false, false) => Some(Redirect::ToLogin),
        (true, true) => Some(Redirect::ToHome),
        _ => None,
    }
}

pub struct RouteGuard<N: Navigator> {
    navigator: N,
    routes: GuardRoutes,
    last: Option<(Option<UserId>, bool)>,
}

impl<N: Navigator> RouteGuard<N> {
    pub fn new(navigator: N) -> Self {
        Self::with_routes(navigator, GuardRoutes::default())
    }

    pub fn with_routes(navigator: N, routes: GuardRoutes) -> Self {
        Self {
            navigator,
            routes,
            last: None,
        }
    }

    /// Evaluate the guard for the current state. Re-evaluating a state that
    /// has not changed since the previous call never navigates again.
    pub fn evaluate(&mut self, user_id: Option<&UserId>, is_login_page: bool) -> Option<Redirect> {
        let state = (user_id.cloned(), is_login_page);
        if self.last.as_ref() == Some(&state) {
            return None;
        }
        self.last = Some(state);

        let redirect = decide(user_id, is_login_page)?;
        let target = self.routes.target(redirect);
        tracing::debug!(?redirect, route = target, "route guard redirect");
        self.navigator.replace(target);
        Some(redirect)
    }

    /// Evaluate for a page path, classified against this guard's own login pages
    pub fn evaluate_path(&mut self, user_id: Option<&UserId>, path: &str) -> Option<Redirect> {
        let is_login_page = self.routes.is_login_page(path);
        self.evaluate(user_id, is_login_page)
    }

    /// Evaluate now and again on every session change, until every handle to
    /// the session store is gone. Returns the navigator.
    pub async fn follow(mut self, mut session: watch::Receiver<SessionState>, is_login_page: bool) -> N {
        loop {
            let user_id = self.routes.subject(&session.borrow_and_update()).cloned();
            self.evaluate(user_id.as_ref(), is_login_page);

            if session.changed().await.is_err() {
                break;
            }
        }
        self.navigator
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_navigator(self) -> N {
        self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::session::SessionStore;
    use tokio::sync::mpsc;

    struct ChannelNavigator(mpsc::UnboundedSender<String>);

    impl Navigator for ChannelNavigator {
        fn replace(&mut self, route: &str) {
            let _ = self.0.send(route.to_string());
        }
    }

    fn user(id: &str) -> User {
        User {
            id: UserId::new(id),
            name: id.to_string(),
            email: format!("{}@example.com", id),
            image: None,
        }
    }

    #[test]
    fn decisions() {
        let id = UserId::new("u1");
        assert_eq!(decide(None, false), Some(Redirect::ToLogin));
        assert_eq!(decide(Some(&id), true), Some(Redirect::ToHome));
        assert_eq!(decide(None, true), None);
        assert_eq!(decide(Some(&id), false), None);
    }

    #[test]
    fn signed_out_redirects_to_login_once_per_change() {
        let mut guard = RouteGuard::new(Vec::new());

        assert_eq!(guard.evaluate(None, false), Some(Redirect::ToLogin));
        assert_eq!(guard.evaluate(None, false), None);
        assert_eq!(guard.navigator(), &vec![routes::auth::LOGIN.to_string()]);

        let id = UserId::new("u1");
        assert_eq!(guard.evaluate(Some(&id), false), None);
        assert_eq!(guard.evaluate(None, false), Some(Redirect::ToLogin));
        assert_eq!(guard.into_navigator().len(), 2);
    }

    #[test]
    fn signed_in_on_login_page_goes_home() {
        let mut guard = RouteGuard::new(Vec::new());
        let id = UserId::new("u1");

        assert_eq!(guard.evaluate(Some(&id), true), Some(Redirect::ToHome));
        assert_eq!(guard.navigator(), &vec![routes::user::HOME.to_string()]);
    }

    #[test]
    fn admin_routes() {
        let mut guard = RouteGuard::with_routes(Vec::new(), GuardRoutes::ADMIN);
        guard.evaluate(None, false);
        assert_eq!(guard.navigator(), &vec!["/admin/login".to_string()]);
    }

    #[test]
    fn each_area_only_knows_its_own_login_pages() {
        let id = UserId::new("u1");

        let mut user_guard = RouteGuard::with_routes(Vec::new(), GuardRoutes::USER);
        assert_eq!(user_guard.evaluate_path(Some(&id), routes::admin::LOGIN), None);
        assert_eq!(user_guard.evaluate_path(Some(&id), "/login?next=%2Fhome"), Some(Redirect::ToHome));
        assert_eq!(user_guard.into_navigator(), vec![routes::user::HOME.to_string()]);

        let mut admin_guard = RouteGuard::with_routes(Vec::new(), GuardRoutes::ADMIN);
        assert_eq!(admin_guard.evaluate_path(Some(&id), routes::auth::LOGIN), None);
        assert_eq!(admin_guard.evaluate_path(Some(&id), routes::admin::LOGIN), Some(Redirect::ToHome));
        assert_eq!(admin_guard.into_navigator(), vec![routes::admin::DASHBOARD.to_string()]);
    }

    #[test]
    fn subject_follows_the_slot() {
        let state = SessionState {
            user: Some(user("u1")),
            admin: None,
        };
        assert_eq!(GuardRoutes::USER.subject(&state), Some(&UserId::new("u1")));
        assert_eq!(GuardRoutes::ADMIN.subject(&state), None);
    }

    #[tokio::test]
    async fn follows_session_changes() {
        let store = SessionStore::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let guard = RouteGuard::new(ChannelNavigator(tx));
        let task = tokio::spawn(guard.follow(store.subscribe(), true));

        store.sign_in(user("u1"));
        assert_eq!(rx.recv().await.as_deref(), Some(routes::user::HOME));

        store.sign_out();
        store.sign_in(user("u2"));
        assert_eq!(rx.recv().await.as_deref(), Some(routes::user::HOME));

        // Admin sign-in does not touch the user guard
        store.admin_sign_in(user("root"));

        drop(store);
        task.await.unwrap();
        assert!(rx.try_recv().is_err());
    }
}
