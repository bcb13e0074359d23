//! Routes and Access Control
//!
//! Every page declares the roles allowed to see it. The guard turns that declaration plus the
//! current session into a navigation decision.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::auth::{AuthSession, Role};

/// Application pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,

    /// `/menu`
    Menu,

    /// `/signin`
    SignIn,

    /// `/signup`
    SignUp,

    /// `/staff/login`
    StaffLogin,

    /// `/unauthorized`
    Unauthorized,

    /// `/cart`
    Cart,

    /// `/profile`
    Profile,

    /// `/checkout`
    Checkout,

    /// `/my-orders`
    MyOrders,

    /// `/order-bill`
    OrderBill,

    /// `/dashboard`
    Dashboard,

    /// `/menu-management`
    MenuManagement,

    /// `/category-management`
    CategoryManagement,

    /// `/order-management`
    OrderManagement,

    /// `/admin/*`; holds the sub-path without the leading `/admin/`.
    Admin(String),
}

/// Audience a route is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Anyone
    Public,

    /// Signed-in customers
    Customer,

    /// Staff and admins
    Staff,

    /// Admins only
    Admin,
}

impl Access {
    /// Roles allowed through. Empty for public routes, which need no session.
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Public => &[],
            Self::Customer => &[Role::Customer],
            Self::Staff => &[Role::Staff, Role::Admin],
            Self::Admin => &[Role::Admin],
        }
    }

    /// Whether `role` may enter.
    #[must_use]
    pub fn allows(self, role: Role) -> bool {
        self == Self::Public || self.allowed_roles().contains(&role)
    }
}

impl Route {
    /// Path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Menu => "/menu".to_string(),
            Self::SignIn => "/signin".to_string(),
            Self::SignUp => "/signup".to_string(),
            Self::StaffLogin => "/staff/login".to_string(),
            Self::Unauthorized => "/unauthorized".to_string(),
            Self::Cart => "/cart".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Checkout => "/checkout".to_string(),
            Self::MyOrders => "/my-orders".to_string(),
            Self::OrderBill => "/order-bill".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::MenuManagement => "/menu-management".to_string(),
            Self::CategoryManagement => "/category-management".to_string(),
            Self::OrderManagement => "/order-management".to_string(),
            Self::Admin(sub) if sub.is_empty() => "/admin".to_string(),
            Self::Admin(sub) => format!("/admin/{sub}"),
        }
    }

    /// Audience this route is restricted to.
    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::Home
            | Self::Menu
            | Self::SignIn
            | Self::SignUp
            | Self::StaffLogin
            | Self::Unauthorized => Access::Public,
            Self::Cart | Self::Profile | Self::Checkout | Self::MyOrders | Self::OrderBill => {
                Access::Customer
            }
            Self::Dashboard
            | Self::MenuManagement
            | Self::CategoryManagement
            | Self::OrderManagement => Access::Staff,
            Self::Admin(_) => Access::Admin,
        }
    }

    /// Login page for this route's audience.
    #[must_use]
    pub fn login_route(&self) -> Self {
        match self.access() {
            Access::Public | Access::Customer => Self::SignIn,
            Access::Staff | Access::Admin => Self::StaffLogin,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Path that matches no route.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no route matches {0}")]
pub struct UnknownRoute(String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        let route = match trimmed {
            "" => Self::Home,
            "/menu" => Self::Menu,
            "/signin" => Self::SignIn,
            "/signup" => Self::SignUp,
            "/staff/login" => Self::StaffLogin,
            "/unauthorized" => Self::Unauthorized,
            "/cart" => Self::Cart,
            "/profile" => Self::Profile,
            "/checkout" => Self::Checkout,
            "/my-orders" => Self::MyOrders,
            "/order-bill" => Self::OrderBill,
            "/dashboard" => Self::Dashboard,
            "/menu-management" => Self::MenuManagement,
            "/category-management" => Self::CategoryManagement,
            "/order-management" => Self::OrderManagement,
            "/admin" => Self::Admin(String::new()),
            other => match other.strip_prefix("/admin/") {
                Some(sub) => Self::Admin(sub.to_string()),
                None => return Err(UnknownRoute(path.to_string())),
            },
        };

        Ok(route)
    }
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the route.
    Allow,

    /// Send the visitor to `login`, then back to `return_to`.
    SignIn {
        /// Login page for the route's audience
        login: Route,

        /// Originally requested route
        return_to: Route,
    },

    /// Signed in with the wrong role.
    Unauthorized,
}

impl GuardDecision {
    /// Where the visitor ends up.
    #[must_use]
    pub fn destination(&self, requested: &Route) -> Route {
        match self {
            Self::Allow => requested.clone(),
            Self::SignIn { login, .. } => login.clone(),
            Self::Unauthorized => Route::Unauthorized,
        }
    }
}

/// Decide whether `session` may view `route`.
#[must_use]
pub fn guard(route: &Route, session: &AuthSession) -> GuardDecision {
    let access = route.access();

    if access == Access::Public {
        return GuardDecision::Allow;
    }

    match session.role() {
        Some(role) if session.is_authenticated() => {
            if access.allows(role) {
                GuardDecision::Allow
            } else {
                GuardDecision::Unauthorized
            }
        }
        _ => GuardDecision::SignIn {
            login: route.login_route(),
            return_to: route.clone(),
        },
    }
}

/// Login page to send a caller to after the backend rejects their token.
#[must_use]
pub fn sign_in_route_for(role: Option<Role>) -> Route {
    match role {
        Some(role) if role.is_back_office() => Route::StaffLogin,
        _ => Route::SignIn,
    }
}
