//! Routes
//!
//! Client-side pages and the navigation header. The header links to `/vans`,
//! which has no page behind it.

use std::fmt;

/// A page the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` product list
    Products,

    /// `/add-product`
    AddProduct,

    /// `/deliveries` delivery list
    Deliveries,

    /// `/add-delivery`
    AddDelivery,
}

impl Route {
    /// Every routed page.
    pub const ALL: [Route; 4] = [
        Route::Products,
        Route::AddProduct,
        Route::Deliveries,
        Route::AddDelivery,
    ];

    /// Path of this page.
    pub fn path(self) -> &'static str {
        match self {
            Route::Products => "/",
            Route::AddProduct => "/add-product",
            Route::Deliveries => "/deliveries",
            Route::AddDelivery => "/add-delivery",
        }
    }

    /// Page for an exact path, if one is routed.
    pub fn resolve(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One link in the navigation header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    /// Element id
    pub id: &'static str,

    /// Link text
    pub label: &'static str,

    /// Link target
    pub path: &'static str,
}

impl NavEntry {
    /// Whether this entry is highlighted while `current_path` is shown.
    pub fn is_active(&self, current_path: &str) -> bool {
        self.path == current_path
    }

    /// Page this entry leads to, or `None` for a dead link.
    pub fn route(&self) -> Option<Route> {
        Route::resolve(self.path)
    }
}

/// Application title shown in the header.
pub const APP_TITLE: &str = "købmandsapp.io";

/// Navigation header links, in display order.
pub const NAV_ENTRIES: [NavEntry; 3] = [
    NavEntry {
        id: "nav-product-page",
        label: "Products",
        path: "/",
    },
    NavEntry {
        id: "nav-deliveries",
        label: "Deliveries",
        path: "/deliveries",
    },
    NavEntry {
        id: "nav-vans",
        label: "Vans",
        path: "/vans",
    },
];
