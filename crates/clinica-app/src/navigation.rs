use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use clinica_core::routes::{self, Route};

use crate::error::AppError;

/// Extra data carried along with a navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    pub patient_name: Option<String>,
}

impl NavState {
    pub fn patient(name: impl Into<String>) -> Self {
        Self {
            patient_name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub state: Option<NavState>,
}

/// Current location, observable by the shell.
#[derive(Debug)]
pub struct Navigator {
    tx: watch::Sender<Location>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Location {
            route: Route::Root,
            state: None,
        });
        Self { tx }
    }

    /// Move to `requested`, applying the authentication guard. Returns the
    /// route actually shown. A redirect drops the state payload.
    pub fn navigate(&self, requested: Route, state: Option<NavState>, authenticated: bool) -> Route {
        let route = routes::guard(requested, authenticated);
        let state = if route == requested { state } else { None };
        debug!(requested = %requested.path(), shown = %route.path(), "navigate");
        self.tx.send_replace(Location { route, state });
        route
    }

    pub fn navigate_path(
        &self,
        path: &str,
        state: Option<NavState>,
        authenticated: bool,
    ) -> Result<Route, AppError> {
        let requested = Route::parse(path)?;
        Ok(self.navigate(requested, state, authenticated))
    }

    pub fn current(&self) -> Location {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Location> {
        self.tx.subscribe()
    }
}
