//! # Screens
//!
//! The closed set of navigable screens and how each one maps onto a
//! controller action.
//!
//! ```text
//! list_recipes       → action=list_recipes
//! statistics         → action=statistics
//! admin_calibrate    → action=admin, page=admin_calibrate
//! admin_clean        → action=admin, page=admin_clean
//! ```
//!
//! Every screen in the `admin_` family shares the single `admin` action; the
//! controller picks the sub-screen from the `page` parameter.

use std::fmt;

use crate::client::{ActionRequest, Scalar};

pub const ADMIN_PREFIX: &str = "admin_";
pub const ADMIN_ACTION: &str = "admin";
pub const PAGE_KEY: &str = "page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    ListRecipes,
    Edit,
    SingleIngredient,
    Statistics,
    AdminOverview,
    AdminClean,
    AdminEditPorts,
    AdminCalibrate,
    AdminSystem,
    AdminRemoveRecipe,
}

impl ScreenId {
    pub const ALL: [ScreenId; 10] = [
        ScreenId::ListRecipes,
        ScreenId::Edit,
        ScreenId::SingleIngredient,
        ScreenId::Statistics,
        ScreenId::AdminOverview,
        ScreenId::AdminClean,
        ScreenId::AdminEditPorts,
        ScreenId::AdminCalibrate,
        ScreenId::AdminSystem,
        ScreenId::AdminRemoveRecipe,
    ];

    /// Screens reachable from the menu bar.
    pub const MENU: [ScreenId; 4] = [
        ScreenId::ListRecipes,
        ScreenId::SingleIngredient,
        ScreenId::Statistics,
        ScreenId::AdminOverview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScreenId::ListRecipes => "list_recipes",
            ScreenId::Edit => "edit",
            ScreenId::SingleIngredient => "single_ingredient",
            ScreenId::Statistics => "statistics",
            ScreenId::AdminOverview => "admin_overview",
            ScreenId::AdminClean => "admin_clean",
            ScreenId::AdminEditPorts => "admin_edit_ports",
            ScreenId::AdminCalibrate => "admin_calibrate",
            ScreenId::AdminSystem => "admin_system",
            ScreenId::AdminRemoveRecipe => "admin_remove_recipe",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.name() == name)
    }

    pub fn title(self) -> &'static str {
        match self {
            ScreenId::ListRecipes => "Recipes",
            ScreenId::Edit => "Edit recipe",
            ScreenId::SingleIngredient => "Single ingredient",
            ScreenId::Statistics => "Statistics",
            ScreenId::AdminOverview => "Admin",
            ScreenId::AdminClean => "Cleaning",
            ScreenId::AdminEditPorts => "Ports",
            ScreenId::AdminCalibrate => "Calibration",
            ScreenId::AdminSystem => "System",
            ScreenId::AdminRemoveRecipe => "Remove recipe",
        }
    }

    pub fn is_admin(self) -> bool {
        self.name().starts_with(ADMIN_PREFIX)
    }

    /// Controller action used to load this screen.
    pub fn action(self) -> &'static str {
        if self.is_admin() {
            ADMIN_ACTION
        } else {
            self.name()
        }
    }

    /// Builds the load request. `params` are applied last, so they may
    /// override anything, `action` included.
    pub fn request(self, params: &[(String, Scalar)]) -> ActionRequest {
        let mut request = ActionRequest::new(self.action());
        if self.is_admin() {
            request.set(PAGE_KEY, self.name());
        }
        request.merge(params)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What the console currently considers "the" screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrentScreen {
    /// Nothing loaded yet.
    #[default]
    Empty,
    Screen(ScreenId),
    /// The appliance controller is unreachable.
    ServerError,
}

impl CurrentScreen {
    pub fn screen(self) -> Option<ScreenId> {
        match self {
            CurrentScreen::Screen(screen) => Some(screen),
            _ => None,
        }
    }
}

/// Navigator state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavPhase {
    #[default]
    Idle,
    Loading(ScreenId),
    Rendered(ScreenId),
    Error,
}
