use std::fmt;

use crate::config::{PlanScrollPolicy, ScrollTarget};
use crate::message::{NOT_INFORMED, OutboundMessage};

pub const NO_ROUTER: &str = "Sem roteador";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Profile {
    #[default]
    Residencial,
    Comercial,
}

impl Profile {
    pub const ALL: [Profile; 2] = [Profile::Residencial, Profile::Comercial];

    /// Parses the key used by `data-variant-toggle` / `data-variant`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "residencial" => Some(Profile::Residencial),
            "comercial" => Some(Profile::Comercial),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Profile::Residencial => "residencial",
            Profile::Comercial => "comercial",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Profile::Residencial => "Residencial",
            Profile::Comercial => "Comercial",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterOutcome {
    /// The clicked router was already selected; selection and highlights are cleared.
    Cleared,
    /// A new router is selected; highlight it and scroll to the contact section.
    Selected,
    /// The control carried no router label.
    Ignored,
}

/// The visitor's profile/plan/router choices for the current page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    profile: Profile,
    plan: Option<String>,
    router: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

impl Selection {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            plan: None,
            router: NO_ROUTER.to_string(),
        }
    }

    /// Builds the initial selection from the key of the tab marked active in
    /// markup, if any.
    pub fn from_active_tab(key: Option<&str>) -> Self {
        Self::new(key.and_then(Profile::from_key).unwrap_or_default())
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    pub fn router(&self) -> &str {
        &self.router
    }

    pub fn has_router(&self) -> bool {
        self.router != NO_ROUTER
    }

    pub fn select_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    /// Records the plan (when the control names one) and returns where the page
    /// should scroll. The highlight moves to the clicked control either way.
    pub fn select_plan(&mut self, plan: Option<&str>, policy: &PlanScrollPolicy) -> ScrollTarget {
        if let Some(plan) = plan.filter(|plan| !plan.is_empty()) {
            self.plan = Some(plan.to_string());
        }
        policy.target_for(self.profile)
    }

    pub fn toggle_router(&mut self, router: &str) -> RouterOutcome {
        if router.is_empty() {
            return RouterOutcome::Ignored;
        }
        if self.router == router {
            self.router = NO_ROUTER.to_string();
            return RouterOutcome::Cleared;
        }
        self.router = router.to_string();
        RouterOutcome::Selected
    }

    /// Short order summary sent by the floating WhatsApp button.
    pub fn summary_message(&self) -> OutboundMessage {
        OutboundMessage::from_lines([
            "👋 Olá! Preciso de suporte.".to_string(),
            String::new(),
            "📌 *Resumo do pedido*".to_string(),
            format!("👤 Perfil: {}", self.profile.label()),
            format!("📶 Plano: {}", self.plan().unwrap_or(NOT_INFORMED)),
            format!("📡 Roteador: {}", self.router),
        ])
    }
}
