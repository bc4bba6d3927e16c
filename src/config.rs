use serde::Deserialize;

use crate::error::Result;
use crate::selection::Profile;

/// Where the page scrolls after a plan button is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PlanScrollPolicy {
    /// Commercial visitors land on the router card, residential ones on the
    /// generic solutions section.
    ByProfile {
        comercial: String,
        residencial: String,
    },
    Fixed { anchor: String },
}

impl Default for PlanScrollPolicy {
    fn default() -> Self {
        PlanScrollPolicy::ByProfile {
            comercial: "mikrotik-card".to_string(),
            residencial: "solucao".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    pub anchor: String,
    pub centered: bool,
}

impl PlanScrollPolicy {
    pub fn target_for(&self, profile: Profile) -> ScrollTarget {
        match (self, profile) {
            (PlanScrollPolicy::ByProfile { comercial, .. }, Profile::Comercial) => ScrollTarget {
                anchor: comercial.clone(),
                centered: true,
            },
            (PlanScrollPolicy::ByProfile { residencial, .. }, Profile::Residencial) => {
                ScrollTarget {
                    anchor: residencial.clone(),
                    centered: false,
                }
            }
            (PlanScrollPolicy::Fixed { anchor }, _) => ScrollTarget {
                anchor: anchor.clone(),
                centered: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub whatsapp_number: String,
    pub whatsapp_base_url: String,
    pub cache_buster: String,
    pub theme_storage_key: String,
    pub dark_class: String,
    pub highlight_classes: Vec<String>,
    pub contact_anchor: String,
    pub plan_scroll: PlanScrollPolicy,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "557799390980".to_string(),
            whatsapp_base_url: "https://wa.me/".to_string(),
            cache_buster: "v=2".to_string(),
            theme_storage_key: "theme".to_string(),
            dark_class: "dark".to_string(),
            highlight_classes: vec!["ring-2".to_string(), "ring-brand-primary".to_string()],
            contact_anchor: "contato".to_string(),
            plan_scroll: PlanScrollPolicy::default(),
        }
    }
}

impl SiteConfig {
    /// Parses an override document; keys it leaves out keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn whatsapp_endpoint(&self) -> String {
        format!(
            "{}{}",
            self.whatsapp_base_url,
            self.whatsapp_number.trim_start_matches('+')
        )
    }
}
