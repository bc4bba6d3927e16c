//! Interactive layer of the provider's marketing site.
//!
//! The pure modules (`selection`, `ui`, `format`, `pppoe`, `forms`, `message`,
//! `partials`) hold every decision and run natively under test. The `dom`
//! module, compiled only for `wasm32`, reads the live document and applies
//! what they decide.

pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod message;
pub mod partials;
pub mod pppoe;
pub mod selection;
pub mod telemetry;
pub mod ui;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use config::{PlanScrollPolicy, ScrollTarget, SiteConfig};
pub use error::SiteError;
pub use forms::{ComplaintForm, ContactForm, FieldId, SignupForm, Violation};
pub use message::{Launcher, OutboundMessage};
pub use pppoe::derive_login;
pub use selection::{NO_ROUTER, Profile, RouterOutcome, Selection};
pub use ui::Theme;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use tracing::error;
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        crate::telemetry::init();
        if let Err(err) = crate::dom::boot() {
            error!(error = %err, "Site boot failed");
        }
    }
}
