use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};
use web_sys::{Document, Element};

use crate::config::{ScrollTarget, SiteConfig};
use crate::message::Launcher;
use crate::selection::{Profile, RouterOutcome, Selection};
use crate::ui::{CollapseTransition, Disclosure, TabState, Theme, bool_attr, section_visible};

use super::{
    WindowLauncher, forms, has_class, on, query_all, query_all_in, scroll_to, set_attr,
    set_class, set_classes, window,
};

const HIDDEN: &str = "hidden";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Wires every interactive region once partials are in the document.
pub struct UiController {
    document: Document,
    config: Rc<SiteConfig>,
    selection: Rc<RefCell<Selection>>,
}

impl UiController {
    pub fn new(document: Document, config: SiteConfig) -> Self {
        let active_tab = document
            .query_selector("[data-variant-toggle].active-tab")
            .ok()
            .flatten()
            .and_then(|tab| tab.get_attribute("data-variant-toggle"));
        let selection = Selection::from_active_tab(active_tab.as_deref());
        Self {
            document,
            config: Rc::new(config),
            selection: Rc::new(RefCell::new(selection)),
        }
    }

    pub fn init(&self) {
        self.wire_theme();
        self.wire_menu();
        self.wire_tabs();
        self.wire_plans();
        self.wire_routers();
        self.wire_quick_send();
        forms::wire_signup(&self.document, &self.config, &self.selection.borrow());
        forms::wire_complaint(&self.document, &self.config);
        self.wire_collapsibles();
        info!(
            profile = %self.selection.borrow().profile(),
            "Interactive layer ready"
        );
    }

    fn wire_theme(&self) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        let toggles = Rc::new(query_all(&self.document, "[data-theme-toggle]"));
        let key = self.config.theme_storage_key.clone();
        let theme = Theme::initial(stored_theme(&key).as_deref(), prefers_dark());
        let current = Rc::new(Cell::new(theme));
        apply_theme(&root, &toggles, &self.config.dark_class, theme);

        for toggle in toggles.iter() {
            let root = root.clone();
            let toggles = Rc::clone(&toggles);
            let current = Rc::clone(&current);
            let config = Rc::clone(&self.config);
            on(toggle, "click", move |_| {
                let next = current.get().toggled();
                current.set(next);
                apply_theme(&root, &toggles, &config.dark_class, next);
                persist_theme(&config.theme_storage_key, next);
            });
        }
    }

    fn wire_menu(&self) {
        let Some(toggle) = self.document.query_selector("[data-menu-toggle]").ok().flatten() else {
            return;
        };
        let Some(menu) = toggle
            .get_attribute("data-menu-target")
            .and_then(|id| self.document.get_element_by_id(&id))
        else {
            return;
        };

        {
            let menu = menu.clone();
            let toggle_ref = toggle.clone();
            on(&toggle, "click", move |_| {
                let next = Disclosure {
                    hidden: has_class(&menu, HIDDEN),
                }
                .toggle();
                set_class(&menu, HIDDEN, next.hidden);
                set_attr(&toggle_ref, "aria-expanded", next.aria_expanded());
            });
        }

        for link in query_all_in(&menu, "a[href^=\"#\"]") {
            let menu = menu.clone();
            let toggle = toggle.clone();
            on(&link, "click", move |_| {
                let current = Disclosure {
                    hidden: has_class(&menu, HIDDEN),
                };
                if let Some(closed) = current.close() {
                    set_class(&menu, HIDDEN, closed.hidden);
                    set_attr(&toggle, "aria-expanded", closed.aria_expanded());
                }
            });
        }
    }

    fn wire_tabs(&self) {
        let buttons = Rc::new(query_all(&self.document, "[data-variant-toggle]"));
        let sections = Rc::new(query_all(&self.document, "[data-variant]"));
        let initial = self.selection.borrow().profile();
        set_variant(&buttons, &sections, &self.selection, initial);

        for button in buttons.iter() {
            let Some(profile) = button
                .get_attribute("data-variant-toggle")
                .as_deref()
                .and_then(Profile::from_key)
            else {
                continue;
            };
            let buttons = Rc::clone(&buttons);
            let sections = Rc::clone(&sections);
            let selection = Rc::clone(&self.selection);
            on(button, "click", move |_| {
                set_variant(&buttons, &sections, &selection, profile);
            });
        }
    }

    fn wire_plans(&self) {
        let buttons = Rc::new(query_all(&self.document, "[data-plan-select]"));
        for button in buttons.iter() {
            let clicked = button.clone();
            let buttons = Rc::clone(&buttons);
            let selection = Rc::clone(&self.selection);
            let config = Rc::clone(&self.config);
            let document = self.document.clone();
            on(button, "click", move |_| {
                let plan = clicked.get_attribute("data-plan-select");
                let target = selection
                    .borrow_mut()
                    .select_plan(plan.as_deref(), &config.plan_scroll);
                highlight_only(&buttons, Some(&clicked), &config.highlight_classes);
                scroll_to(&document, &target);
            });
        }
    }

    fn wire_routers(&self) {
        let buttons = Rc::new(query_all(&self.document, "[data-router-select]"));
        for button in buttons.iter() {
            let clicked = button.clone();
            let buttons = Rc::clone(&buttons);
            let selection = Rc::clone(&self.selection);
            let config = Rc::clone(&self.config);
            let document = self.document.clone();
            on(button, "click", move |_| {
                let router = clicked.get_attribute("data-router-select").unwrap_or_default();
                let outcome = selection.borrow_mut().toggle_router(&router);
                match outcome {
                    RouterOutcome::Ignored => {}
                    RouterOutcome::Cleared => {
                        highlight_only(&buttons, None, &config.highlight_classes);
                    }
                    RouterOutcome::Selected => {
                        highlight_only(&buttons, Some(&clicked), &config.highlight_classes);
                        scroll_to(
                            &document,
                            &ScrollTarget {
                                anchor: config.contact_anchor.clone(),
                                centered: false,
                            },
                        );
                    }
                }
            });
        }
    }

    fn wire_quick_send(&self) {
        for button in query_all(&self.document, "[data-whatsapp-send]") {
            let selection = Rc::clone(&self.selection);
            let config = Rc::clone(&self.config);
            on(&button, "click", move |_| {
                let message = selection.borrow().summary_message();
                WindowLauncher.open(&message.whatsapp_url(&config));
            });
        }
    }

    fn wire_collapsibles(&self) {
        for button in query_all(&self.document, "[data-collapse-toggle]") {
            let Some(section) = button
                .get_attribute("data-collapse-toggle")
                .and_then(|id| self.document.get_element_by_id(&id))
            else {
                continue;
            };
            let arrow = button
                .get_attribute("data-collapse-arrow")
                .and_then(|id| self.document.get_element_by_id(&id));
            let toggle = button.clone();
            on(&button, "click", move |_| {
                let step = CollapseTransition::from_hidden(has_class(&section, HIDDEN));
                set_class(&section, HIDDEN, step.hidden);
                set_class(&section, "fade-in", step.fade_in);
                if let Some(arrow) = &arrow {
                    set_class(arrow, "rotate-180", step.rotate_indicator);
                }
                set_attr(&toggle, "aria-expanded", bool_attr(step.expanded));
            });
        }
    }
}

fn set_variant(
    buttons: &[Element],
    sections: &[Element],
    selection: &RefCell<Selection>,
    profile: Profile,
) {
    for button in buttons {
        let key = button.get_attribute("data-variant-toggle").unwrap_or_default();
        let state = TabState::for_key(&key, profile);
        set_class(button, state.class(), true);
        set_class(button, state.stale_class(), false);
        set_attr(button, "aria-pressed", bool_attr(state.active));
    }
    for section in sections {
        let key = section.get_attribute("data-variant").unwrap_or_default();
        let visible = section_visible(&key, profile);
        set_class(section, HIDDEN, !visible);
        set_attr(section, "aria-hidden", bool_attr(!visible));
    }
    selection.borrow_mut().select_profile(profile);
    debug!(profile = %profile, "Profile tab activated");
}

fn highlight_only(controls: &[Element], chosen: Option<&Element>, classes: &[String]) {
    for control in controls {
        set_classes(control, classes, false);
    }
    if let Some(chosen) = chosen {
        set_classes(chosen, classes, true);
    }
}

fn apply_theme(root: &Element, toggles: &[Element], dark_class: &str, theme: Theme) {
    set_class(root, dark_class, theme.is_dark());
    for toggle in toggles {
        set_attr(toggle, "aria-pressed", bool_attr(theme.is_dark()));
    }
}

fn stored_theme(key: &str) -> Option<String> {
    window()
        .ok()?
        .local_storage()
        .ok()
        .flatten()?
        .get_item(key)
        .ok()
        .flatten()
}

fn persist_theme(key: &str, theme: Theme) {
    let storage = window().ok().and_then(|window| window.local_storage().ok().flatten());
    let Some(storage) = storage else {
        warn!(theme = %theme, "Local storage unavailable, theme not persisted");
        return;
    };
    if storage.set_item(key, theme.as_str()).is_err() {
        warn!(theme = %theme, "Failed to persist theme preference");
    }
}

fn prefers_dark() -> bool {
    window()
        .ok()
        .and_then(|window| window.match_media(DARK_SCHEME_QUERY).ok().flatten())
        .is_some_and(|query| query.matches())
}
