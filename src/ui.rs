use std::fmt;

use crate::selection::Profile;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// A stored preference wins; otherwise follow the environment's color scheme.
    pub fn initial(stored: Option<&str>, prefers_dark: bool) -> Self {
        stored.and_then(Theme::from_stored).unwrap_or(if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        })
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual state of one profile tab control.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TabState {
    pub active: bool,
}

impl TabState {
    pub fn for_key(key: &str, active: Profile) -> Self {
        Self {
            active: key == active.key(),
        }
    }

    pub fn class(self) -> &'static str {
        if self.active { "active-tab" } else { "inactive-tab" }
    }

    pub fn stale_class(self) -> &'static str {
        if self.active { "inactive-tab" } else { "active-tab" }
    }
}

/// Whether the content section tagged `key` is shown for `active`.
pub fn section_visible(key: &str, active: Profile) -> bool {
    key == active.key()
}

/// A hide/show toggle such as the navigation menu.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Disclosure {
    pub hidden: bool,
}

impl Disclosure {
    pub fn toggle(self) -> Self {
        Self {
            hidden: !self.hidden,
        }
    }

    /// Closing is a no-op when already hidden.
    pub fn close(self) -> Option<Self> {
        if self.hidden {
            None
        } else {
            Some(Self { hidden: true })
        }
    }

    pub fn aria_expanded(self) -> &'static str {
        bool_attr(!self.hidden)
    }
}

/// Class and attribute changes for one click on a collapsible section toggle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CollapseTransition {
    pub hidden: bool,
    pub fade_in: bool,
    pub rotate_indicator: bool,
    pub expanded: bool,
}

impl CollapseTransition {
    pub fn from_hidden(was_hidden: bool) -> Self {
        Self {
            hidden: !was_hidden,
            fade_in: was_hidden,
            rotate_indicator: was_hidden,
            expanded: was_hidden,
        }
    }
}

pub fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_theme_beats_environment() {
        assert_eq!(Theme::initial(Some("light"), true), Theme::Light);
        assert_eq!(Theme::initial(Some("dark"), false), Theme::Dark);
        assert_eq!(Theme::initial(None, true), Theme::Dark);
        assert_eq!(Theme::initial(Some("sepia"), false), Theme::Light);
    }

    #[test]
    fn theme_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn exactly_one_section_visible_per_tab() {
        let sections = ["residencial", "comercial"];
        for active in Profile::ALL {
            let visible = sections
                .iter()
                .filter(|key| section_visible(key, active))
                .count();
            assert_eq!(visible, 1, "{active} should show exactly one section");
            let tabs: Vec<_> = sections
                .iter()
                .map(|key| TabState::for_key(key, active))
                .collect();
            assert_eq!(tabs.iter().filter(|tab| tab.active).count(), 1);
        }
    }

    #[test]
    fn tab_classes_swap() {
        let on = TabState { active: true };
        assert_eq!(on.class(), "active-tab");
        assert_eq!(on.stale_class(), "inactive-tab");
        let off = TabState { active: false };
        assert_eq!(off.class(), "inactive-tab");
    }

    #[test]
    fn menu_close_only_when_open() {
        let open = Disclosure { hidden: false };
        assert_eq!(open.aria_expanded(), "true");
        assert_eq!(open.close(), Some(Disclosure { hidden: true }));
        assert_eq!(Disclosure { hidden: true }.close(), None);
        assert_eq!(open.toggle().aria_expanded(), "false");
    }

    #[test]
    fn collapse_fades_only_when_opening() {
        let opening = CollapseTransition::from_hidden(true);
        assert!(!opening.hidden);
        assert!(opening.fade_in);
        assert!(opening.rotate_indicator);
        assert!(opening.expanded);

        let closing = CollapseTransition::from_hidden(false);
        assert!(closing.hidden);
        assert!(!closing.fade_in);
        assert!(!closing.rotate_indicator);
        assert!(!closing.expanded);
    }
}
