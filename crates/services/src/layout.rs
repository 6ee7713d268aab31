//! # Layout Preference Store

use domains::LayoutSettings;
use tracing::debug;

use crate::observable::{Observable, Subscription};

#[derive(Default)]
pub struct LayoutPreferenceStore {
    settings: Observable<LayoutSettings>,
}

impl LayoutPreferenceStore {
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            settings: Observable::new(settings),
        }
    }

    pub fn snapshot(&self) -> LayoutSettings {
        self.settings.snapshot()
    }

    /// Replaces the settings. The navigation theme is fixed and is kept
    /// whatever `settings` carries.
    pub fn set_settings(&self, settings: LayoutSettings) {
        self.settings.update(|current| {
            let nav_theme = current.nav_theme;
            *current = LayoutSettings {
                nav_theme,
                ..settings
            };
        });
        debug!(layout = ?self.settings.read(|s| s.layout), "layout settings changed");
    }

    pub fn should_have_top(&self) -> bool {
        self.settings.read(LayoutSettings::should_have_top)
    }

    pub fn subscribe(&self) -> Subscription<LayoutSettings> {
        self.settings.subscribe()
    }
}
