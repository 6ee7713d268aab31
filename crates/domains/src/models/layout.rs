use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Side,
    Top,
    Mix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentWidth {
    Fluid,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavTheme {
    Light,
    Dark,
    RealDark,
}

/// Presentation-layer layout preferences. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    pub layout: LayoutMode,
    pub fixed_header: bool,
    pub content_width: ContentWidth,
    pub title: String,
    pub nav_theme: NavTheme,
    /// `None` means the default header is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_render: Option<bool>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Mix,
            fixed_header: true,
            content_width: ContentWidth::Fluid,
            title: "Blog Admin".to_string(),
            nav_theme: NavTheme::RealDark,
            header_render: None,
        }
    }
}

impl LayoutSettings {
    /// Whether content needs to be offset for a header bar.
    pub fn should_have_top(&self) -> bool {
        match self.header_render {
            Some(false) => false,
            None | Some(true) => self.layout == LayoutMode::Mix || self.fixed_header,
        }
    }
}
