use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Ascend,
    Descend,
}

/// Article list columns the remote query layer can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    PostAt,
    UpdateAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub enabled: bool,
    pub direction: SortDirection,
}

/// The `sort` query variable: enabled fields mapped to their direction.
/// Application order between several enabled fields is up to the server.
pub type SortSpec = BTreeMap<SortField, SortDirection>;

/// User-toggleable sort configuration for the article list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortPreference {
    pub post_at: SortOption,
    pub update_at: SortOption,
}

impl Default for SortPreference {
    fn default() -> Self {
        Self {
            post_at: SortOption {
                enabled: true,
                direction: SortDirection::Descend,
            },
            update_at: SortOption {
                enabled: false,
                direction: SortDirection::Descend,
            },
        }
    }
}

impl SortPreference {
    pub fn option(&self, field: SortField) -> &SortOption {
        match field {
            SortField::PostAt => &self.post_at,
            SortField::UpdateAt => &self.update_at,
        }
    }

    fn option_mut(&mut self, field: SortField) -> &mut SortOption {
        match field {
            SortField::PostAt => &mut self.post_at,
            SortField::UpdateAt => &mut self.update_at,
        }
    }

    /// Flips `enabled` for `field` and returns the new value.
    pub fn toggle(&mut self, field: SortField) -> bool {
        let option = self.option_mut(field);
        option.enabled = !option.enabled;
        option.enabled
    }

    pub fn set_direction(&mut self, field: SortField, direction: SortDirection) {
        self.option_mut(field).direction = direction;
    }

    /// Projects the enabled fields into the query `sort` map.
    pub fn enabled(&self) -> SortSpec {
        [SortField::PostAt, SortField::UpdateAt]
            .into_iter()
            .filter(|field| self.option(*field).enabled)
            .map(|field| (field, self.option(field).direction))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_sorts_by_post_date_descending() {
        let projected = SortPreference::default().enabled();
        assert_eq!(serde_json::to_value(&projected).unwrap(), json!({ "postAt": "DESCEND" }));
    }

    #[test]
    fn several_fields_may_be_enabled_at_once() {
        let mut pref = SortPreference::default();
        assert!(pref.toggle(SortField::UpdateAt));
        pref.set_direction(SortField::UpdateAt, SortDirection::Ascend);

        let projected = pref.enabled();
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[&SortField::UpdateAt], SortDirection::Ascend);
    }

    #[test]
    fn disabled_field_keeps_its_direction() {
        let mut pref = SortPreference::default();
        pref.set_direction(SortField::PostAt, SortDirection::Ascend);
        assert!(!pref.toggle(SortField::PostAt));
        assert!(pref.enabled().is_empty());
        assert_eq!(pref.post_at.direction, SortDirection::Ascend);
    }
}
