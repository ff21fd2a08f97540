//! Domain types representing income and expense categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Groups transactions under a user-defined label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Builds a stored category from caller input and an assigned id.
    pub fn from_input(id: Uuid, input: CategoryInput) -> Self {
        Self {
            id,
            name: input.name,
            kind: input.kind,
            icon: input.icon,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        match self.icon.as_deref() {
            Some(icon) => format!("{} {}", icon, self.name),
            None => self.name.clone(),
        }
    }
}

/// Category fields supplied by callers; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            kind: category.kind,
            icon: category.icon.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kind_as_type_and_omits_missing_icon() {
        let category = Category::new("Salary", EntryKind::Income);
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], "income");
        assert!(json.get("icon").is_none());
    }

    #[test]
    fn display_label_prefixes_icon() {
        let category = Category::new("餐饮", EntryKind::Expense).with_icon("🍔");
        assert_eq!(category.display_label(), "🍔 餐饮");
        let plain = Category::new("Rent", EntryKind::Expense);
        assert_eq!(plain.display_label(), "Rent");
    }
}
