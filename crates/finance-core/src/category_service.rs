//! Business logic helpers for category management.

use finance_domain::{Category, CategoryInput, EntryKind, FinanceState};
use uuid::Uuid;

use crate::{resolve, CoreError, CoreResult};

/// Provides validated operations for [`Category`] entities.
pub struct CategoryService;

impl CategoryService {
    /// Appends a new category after normalising and validating its fields.
    pub fn add(state: &mut FinanceState, input: CategoryInput) -> CoreResult<Category> {
        let input = Self::normalize(input)?;
        let category = Category::from_input(Uuid::new_v4(), input);
        state.categories.push(category.clone());
        Ok(category)
    }

    /// Replaces name, icon and kind in place. The kind is locked once
    /// transactions reference the category.
    pub fn edit(state: &mut FinanceState, id: Uuid, input: CategoryInput) -> CoreResult<Category> {
        let input = Self::normalize(input)?;
        let references = state.references_to(id);
        let category = state
            .category_mut(id)
            .ok_or(CoreError::CategoryNotFound(id))?;
        if category.kind != input.kind && references > 0 {
            return Err(CoreError::CategoryInUse {
                id,
                name: category.name.clone(),
                transactions: references,
            });
        }
        *category = Category::from_input(id, input);
        Ok(category.clone())
    }

    /// Removes a category that no transaction references.
    pub fn remove(state: &mut FinanceState, id: Uuid) -> CoreResult<Category> {
        let index = state
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or(CoreError::CategoryNotFound(id))?;
        let references = state.references_to(id);
        if references > 0 {
            return Err(CoreError::CategoryInUse {
                id,
                name: state.categories[index].name.clone(),
                transactions: references,
            });
        }
        Ok(state.categories.remove(index))
    }

    pub fn list(state: &FinanceState, kind: Option<EntryKind>) -> Vec<Category> {
        state
            .categories
            .iter()
            .filter(|category| kind.map_or(true, |kind| category.kind == kind))
            .cloned()
            .collect()
    }

    /// Looks a category up by exact name (case-insensitive), then by id or id prefix.
    ///
    /// Names are tried first so a name like "Cafe" never lands on a category
    /// whose id happens to start with those hex digits.
    pub fn resolve<'a>(state: &'a FinanceState, token: &str) -> CoreResult<&'a Category> {
        let wanted = token.trim().to_lowercase();
        let mut named = state
            .categories
            .iter()
            .filter(|category| category.name.to_lowercase() == wanted);
        match (named.next(), named.next()) {
            (Some(category), None) => Ok(category),
            (Some(_), Some(_)) => Err(CoreError::Ambiguous(token.trim().to_string())),
            (None, _) => resolve::by_id_or_prefix(&state.categories, token),
        }
    }

    fn normalize(mut input: CategoryInput) -> CoreResult<CategoryInput> {
        input.name = input.name.trim().to_string();
        if input.name.is_empty() {
            return Err(CoreError::Validation("category name cannot be empty".into()));
        }
        input.icon = input
            .icon
            .map(|icon| icon.trim().to_string())
            .filter(|icon| !icon.is_empty());
        Ok(input)
    }
}
