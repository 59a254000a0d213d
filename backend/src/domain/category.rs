//! Category read models and write payloads.
//!
//! Categories form a self-referential hierarchy through `parent_id`. The
//! domain never stores object references between categories; relations are
//! resolved by id (see [`crate::domain::tree`]).

use super::{CatalogName, Slug, SlugError};

/// Identifier assigned by storage on insert.
pub type CategoryId = i32;

/// Stored category row as seen by the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub parent_id: Option<CategoryId>,
}

/// Shortened parent reference embedded in category views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
}

/// Category enriched with its resolved parent and owned product ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub parent_id: Option<CategoryId>,
    pub parent: Option<CategoryRef>,
    pub product_ids: Vec<i32>,
}

impl CategoryView {
    /// Assemble a view from a category plus its resolved relations.
    pub fn from_parts(
        category: Category,
        parent: Option<CategoryRef>,
        product_ids: Vec<i32>,
    ) -> Self {
        let Category {
            id,
            name,
            slug,
            is_active,
            parent_id,
        } = category;
        Self {
            id,
            name,
            slug,
            is_active,
            parent_id,
            parent,
            product_ids,
        }
    }
}

/// Validated payload for inserting a category.
///
/// New categories are always active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: CatalogName,
    pub slug: Slug,
    pub parent_id: Option<CategoryId>,
}

impl NewCategory {
    /// Build the insert payload, deriving the slug from `name`.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::{CatalogName, NewCategory};
    ///
    /// let name = CatalogName::new("Electronics").expect("valid name");
    /// let category = NewCategory::new(name, None).expect("slug derives");
    /// assert_eq!(category.slug.as_ref(), "electronics");
    /// ```
    pub fn new(name: CatalogName, parent_id: Option<CategoryId>) -> Result<Self, SlugError> {
        let slug = Slug::from_name(&name)?;
        Ok(Self {
            name,
            slug,
            parent_id,
        })
    }
}

/// Partial update for a category.
///
/// `None` leaves a field untouched. `parent_id: Some(None)` detaches the
/// category to the root. Renaming keeps the stored slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<CatalogName>,
    pub is_active: Option<bool>,
    pub parent_id: Option<Option<CategoryId>>,
}

impl CategoryPatch {
    /// Return `true` when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_active.is_none() && self.parent_id.is_none()
    }

    /// Apply the patch to an in-memory category.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.to_string();
        }
        if let Some(is_active) = self.is_active {
            category.is_active = is_active;
        }
        if let Some(parent_id) = self.parent_id {
            category.parent_id = parent_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn phones() -> Category {
        Category {
            id: 2,
            name: "Phones".to_owned(),
            slug: "phones".to_owned(),
            is_active: true,
            parent_id: Some(1),
        }
    }

    #[rstest]
    fn empty_patch_leaves_category_untouched(phones: Category) {
        let patch = CategoryPatch::default();
        let mut updated = phones.clone();
        patch.apply_to(&mut updated);
        assert!(patch.is_empty());
        assert_eq!(updated, phones);
    }

    #[rstest]
    fn rename_keeps_slug(phones: Category) {
        let patch = CategoryPatch {
            name: Some(CatalogName::new("Mobile Phones").expect("valid name")),
            ..CategoryPatch::default()
        };
        let mut updated = phones;
        patch.apply_to(&mut updated);
        assert_eq!(updated.name, "Mobile Phones");
        assert_eq!(updated.slug, "phones");
    }

    #[rstest]
    fn explicit_null_parent_detaches(phones: Category) {
        let patch = CategoryPatch {
            parent_id: Some(None),
            ..CategoryPatch::default()
        };
        let mut updated = phones;
        patch.apply_to(&mut updated);
        assert!(!patch.is_empty());
        assert_eq!(updated.parent_id, None);
    }

    #[rstest]
    fn view_keeps_category_fields(phones: Category) {
        let parent = CategoryRef {
            id: 1,
            name: "Electronics".to_owned(),
        };
        let view = CategoryView::from_parts(phones, Some(parent.clone()), vec![7]);
        assert_eq!(view.id, 2);
        assert_eq!(view.parent, Some(parent));
        assert_eq!(view.product_ids, vec![7]);
    }
}
