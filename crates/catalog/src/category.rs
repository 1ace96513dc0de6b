use serde::{Deserialize, Serialize};

use superstore_core::{CategoryId, DomainResult, Entity, SubcategoryId, Table};

use crate::subcategory::Subcategory;

/// Top level of a facility's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    subcategories: Table<Subcategory>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            subcategories: Table::new(),
        }
    }

    pub fn id_typed(&self) -> &CategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Store a subcategory, replacing one with the same id.
    pub fn add_subcategory(&mut self, subcategory: Subcategory) -> Option<Subcategory> {
        self.subcategories.upsert(subcategory)
    }

    pub fn insert_subcategory(&mut self, subcategory: Subcategory) -> DomainResult<&mut Subcategory> {
        self.subcategories.insert(subcategory)
    }

    pub fn remove_subcategory(&mut self, id: &SubcategoryId) -> Option<Subcategory> {
        self.subcategories.remove(id)
    }

    pub fn subcategory(&self, id: &SubcategoryId) -> Option<&Subcategory> {
        self.subcategories.get(id)
    }

    pub fn subcategory_mut(&mut self, id: &SubcategoryId) -> Option<&mut Subcategory> {
        self.subcategories.get_mut(id)
    }

    pub fn subcategories(&self) -> impl Iterator<Item = &Subcategory> + '_ {
        self.subcategories.iter()
    }

    pub fn subcategories_mut(&mut self) -> impl Iterator<Item = &mut Subcategory> + '_ {
        self.subcategories.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.subcategories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subcategories.is_empty()
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superstore_core::DomainError;

    fn grocery() -> Category {
        Category::new(CategoryId::new("C001"), "Grocery")
    }

    fn sub(id: &str, name: &str) -> Subcategory {
        Subcategory::new(SubcategoryId::new(id), name, CategoryId::new("C001"))
    }

    #[test]
    fn add_get_and_remove_subcategory() {
        let mut category = grocery();
        category.add_subcategory(sub("SC001", "Grains"));
        category.add_subcategory(sub("SC002", "Dairy"));

        assert_eq!(category.len(), 2);
        assert_eq!(
            category.subcategory(&SubcategoryId::new("SC002")).unwrap().name(),
            "Dairy"
        );

        let listed: Vec<&str> = category.subcategories().map(|s| s.name()).collect();
        assert_eq!(listed, vec!["Grains", "Dairy"]);

        assert!(category.remove_subcategory(&SubcategoryId::new("SC001")).is_some());
        assert!(category.subcategory(&SubcategoryId::new("SC001")).is_none());
        assert_eq!(category.len(), 1);
    }

    #[test]
    fn insert_subcategory_refuses_taken_id() {
        let mut category = grocery();
        category.insert_subcategory(sub("SC001", "Grains")).unwrap();

        match category.insert_subcategory(sub("SC001", "Rice")).unwrap_err() {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate subcategory id"),
        }
    }

    #[test]
    fn rename_category_and_subcategory() {
        let mut category = grocery();
        category.add_subcategory(sub("SC001", "Grains"));

        category.set_name("Food");
        category
            .subcategory_mut(&SubcategoryId::new("SC001"))
            .unwrap()
            .set_name("Cereals");

        assert_eq!(category.name(), "Food");
        assert_eq!(
            category.subcategory(&SubcategoryId::new("SC001")).unwrap().name(),
            "Cereals"
        );
    }
}
