//! Behaviour shared by stores and warehouses.

use superstore_catalog::{Category, Item, Subcategory};
use superstore_core::{CategoryId, DomainResult, ItemCode, SubcategoryId, Table};

/// Owner of a category → subcategory → item tree.
///
/// Implementors only expose their category table; every traversal below walks
/// categories, then subcategories, then items, each in insertion order.
/// The trait is object safe so callers can work on `&mut dyn Facility` without
/// knowing whether they hold a store or a warehouse.
pub trait Facility {
    fn name(&self) -> &str;

    fn categories(&self) -> &Table<Category>;

    fn categories_mut(&mut self) -> &mut Table<Category>;

    /// Store a category, replacing one with the same id.
    fn add_category(&mut self, category: Category) -> Option<Category> {
        self.categories_mut().upsert(category)
    }

    /// Store a category only if its id is free.
    fn insert_category(&mut self, category: Category) -> DomainResult<&mut Category> {
        self.categories_mut().insert(category)
    }

    fn remove_category(&mut self, id: &CategoryId) -> Option<Category> {
        self.categories_mut().remove(id)
    }

    fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories().get(id)
    }

    fn category_mut(&mut self, id: &CategoryId) -> Option<&mut Category> {
        self.categories_mut().get_mut(id)
    }

    fn find_subcategory(&self, id: &SubcategoryId) -> Option<&Subcategory> {
        self.categories()
            .iter()
            .find_map(|category| category.subcategory(id))
    }

    fn find_subcategory_mut(&mut self, id: &SubcategoryId) -> Option<&mut Subcategory> {
        self.categories_mut()
            .iter_mut()
            .find_map(|category| category.subcategory_mut(id))
    }

    /// Depth-first walk over every item of the facility.
    fn items(&self) -> Box<dyn Iterator<Item = &Item> + '_> {
        Box::new(
            self.categories()
                .iter()
                .flat_map(|category| category.subcategories())
                .flat_map(|subcategory| subcategory.items()),
        )
    }

    /// First item with `code` in depth-first order.
    fn find_item(&self, code: &ItemCode) -> Option<&Item> {
        self.categories()
            .iter()
            .flat_map(|category| category.subcategories())
            .find_map(|subcategory| subcategory.item(code))
    }

    fn find_item_mut(&mut self, code: &ItemCode) -> Option<&mut Item> {
        self.categories_mut()
            .iter_mut()
            .flat_map(|category| category.subcategories_mut())
            .find_map(|subcategory| subcategory.item_mut(code))
    }

    /// Remove the first item with `code` from whichever subcategory holds it.
    ///
    /// The item's own `subcategory_id` is not consulted; it may have been
    /// edited after the item was filed.
    fn remove_item(&mut self, code: &ItemCode) -> Option<Item> {
        self.categories_mut()
            .iter_mut()
            .flat_map(|category| category.subcategories_mut())
            .find_map(|subcategory| subcategory.remove_item(code))
    }

    /// Case-insensitive name search across every subcategory.
    fn search_items(&self, term: &str) -> Vec<&Item> {
        self.categories()
            .iter()
            .flat_map(|category| category.subcategories())
            .flat_map(|subcategory| subcategory.search_items(term))
            .collect()
    }
}
