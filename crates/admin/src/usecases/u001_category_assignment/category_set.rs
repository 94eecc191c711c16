use std::collections::HashSet;

use contracts::domain::a001_category::aggregate::{Category, CategoryId};

/// Упорядоченное множество категорий с ключом по `id`
///
/// Порядок вставки сохраняется, повторная вставка того же `id` игнорируется
/// (побеждает первое вхождение).
#[derive(Debug, Clone, Default)]
pub struct CategorySet {
    items: Vec<Category>,
    ids: HashSet<CategoryId>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if a category with the same id is already present
    pub fn insert(&mut self, category: Category) -> bool {
        if !self.ids.insert(category.id.clone()) {
            return false;
        }
        self.items.push(category);
        true
    }

    pub fn remove(&mut self, id: &CategoryId) -> Option<Category> {
        if !self.ids.remove(id) {
            return None;
        }
        let pos = self.items.iter().position(|c| &c.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<Category> {
        self.items.clone()
    }

    /// Категории из `self`, которых нет в `other`, в порядке `self`
    pub fn difference(&self, other: &CategorySet) -> Vec<Category> {
        self.items
            .iter()
            .filter(|c| !other.contains(&c.id))
            .cloned()
            .collect()
    }

    /// Оставить только категории, которых нет в `other`
    pub fn retain_absent_from(&mut self, other: &CategorySet) {
        self.items.retain(|c| !other.contains(&c.id));
        self.ids.retain(|id| !other.contains(id));
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}
