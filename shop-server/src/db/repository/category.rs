//! Category Repository

use shared::models::{Category, CategoryCreate, CategoryUpdate, slugify};

use super::BaseRepository;
use crate::db::Database;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

fn not_found(id: u64) -> AppError {
    AppError::new(ErrorCode::CategoryNotFound).with_detail("category_id", id)
}

fn name_taken(categories: &[Category], name: &str, except: Option<u64>) -> bool {
    categories
        .iter()
        .any(|c| Some(c.id) != except && c.name.eq_ignore_ascii_case(name))
}

impl CategoryRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories in insertion order
    pub async fn find_all(&self) -> AppResult<Vec<Category>> {
        Ok(self.base.db().read().await?.categories)
    }

    pub async fn find_by_id(&self, id: u64) -> AppResult<Option<Category>> {
        Ok(self.base.db().read().await?.category(id).cloned())
    }

    /// Create a new category; the slug is derived from the name
    pub async fn create(&self, data: CategoryCreate) -> AppResult<Category> {
        let name = data.name.trim().to_string();
        validate_required_text(&name, "name", MAX_NAME_LEN)?;

        self.base
            .db()
            .write(|snap| {
                if name_taken(&snap.categories, &name, None) {
                    return Err(AppError::conflict(format!(
                        "Category '{name}' already exists"
                    )));
                }
                let category = Category {
                    id: snap.next_category_id(),
                    slug: slugify(&name),
                    name,
                };
                snap.categories.push(category.clone());
                Ok(category)
            })
            .await
    }

    /// Rename a category; the slug follows the name
    pub async fn update(&self, id: u64, data: CategoryUpdate) -> AppResult<Category> {
        let name = data.name.map(|n| n.trim().to_string());
        if let Some(name) = &name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }

        self.base
            .db()
            .write(|snap| {
                if let Some(name) = &name
                    && name_taken(&snap.categories, name, Some(id))
                {
                    return Err(AppError::conflict(format!(
                        "Category '{name}' already exists"
                    )));
                }
                let category = snap
                    .categories
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| not_found(id))?;
                if let Some(name) = name {
                    category.slug = slugify(&name);
                    category.name = name;
                }
                Ok(category.clone())
            })
            .await
    }

    /// Delete a category that no product references
    pub async fn delete(&self, id: u64) -> AppResult<()> {
        self.base
            .db()
            .write(|snap| {
                if snap.category(id).is_none() {
                    return Err(not_found(id));
                }
                let products = snap.catalogue.iter().filter(|p| p.category_id == id).count();
                if products > 0 {
                    return Err(AppError::new(ErrorCode::CategoryHasProducts)
                        .with_detail("category_id", id)
                        .with_detail("products", products));
                }
                snap.categories.retain(|c| c.id != id);
                Ok(())
            })
            .await
    }
}
