//! Category Service

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{ALL_CATEGORY_ID, Category, NewCategory};
use crate::domain::repository::CategoryRepository;
use crate::error::CatalogResult;

pub struct CategoryService<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> CategoryService<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Active categories for public listings, led by a fresh "All" entry.
    ///
    /// Stored rows claiming the reserved id are dropped so "All" appears once.
    pub async fn list_public(&self) -> CatalogResult<Vec<Category>> {
        let categories = self.repo.get_all(true).await?;

        let mut listing = Vec::with_capacity(categories.len() + 1);
        listing.push(Category::all(Utc::now()));
        for category in categories {
            if category.id == ALL_CATEGORY_ID {
                tracing::warn!(name = %category.name, "Stored category shadows the reserved id");
                continue;
            }
            listing.push(category);
        }

        tracing::debug!(count = listing.len(), "Listed public categories");
        Ok(listing)
    }

    pub async fn get(&self, id: &str) -> CatalogResult<Category> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, input: NewCategory) -> CatalogResult<Category> {
        input.validate()?;
        let category = self.repo.create(input).await?;
        tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }
}
