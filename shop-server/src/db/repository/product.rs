//! Product Repository

use shared::models::{
    NEW_ARRIVALS_CAP, Product, ProductCreate, ProductQuery, ProductSort, ProductUpdate,
    ProductsByCategory,
};

use super::BaseRepository;
use crate::db::{Database, Snapshot};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_images, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

pub(crate) fn not_found(id: u64) -> AppError {
    AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id)
}

fn require_category(snap: &Snapshot, category_id: u64) -> AppResult<()> {
    if snap.category(category_id).is_none() {
        return Err(AppError::new(ErrorCode::ProductCategoryInvalid)
            .with_detail("category_id", category_id));
    }
    Ok(())
}

fn require_price(price: rust_decimal::Decimal) -> AppResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::new(ErrorCode::ProductInvalidPrice));
    }
    Ok(())
}

/// Filter and order a catalogue copy for `GET /api/products`
fn apply_query(snap: Snapshot, query: &ProductQuery) -> Vec<Product> {
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut products: Vec<Product> = snap
        .catalogue
        .into_iter()
        .filter(|p| query.category_id.is_none_or(|c| p.category_id == c))
        .filter(|p| match &needle {
            Some(n) => {
                p.title.to_lowercase().contains(n) || p.description.to_lowercase().contains(n)
            }
            None => true,
        })
        .collect();

    // all sorts are stable, ties keep catalogue order
    match query.sort {
        Some(ProductSort::New) => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(ProductSort::Best) => {
            let rank = |id: u64| {
                snap.stats
                    .best_sellers
                    .iter()
                    .position(|b| *b == id)
                    .unwrap_or(usize::MAX)
            };
            products.sort_by_key(|p| rank(p.id));
        }
        Some(ProductSort::PriceAsc) => products.sort_by(|a, b| a.price.cmp(&b.price)),
        Some(ProductSort::PriceDesc) => products.sort_by(|a, b| b.price.cmp(&a.price)),
        None => {}
    }
    products
}

impl ProductRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Catalogue filtered by category and search text, optionally sorted
    pub async fn find_all(&self, query: &ProductQuery) -> AppResult<Vec<Product>> {
        let snap = self.base.db().read().await?;
        Ok(apply_query(snap, query))
    }

    pub async fn find_by_id(&self, id: u64) -> AppResult<Option<Product>> {
        Ok(self.base.db().read().await?.product(id).cloned())
    }

    /// Products of one category; unknown category is a 404
    pub async fn find_by_category(&self, category_id: u64) -> AppResult<ProductsByCategory> {
        let snap = self.base.db().read().await?;
        let category = snap.category(category_id).ok_or_else(|| {
            AppError::new(ErrorCode::CategoryNotFound).with_detail("category_id", category_id)
        })?;
        let category = category.name.clone();
        let products: Vec<Product> = snap
            .catalogue
            .into_iter()
            .filter(|p| p.category_id == category_id)
            .collect();
        Ok(ProductsByCategory {
            category,
            total: products.len(),
            products,
        })
    }

    /// Create a product and put it at the head of the new-arrivals list
    pub async fn create(&self, data: ProductCreate, now_secs: i64) -> AppResult<Product> {
        validate_required_text(&data.title, "title", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_images(&data.images)?;
        require_price(data.price)?;

        self.base
            .db()
            .write(|snap| {
                require_category(snap, data.category_id)?;
                let product = Product {
                    id: snap.next_product_id(),
                    title: data.title.trim().to_string(),
                    description: data.description.unwrap_or_default(),
                    price: data.price,
                    stock: data.stock.unwrap_or(0),
                    category_id: data.category_id,
                    likes: 0,
                    views: 0,
                    created_at: now_secs,
                    images: data.images,
                };
                snap.catalogue.push(product.clone());

                let arrivals = &mut snap.stats.new_arrivals;
                arrivals.insert(0, product.id);
                arrivals.truncate(NEW_ARRIVALS_CAP);

                tracing::info!(product_id = product.id, title = %product.title, "Product created");
                Ok(product)
            })
            .await
    }

    /// Partial update; a new category must exist
    pub async fn update(&self, id: u64, data: ProductUpdate) -> AppResult<Product> {
        if let Some(title) = &data.title {
            validate_required_text(title, "title", MAX_NAME_LEN)?;
        }
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        if let Some(images) = &data.images {
            validate_images(images)?;
        }
        if let Some(price) = data.price {
            require_price(price)?;
        }

        self.base
            .db()
            .write(|snap| {
                if let Some(category_id) = data.category_id {
                    require_category(snap, category_id)?;
                }
                let product = snap.product_mut(id).ok_or_else(|| not_found(id))?;
                if let Some(title) = data.title {
                    product.title = title.trim().to_string();
                }
                if let Some(description) = data.description {
                    product.description = description;
                }
                if let Some(price) = data.price {
                    product.price = price;
                }
                if let Some(stock) = data.stock {
                    product.stock = stock;
                }
                if let Some(category_id) = data.category_id {
                    product.category_id = category_id;
                }
                if let Some(images) = data.images {
                    product.images = images;
                }
                Ok(product.clone())
            })
            .await
    }

    /// Delete a product with its comments, likes and curated stats entries
    pub async fn delete(&self, id: u64) -> AppResult<()> {
        self.base
            .db()
            .write(|snap| {
                if snap.product(id).is_none() {
                    return Err(not_found(id));
                }
                snap.catalogue.retain(|p| p.id != id);
                snap.comments.retain(|c| c.product_id != id);
                snap.likes.retain(|l| l.product_id != id);
                snap.stats.forget_curated(id);
                tracing::info!(product_id = id, "Product deleted");
                Ok(())
            })
            .await
    }
}
