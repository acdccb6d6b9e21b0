use domain_brands::{BrandRepository, BrandService};
use domain_categories::{CategoryRepository, CategoryService};
use domain_stocks::{StockRepository, StockService};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, NewProduct, Product, Relations, UpdateProduct};
use crate::repository::ProductRepository;

/// Product catalogue operations.
///
/// Brand and category lookups go through their services so not-found
/// errors carry the related entity's message.
pub struct ProductService<R, B, C, S>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    repository: Arc<R>,
    brands: BrandService<B>,
    categories: CategoryService<C>,
    stocks: StockService<S>,
}

impl<R, B, C, S> ProductService<R, B, C, S>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    pub fn new(
        repository: R,
        brands: BrandService<B>,
        categories: CategoryService<C>,
        stocks: StockService<S>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            brands,
            categories,
            stocks,
        }
    }

    /// List a product for `seller_id`.
    ///
    /// A live product with the same name and description is reused instead of
    /// inserting a copy. The seller's stock is then recorded; if that write
    /// fails the product stays and a persistence error is returned.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_product(&self, input: CreateProduct, seller_id: Uuid) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::InvalidInput(e.to_string()))?;

        if input.date_of_manufacture >= input.date_of_expire {
            return Err(ProductError::InvalidInput(
                "Date of manufacture must be before date of expiry".to_string(),
            ));
        }

        let new_product = NewProduct::from(&input);
        self.check_relations(Relations::from(&new_product)).await?;

        let product = match self
            .repository
            .find_by_name_and_description(&input.name, &input.description)
            .await?
        {
            Some(existing) => {
                tracing::info!(product_id = %existing.id, "Reusing existing product");
                existing
            }
            None => self.repository.create(new_product).await?,
        };

        self.stocks
            .add_stock(product.id, seller_id, input.quantity)
            .await?;

        tracing::info!(product_id = %product.id, quantity = input.quantity, "Product listed");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_brand(&self, brand_id: Uuid) -> ProductResult<Vec<Product>> {
        self.brands.get_brand(brand_id).await?;
        self.repository.find_by_brand(brand_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_category(&self, name: &str) -> ProductResult<Vec<Product>> {
        let category = self.categories.get_category_by_name(name).await?;
        self.repository.find_by_category(category.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_sub_category(&self, name: &str) -> ProductResult<Vec<Product>> {
        let sub_category = self.categories.get_sub_category_by_name(name).await?;
        self.repository.find_by_sub_category(sub_category.id).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::InvalidInput(e.to_string()))?;

        self.get_product(id).await?;

        let replacement = NewProduct::from(input);
        self.check_relations(Relations::from(&replacement)).await?;
        self.repository.update(id, replacement).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// The brand must exist, the category must be top-level and the
    /// sub-category must sit directly under it
    async fn check_relations(&self, relations: Relations) -> ProductResult<()> {
        self.brands.get_brand(relations.brand_id).await?;

        let category = self.categories.get_category(relations.category_id).await?;
        if category.is_sub_category() {
            return Err(ProductError::InvalidInput(format!(
                "{} is a sub-category, not a category",
                category.name
            )));
        }

        let sub_category = self
            .categories
            .get_category(relations.sub_category_id)
            .await?;
        if sub_category.parent_id != Some(category.id) {
            return Err(ProductError::InvalidInput(format!(
                "{} is not a sub-category of {}",
                sub_category.name, category.name
            )));
        }

        Ok(())
    }
}
