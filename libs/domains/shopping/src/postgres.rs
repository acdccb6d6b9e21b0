use async_trait::async_trait;
use database::postgres::{is_unique_violation, violates_constraint};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entity::{cart, cart_product, wishlist, wishlist_product};
use crate::error::{ShoppingError, ShoppingResult};
use crate::models::{Cart, MAX_CART_QUANTITY, Wishlist};
use crate::repository::{CartRepository, WishlistRepository};

const UNIQUE_WISHLIST_OWNER: &str = "uq_wishlists_user_id";
const UNIQUE_CART_OWNER: &str = "uq_carts_user_id";

#[derive(Clone)]
pub struct PgWishlistRepository {
    db: DatabaseConnection,
}

impl PgWishlistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assemble(&self, row: wishlist::Model) -> ShoppingResult<Wishlist> {
        let product_ids = row
            .find_related(wishlist_product::Entity)
            .order_by_asc(wishlist_product::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| p.product_id)
            .collect();

        Ok(row.into_wishlist(product_ids))
    }

    async fn find_live(&self, id: Uuid) -> ShoppingResult<Option<wishlist::Model>> {
        Ok(wishlist::Entity::find_by_id(id)
            .filter(wishlist::Column::Deleted.eq(false))
            .one(&self.db)
            .await?)
    }
}

#[async_trait]
impl WishlistRepository for PgWishlistRepository {
    async fn create(&self, user_id: Uuid, name: String) -> ShoppingResult<Wishlist> {
        let row = wishlist::Model::new(user_id, name)
            .into_active_model()
            .reset_all()
            .insert(&self.db)
            .await
            .map_err(|e| owner_error(e, UNIQUE_WISHLIST_OWNER, user_id, "wishlist"))?;

        tracing::info!(wishlist_id = %row.id, %user_id, "Created wishlist");
        Ok(row.into_wishlist(Vec::new()))
    }

    async fn find_by_id(&self, id: Uuid) -> ShoppingResult<Option<Wishlist>> {
        match self.find_live(id).await? {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> ShoppingResult<Option<Wishlist>> {
        let row = wishlist::Entity::find()
            .filter(wishlist::Column::UserId.eq(user_id))
            .filter(wishlist::Column::Deleted.eq(false))
            .one(&self.db)
            .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn add_product(&self, wishlist_id: Uuid, product_id: Uuid) -> ShoppingResult<Wishlist> {
        let row = self
            .find_live(wishlist_id)
            .await?
            .ok_or(ShoppingError::WishlistNotFound(wishlist_id))?;

        let entry = wishlist_product::ActiveModel {
            wishlist_id: Set(wishlist_id),
            product_id: Set(product_id),
            created_at: Set(chrono::Utc::now().into()),
        };

        // Primary key (wishlist_id, product_id) already holds the product
        match entry.insert(&self.db).await {
            Ok(_) => tracing::info!(%wishlist_id, %product_id, "Saved product to wishlist"),
            Err(e) if is_unique_violation(&e) => {}
            Err(e) => return Err(e.into()),
        }

        self.assemble(row).await
    }

    async fn remove_product(&self, wishlist_id: Uuid, product_id: Uuid) -> ShoppingResult<bool> {
        let result = wishlist_product::Entity::delete_by_id((wishlist_id, product_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[derive(Clone)]
pub struct PgCartRepository {
    db: DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assemble(&self, row: cart::Model) -> ShoppingResult<Cart> {
        let items = row
            .find_related(cart_product::Entity)
            .order_by_asc(cart_product::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(row.into_cart(items))
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn create(&self, user_id: Uuid) -> ShoppingResult<Cart> {
        let row = cart::Model::new(user_id)
            .into_active_model()
            .reset_all()
            .insert(&self.db)
            .await
            .map_err(|e| owner_error(e, UNIQUE_CART_OWNER, user_id, "cart"))?;

        tracing::info!(cart_id = %row.id, %user_id, "Created cart");
        Ok(row.into_cart(Vec::new()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> ShoppingResult<Option<Cart>> {
        let row = cart::Entity::find()
            .filter(cart::Column::UserId.eq(user_id))
            .filter(cart::Column::Deleted.eq(false))
            .one(&self.db)
            .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn add_product(&self, cart_id: Uuid, product_id: Uuid, quantity: i32) -> ShoppingResult<Cart> {
        let row = cart::Entity::find_by_id(cart_id)
            .filter(cart::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or_else(|| ShoppingError::Internal(format!("cart {} vanished", cart_id)))?;

        if !(1..=MAX_CART_QUANTITY).contains(&quantity) {
            return Err(ShoppingError::quantity_limit(product_id));
        }

        // Concurrent adds to one line must both count
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let upsert = OnConflict::columns([cart_product::Column::CartId, cart_product::Column::ProductId])
            .value(
                cart_product::Column::Quantity,
                Expr::cust("cart_products.quantity + EXCLUDED.quantity"),
            )
            .update_column(cart_product::Column::UpdatedAt)
            .action_and_where(Expr::cust(format!(
                "cart_products.quantity + EXCLUDED.quantity <= {}",
                MAX_CART_QUANTITY
            )))
            .to_owned();

        let written = cart_product::Entity::insert(cart_product::ActiveModel {
            cart_id: Set(cart_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .on_conflict(upsert)
        .exec_without_returning(&self.db)
        .await?;

        if written == 0 {
            return Err(ShoppingError::quantity_limit(product_id));
        }

        tracing::info!(%cart_id, %product_id, quantity, "Added product to cart");
        self.assemble(row).await
    }

    async fn remove_product(&self, cart_id: Uuid, product_id: Uuid) -> ShoppingResult<bool> {
        let result = cart_product::Entity::delete_by_id((cart_id, product_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

fn owner_error(err: DbErr, constraint: &str, user_id: Uuid, what: &'static str) -> ShoppingError {
    if violates_constraint(&err, constraint) {
        ShoppingError::Duplicate(user_id, what)
    } else {
        err.into()
    }
}
