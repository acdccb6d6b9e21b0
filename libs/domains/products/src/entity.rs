use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{NewProduct, Product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_brands::entity::Entity",
        from = "Column::BrandId",
        to = "domain_brands::entity::Column::Id"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "domain_categories::entity::Entity",
        from = "Column::CategoryId",
        to = "domain_categories::entity::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "domain_categories::entity::Entity",
        from = "Column::SubCategoryId",
        to = "domain_categories::entity::Column::Id"
    )]
    SubCategory,
}

impl Related<domain_brands::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(input: NewProduct) -> Self {
        let now = chrono::Utc::now().into();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            brand_id: input.brand_id,
            category_id: input.category_id,
            sub_category_id: input.sub_category_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every stored column from `input`
    pub fn replace(&mut self, input: NewProduct) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.brand_id = input.brand_id;
        self.category_id = input.category_id;
        self.sub_category_id = input.sub_category_id;
        self.updated_at = chrono::Utc::now().into();
    }
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            brand_id: model.brand_id,
            category_id: model.category_id,
            sub_category_id: model.sub_category_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<NewProduct> for ActiveModel {
    fn from(input: NewProduct) -> Self {
        let row = Model::new(input);
        ActiveModel {
            id: Set(row.id),
            name: Set(row.name),
            description: Set(row.description),
            price: Set(row.price),
            brand_id: Set(row.brand_id),
            category_id: Set(row.category_id),
            sub_category_id: Set(row.sub_category_id),
            deleted: Set(false),
            created_at: Set(row.created_at),
            updated_at: Set(row.updated_at),
        }
    }
}
