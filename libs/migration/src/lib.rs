//! Schema for the store database.
//!
//! Partial unique indexes (`WHERE deleted = false`) keep names, emails and
//! mobile numbers unique among live rows while soft-deleted rows free them up.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_brands;
mod m20250301_000002_create_categories;
mod m20250301_000003_create_users;
mod m20250301_000004_create_products;
mod m20250301_000005_create_stocks;
mod m20250301_000006_create_wishlists;
mod m20250301_000007_create_carts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_brands::Migration),
            Box::new(m20250301_000002_create_categories::Migration),
            Box::new(m20250301_000003_create_users::Migration),
            Box::new(m20250301_000004_create_products::Migration),
            Box::new(m20250301_000005_create_stocks::Migration),
            Box::new(m20250301_000006_create_wishlists::Migration),
            Box::new(m20250301_000007_create_carts::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_by_dependency() {
        let names: Vec<String> = Migrator::migrations().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names.len(), 7);

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names[0].ends_with("create_brands"));
        assert!(names[6].ends_with("create_carts"));
    }
}
