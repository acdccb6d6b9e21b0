//! Shared test utilities for the domain crates
//!
//! - `TestDatabase`: PostgreSQL container with the store migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic ids, names, emails and phone numbers
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore]
//! async fn creates_brand() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("creates_brand");
//!     let name = data.name("brand", "main");
//! }
//! ```

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Seeded test data so reruns produce identical values
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn user_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// Only letters, digits and spaces so it passes the name rules, e.g. `Test brand 1234 main`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("Test {} {} {}", prefix, self.seed % 1_000_000, suffix)
    }

    pub fn email(&self, local: &str) -> String {
        format!("{}.{}@example.com", local, self.seed % 1_000_000)
    }

    /// Ten digits starting with 9
    pub fn mobile_number(&self, offset: u64) -> String {
        format!("9{:09}", (self.seed + offset) % 1_000_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);

        assert_eq!(a.user_id(), b.user_id());
        assert_eq!(a.name("brand", "main"), b.name("brand", "main"));
        assert_eq!(a.email("jane"), "jane.42@example.com");
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");
        assert_ne!(a.user_id(), b.user_id());
    }

    #[test]
    fn test_mobile_number_shape() {
        let number = TestDataBuilder::new(7).mobile_number(0);
        assert_eq!(number.len(), 10);
        assert!(number.starts_with('9'));
        assert_ne!(number, TestDataBuilder::new(7).mobile_number(1));
    }
}
