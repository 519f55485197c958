//! Shared test utilities for the workspace.
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied
//! - `TestDataBuilder`: deterministic user fields derived from the test name
//! - `assertions`: checks for `{code, message, content}` response bodies
//!
//! ```rust,ignore
//! use migration::Migrator;
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new::<Migrator>().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let username = builder.username("main");
//!     let email = builder.email("main");
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic values.
///
/// The same test name always yields the same usernames, emails and phones, while
/// different suffixes keep the fields of one test apart so unique constraints hold.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds the builder from a hash of `name`.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.username("main"), "user-7-main");
    /// ```
    pub fn username(&self, suffix: &str) -> String {
        format!("user-{}-{}", self.seed, suffix)
    }

    pub fn email(&self, suffix: &str) -> String {
        format!("user-{}-{}@example.com", self.seed, suffix)
    }

    /// Ten digits derived from the seed and `suffix`.
    pub fn phone(&self, suffix: &str) -> String {
        let mixed = suffix
            .bytes()
            .fold(self.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        format!("{:010}", mixed % 10_000_000_000)
    }
}

/// Assertions on JSON response envelopes.
pub mod assertions {
    use serde_json::Value;

    /// Asserts `body` is an envelope with the given `code` and `message`.
    pub fn assert_envelope(body: &Value, code: u16, message: &str) {
        assert_eq!(body["code"], code, "unexpected code in {}", body);
        assert_eq!(body["message"], message, "unexpected message in {}", body);
        assert!(
            body.get("content").is_some(),
            "envelope without content: {}",
            body
        );
    }

    /// Asserts `body` is an envelope whose `content` is `{}`.
    pub fn assert_empty_envelope(body: &Value, code: u16, message: &str) {
        assert_envelope(body, code, message);
        assert_eq!(
            body["content"],
            Value::Object(Default::default()),
            "expected empty content in {}",
            body
        );
    }
}
