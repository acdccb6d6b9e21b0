//! Users Domain
//!
//! Accounts, their addresses and password login.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /user routes, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← argon2 hashing, JWT minting, signup hook
//! └──────┬──────┘       (wishlist + cart for customers)
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← users + addresses, in-memory or PostgreSQL
//! └─────────────┘
//! ```
//!
//! ```rust,ignore
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_shopping::{InMemoryCartRepository, InMemoryWishlistRepository};
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let service = UserService::new(
//!     InMemoryUserRepository::new(),
//!     InMemoryWishlistRepository::new(),
//!     InMemoryCartRepository::new(),
//!     JwtAuth::new(&JwtConfig::from_env()?),
//! );
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    Address, CreateAddress, CreateUser, LoginRequest, LoginResponse, MessageResponse, NewUser,
    RoleType, UpdateUser, User, UserResponse,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
