//! Stateless JWT authentication.
//!
//! Tokens are minted at login with [`JwtAuth::create_access_token`].
//! [`optional_jwt_auth_middleware`] runs app-wide and attaches [`JwtClaims`];
//! handlers that need a caller take [`CurrentUser`].
//!
//! ```ignore
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let app = router.layer(axum::middleware::from_fn_with_state(auth, optional_jwt_auth_middleware));
//! ```

pub mod config;
pub mod current_user;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use current_user::{CurrentUser, SELLER_OR_ADMIN};
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::optional_jwt_auth_middleware;
