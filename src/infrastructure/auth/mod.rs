//! Authentication infrastructure
//!
//! Token issuance and validation backed by a process-wide symmetric secret.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService, TOKEN_ISSUER};
