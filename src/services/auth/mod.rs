pub mod factory;
pub mod revocation;
pub mod token_validator;

pub use factory::{build_admission_gate, build_revocation_store};
pub use token_validator::{JwtKey, JwtValidator, TokenValidator};
