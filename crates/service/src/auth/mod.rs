//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, password and social login, refresh-token rotation and
//! logout live here. Access tokens are produced by a [`token::TokenIssuer`]
//! and social provider tokens are checked by a [`social::SocialTokenVerifier`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;
pub mod social;
pub mod token;

pub use service::{AuthService, AuthSettings};
pub use token::{Claims, JwtTokenIssuer, TokenIssuer};
