//! Accounts Domain
//!
//! Patron self-service and staff user management for the library directory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌───────────┐
//! │  Handlers   │ ← │ Principal │  identity from verified JWT claims
//! └──────┬──────┘   └───────────┘
//!        │          ┌───────────┐
//!        │        ← │ RoleGate  │  exact role match on /users routes
//!        │          └───────────┘
//! ┌──────▼──────┐
//! │   Service   │  ← Directory rules: not-found, uniqueness, profile scope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← In-memory or PostgreSQL (SeaORM)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Projection  │  ← Password-free external views
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_accounts::{
//!     handlers, DirectoryService, InMemoryUserRepository, RoleGate,
//! };
//!
//! let service = DirectoryService::new(InMemoryUserRepository::new());
//! let router = handlers::router(service, RoleGate::default());
//! ```

pub mod authz;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod principal;
pub mod projection;
pub mod repository;
pub mod role;
pub mod service;

pub use authz::{RoleGate, require_role};
pub use error::{AccountError, AccountResult, UserKey};
pub use models::{Book, BookBorrow, ModifyUser, NewUser, ProfileUpdate, User};
pub use postgres::PgUserRepository;
pub use principal::Principal;
pub use projection::UserProjection;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use role::{ROLE_PREFIX, Role};
pub use service::DirectoryService;
