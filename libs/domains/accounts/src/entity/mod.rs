//! SeaORM entities backing [`PgUserRepository`](crate::postgres::PgUserRepository).
//!
//! Tables: `users`, `roles`, `user_roles` (join), `books`, `book_borrows`.

pub mod book;
pub mod book_borrow;
pub mod role;
pub mod user;
pub mod user_role;
