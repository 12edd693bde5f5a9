use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use crate::{
    entity::{book, book_borrow, role, user, user_role},
    error::{AccountError, AccountResult, UserKey},
    models::{BookBorrow, NewUser, User},
    repository::UserRepository,
    role::Role,
};

/// PostgreSQL-backed directory.
///
/// Writes check username ownership inside their transaction and report
/// [`AccountError::DuplicateUsername`]. The unique index over
/// `users.username` catches concurrent writers that pass the check; that
/// violation maps to the same error.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> AccountError {
    AccountError::Storage(format!("Database error: {}", e))
}

fn write_error(e: DbErr, username: &str) -> AccountError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AccountError::DuplicateUsername(username.to_string())
        }
        _ => db_error(e),
    }
}

/// Attach roles and borrows (with their books) to a user row.
async fn load_user<C: ConnectionTrait>(conn: &C, model: user::Model) -> AccountResult<User> {
    let roles = model
        .find_related(role::Entity)
        .order_by_asc(role::Column::Id)
        .all(conn)
        .await
        .map_err(db_error)?;

    let borrow_rows = book_borrow::Entity::find()
        .filter(book_borrow::Column::UserId.eq(model.id))
        .order_by_asc(book_borrow::Column::Id)
        .find_also_related(book::Entity)
        .all(conn)
        .await
        .map_err(db_error)?;

    let borrows = borrow_rows
        .into_iter()
        .map(|(borrow, book)| {
            let book = book.ok_or_else(|| {
                AccountError::Storage(format!("Borrow {} references a missing book", borrow.id))
            })?;
            Ok(BookBorrow {
                id: borrow.id,
                book: book.into(),
                borrowed_at: borrow.borrowed_at,
                returned_at: borrow.returned_at,
            })
        })
        .collect::<AccountResult<Vec<_>>>()?;

    Ok(User {
        id: model.id,
        username: model.username,
        password: model.password,
        first_name: model.first_name,
        last_name: model.last_name,
        roles: roles.into_iter().map(Role::from).collect(),
        borrows,
    })
}

/// Reject `username` if a user other than `except` already holds it.
async fn ensure_username_free<C: ConnectionTrait>(
    conn: &C,
    username: &str,
    except: Option<i64>,
) -> AccountResult<()> {
    let mut query = user::Entity::find().filter(user::Column::Username.eq(username));
    if let Some(id) = except {
        query = query.filter(user::Column::Id.ne(id));
    }

    match query.one(conn).await.map_err(db_error)? {
        Some(_) => Err(AccountError::DuplicateUsername(username.to_string())),
        None => Ok(()),
    }
}

/// Map canonical names to role rows; unknown names are rejected.
async fn resolve_roles<C: ConnectionTrait>(
    conn: &C,
    roles: &[Role],
) -> AccountResult<Vec<role::Model>> {
    if roles.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<&str> = roles.iter().map(Role::name).collect();
    let found = role::Entity::find()
        .filter(role::Column::Name.is_in(names.iter().copied()))
        .all(conn)
        .await
        .map_err(db_error)?;

    let unknown: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !found.iter().any(|r| r.name == *name))
        .collect();
    if !unknown.is_empty() {
        return Err(AccountError::Validation(format!(
            "Unknown role(s): {}",
            unknown.join(", ")
        )));
    }

    Ok(found)
}

async fn assign_roles<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    roles: &[role::Model],
) -> AccountResult<()> {
    if roles.is_empty() {
        return Ok(());
    }

    user_role::Entity::insert_many(roles.iter().map(|r| user_role::ActiveModel {
        user_id: Set(user_id),
        role_id: Set(r.id),
    }))
    .exec_without_returning(conn)
    .await
    .map_err(db_error)?;

    Ok(())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_username(&self, username: &str) -> AccountResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        match model {
            Some(model) => load_user(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn get_by_id(&self, id: i64) -> AccountResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        match model {
            Some(model) => load_user(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list(&self) -> AccountResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let mut users = Vec::with_capacity(models.len());
        for model in models {
            users.push(load_user(&self.db, model).await?);
        }
        Ok(users)
    }

    async fn create(&self, input: NewUser) -> AccountResult<User> {
        let txn = self.db.begin().await.map_err(db_error)?;

        ensure_username_free(&txn, &input.username, None).await?;
        let roles = resolve_roles(&txn, &input.roles).await?;

        let model = user::ActiveModel {
            id: NotSet,
            username: Set(input.username.clone()),
            password: Set(input.password),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
        }
        .insert(&txn)
        .await
        .map_err(|e| write_error(e, &input.username))?;

        assign_roles(&txn, model.id, &roles).await?;
        txn.commit().await.map_err(db_error)?;

        tracing::info!(user_id = model.id, username = %model.username, "Created user");
        load_user(&self.db, model).await
    }

    async fn update(&self, user: User) -> AccountResult<User> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let existing = user::Entity::find_by_id(user.id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(AccountError::NotFound(UserKey::Id(user.id)))?;

        ensure_username_free(&txn, &user.username, Some(user.id)).await?;
        let roles = resolve_roles(&txn, &user.roles).await?;

        let mut active: user::ActiveModel = existing.into();
        active.username = Set(user.username.clone());
        active.password = Set(user.password);
        active.first_name = Set(user.first_name);
        active.last_name = Set(user.last_name);

        let model = active
            .update(&txn)
            .await
            .map_err(|e| write_error(e, &user.username))?;

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(model.id))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        assign_roles(&txn, model.id, &roles).await?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(user_id = model.id, "Updated user");
        load_user(&self.db, model).await
    }

    async fn delete(&self, id: i64) -> AccountResult<bool> {
        // user_roles and book_borrows cascade
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
