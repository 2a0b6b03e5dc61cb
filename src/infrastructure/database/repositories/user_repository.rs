use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, ListingSource, User, UserFilter,
    UserRepositoryInterface, UserStatus, UserType,
};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_type_to_domain(user_type: user::UserType) -> UserType {
    match user_type {
        user::UserType::Admin => UserType::Admin,
        user::UserType::Member => UserType::Member,
    }
}

fn domain_type_to_entity(user_type: UserType) -> user::UserType {
    match user_type {
        UserType::Admin => user::UserType::Admin,
        UserType::Member => user::UserType::Member,
    }
}

fn entity_status_to_domain(status: user::UserStatus) -> UserStatus {
    match status {
        user::UserStatus::Normal => UserStatus::Normal,
        user::UserStatus::Banned => UserStatus::Banned,
    }
}

fn domain_status_to_entity(status: UserStatus) -> user::UserStatus {
    match status {
        UserStatus::Normal => user::UserStatus::Normal,
        UserStatus::Banned => user::UserStatus::Banned,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        user_type: entity_type_to_domain(model.user_type),
        status: entity_status_to_domain(model.status),
        header_url: model.header_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn filtered(filter: &UserFilter) -> Select<user::Entity> {
    let mut query = user::Entity::find();

    if let Some(ref keyword) = filter.keyword {
        query = query.filter(
            user::Column::Username
                .contains(keyword)
                .or(user::Column::Email.contains(keyword)),
        );
    }
    if let Some(user_type) = filter.user_type {
        query = query.filter(user::Column::UserType.eq(domain_type_to_entity(user_type)));
    }
    if let Some(status) = filter.status {
        query = query.filter(user::Column::Status.eq(domain_status_to_entity(status)));
    }

    query
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ListingSource for UserRepository {
    type Item = User;
    type Filter = UserFilter;

    async fn count(&self, filter: &UserFilter) -> DomainResult<u64> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn fetch(&self, filter: &UserFilter, offset: u64, limit: u64) -> DomainResult<Vec<User>> {
        let models = filtered(filter)
            .order_by_asc(user::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }
}

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            username: Set(dto.username),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            user_type: Set(domain_type_to_entity(dto.user_type)),
            status: Set(user::UserStatus::Normal),
            header_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Username or email already exists".to_string())
            } else {
                DomainError::from(e)
            }
        })?;

        Ok(user_model_to_domain(model))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update_user_password(&self, id: i32, new_password_hash: &str) -> DomainResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(new_password_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }
        Ok(())
    }

    async fn update_user_header(&self, id: i32, header_url: &str) -> DomainResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::HeaderUrl, Expr::value(header_url))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }
        Ok(())
    }

    async fn set_user_statuses(&self, changes: &[(i32, UserStatus)]) -> DomainResult<u64> {
        let txn = self.db.begin().await?;
        let now = Utc::now();
        let mut updated = 0;

        for (id, status) in changes {
            let result = user::Entity::update_many()
                .col_expr(
                    user::Column::Status,
                    Expr::value(domain_status_to_entity(*status)),
                )
                .col_expr(user::Column::UpdatedAt, Expr::value(now))
                .filter(user::Column::Id.eq(*id))
                .exec(&txn)
                .await?;
            updated += result.rows_affected;
        }

        txn.commit().await?;
        Ok(updated)
    }

    async fn delete_users(&self, ids: &[i32]) -> DomainResult<u64> {
        let result = user::Entity::delete_many()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
