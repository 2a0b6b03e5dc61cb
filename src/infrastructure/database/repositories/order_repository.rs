use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use super::scenic_repository::{domain_category_to_entity, entity_category_to_domain};
use crate::domain::{
    AuditStatus, DomainError, DomainResult, ListingSource, NewOrder, Order, OrderFilter,
    OrderRepositoryInterface, ScenicCategory,
};
use crate::infrastructure::database::entities::{order, scenic};

pub struct OrderRepository {
    db: DatabaseConnection,
}

impl OrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn entity_audit_to_domain(audit: order::AuditStatus) -> AuditStatus {
    match audit {
        order::AuditStatus::Pending => AuditStatus::Pending,
        order::AuditStatus::Approved => AuditStatus::Approved,
        order::AuditStatus::Rejected => AuditStatus::Rejected,
    }
}

fn domain_audit_to_entity(audit: AuditStatus) -> order::AuditStatus {
    match audit {
        AuditStatus::Pending => order::AuditStatus::Pending,
        AuditStatus::Approved => order::AuditStatus::Approved,
        AuditStatus::Rejected => order::AuditStatus::Rejected,
    }
}

fn order_model_to_domain(model: order::Model, scenic: Option<scenic::Model>) -> Order {
    let (scenic_name, category) = match scenic {
        Some(s) => (s.name, entity_category_to_domain(s.category)),
        None => (String::new(), ScenicCategory::Spot),
    };

    Order {
        id: model.id,
        scenic_id: model.scenic_id,
        scenic_name,
        category,
        username: model.username,
        quantity: model.quantity,
        audit: entity_audit_to_domain(model.audit),
        created_at: model.created_at,
    }
}

/// Orders joined to their scenic so the category filter can apply.
fn filtered(filter: &OrderFilter) -> Select<order::Entity> {
    let mut query = order::Entity::find().join(JoinType::InnerJoin, order::Relation::Scenic.def());

    if let Some(category) = filter.category {
        query = query.filter(scenic::Column::Category.eq(domain_category_to_entity(category)));
    }
    if let Some(audit) = filter.audit {
        query = query.filter(order::Column::Audit.eq(domain_audit_to_entity(audit)));
    }

    query
}

#[async_trait]
impl ListingSource for OrderRepository {
    type Item = Order;
    type Filter = OrderFilter;

    async fn count(&self, filter: &OrderFilter) -> DomainResult<u64> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn fetch(&self, filter: &OrderFilter, offset: u64, limit: u64) -> DomainResult<Vec<Order>> {
        let rows = filtered(filter)
            .select_also(scenic::Entity)
            .order_by_asc(order::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(order, scenic)| order_model_to_domain(order, scenic))
            .collect())
    }
}

#[async_trait]
impl OrderRepositoryInterface for OrderRepository {
    async fn create_order(&self, new: NewOrder) -> DomainResult<Order> {
        let scenic = scenic::Entity::find_by_id(new.scenic_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Scenic", "id", new.scenic_id))?;

        let model = order::ActiveModel {
            scenic_id: Set(new.scenic_id),
            username: Set(new.username),
            quantity: Set(new.quantity.max(1)),
            audit: Set(order::AuditStatus::Pending),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(order_model_to_domain(model, Some(scenic)))
    }

    async fn update_audit(&self, id: i32, audit: AuditStatus) -> DomainResult<bool> {
        let result = order::Entity::update_many()
            .col_expr(order::Column::Audit, Expr::value(domain_audit_to_entity(audit)))
            .filter(order::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
