use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait, Value,
};

use crate::domain::{
    DomainResult, ListingSource, NewScenic, Scenic, ScenicCategory, ScenicFilter,
    ScenicRepositoryInterface,
};
use crate::infrastructure::database::entities::{order, scenic};

pub struct ScenicRepository {
    db: DatabaseConnection,
}

impl ScenicRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(super) fn entity_category_to_domain(category: scenic::ScenicCategory) -> ScenicCategory {
    match category {
        scenic::ScenicCategory::Spot => ScenicCategory::Spot,
        scenic::ScenicCategory::Product => ScenicCategory::Product,
    }
}

pub(super) fn domain_category_to_entity(category: ScenicCategory) -> scenic::ScenicCategory {
    match category {
        ScenicCategory::Spot => scenic::ScenicCategory::Spot,
        ScenicCategory::Product => scenic::ScenicCategory::Product,
    }
}

fn scenic_model_to_domain(model: scenic::Model) -> Scenic {
    Scenic {
        id: model.id,
        name: model.name,
        image: model.image,
        category: entity_category_to_domain(model.category),
        recommended: model.recommended,
        created_at: model.created_at,
    }
}

fn filtered(filter: &ScenicFilter) -> Select<scenic::Entity> {
    let mut query = scenic::Entity::find();

    if let Some(category) = filter.category {
        query = query.filter(scenic::Column::Category.eq(domain_category_to_entity(category)));
    }
    if let Some(ref keyword) = filter.keyword {
        query = query.filter(scenic::Column::Name.contains(keyword));
    }
    if let Some(recommended) = filter.recommended {
        query = query.filter(scenic::Column::Recommended.eq(recommended));
    }

    query
}

#[async_trait]
impl ListingSource for ScenicRepository {
    type Item = Scenic;
    type Filter = ScenicFilter;

    async fn count(&self, filter: &ScenicFilter) -> DomainResult<u64> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn fetch(
        &self,
        filter: &ScenicFilter,
        offset: u64,
        limit: u64,
    ) -> DomainResult<Vec<Scenic>> {
        let models = filtered(filter)
            .order_by_asc(scenic::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(scenic_model_to_domain).collect())
    }
}

#[async_trait]
impl ScenicRepositoryInterface for ScenicRepository {
    async fn create_scenic(&self, new: NewScenic) -> DomainResult<Scenic> {
        let model = scenic::ActiveModel {
            name: Set(new.name),
            image: Set(new.image),
            category: Set(domain_category_to_entity(new.category)),
            recommended: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(scenic_model_to_domain(model))
    }

    async fn get_scenic(&self, id: i32) -> DomainResult<Option<Scenic>> {
        let model = scenic::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(scenic_model_to_domain))
    }

    async fn set_recommended(&self, id: i32, recommended: bool) -> DomainResult<bool> {
        let result = scenic::Entity::update_many()
            .col_expr(scenic::Column::Recommended, Expr::value(recommended))
            .filter(scenic::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn recommend_within_limit(&self, id: i32, limit: u64) -> DomainResult<bool> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let result = scenic::Entity::update_many()
            .col_expr(scenic::Column::Recommended, Expr::value(true))
            .filter(scenic::Column::Id.eq(id))
            .filter(Expr::cust_with_values(
                "(SELECT COUNT(*) FROM scenics WHERE recommended = ?) < ?",
                [Value::from(true), Value::from(limit)],
            ))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_scenics(&self, ids: &[i32]) -> DomainResult<u64> {
        let txn = self.db.begin().await?;

        order::Entity::delete_many()
            .filter(order::Column::ScenicId.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;
        let result = scenic::Entity::delete_many()
            .filter(scenic::Column::Id.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }
}
