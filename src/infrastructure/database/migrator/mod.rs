//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20230105_000001_create_users;
mod m20230105_000002_create_scenics;
mod m20230105_000003_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230105_000001_create_users::Migration),
            Box::new(m20230105_000002_create_scenics::Migration),
            Box::new(m20230105_000003_create_orders::Migration),
        ]
    }
}
