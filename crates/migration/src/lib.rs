pub use sea_orm_migration::prelude::*;

mod m20260512_000001_init;
mod m20260701_000002_book_home_flag;
mod m20260715_000003_contact_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260512_000001_init::Migration),
            Box::new(m20260701_000002_book_home_flag::Migration),
            Box::new(m20260715_000003_contact_messages::Migration),
        ]
    }
}
