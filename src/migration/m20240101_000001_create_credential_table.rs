use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CredentialEntry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CredentialEntry::Key)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CredentialEntry::Value).text().not_null())
                    .col(
                        ColumnDef::new(CredentialEntry::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CredentialEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CredentialEntry {
    Table,
    Key,
    Value,
    UpdatedAt,
}
