use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favorites::UserId).string().not_null())
                    .col(ColumnDef::new(Favorites::ImdbId).string().not_null())
                    .col(ColumnDef::new(Favorites::Title).string().not_null())
                    .col(ColumnDef::new(Favorites::Year).string().not_null())
                    .col(ColumnDef::new(Favorites::Poster).string().null())
                    .col(ColumnDef::new(Favorites::MovieDataJson).text().not_null())
                    .col(ColumnDef::new(Favorites::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorites_user_imdb")
                    .table(Favorites::Table)
                    .col(Favorites::UserId)
                    .col(Favorites::ImdbId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorites_user_created")
                    .table(Favorites::Table)
                    .col(Favorites::UserId)
                    .col(Favorites::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    Id,
    UserId,
    ImdbId,
    Title,
    Year,
    Poster,
    MovieDataJson,
    CreatedAt,
}
