use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601120003_create_students"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("students"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("student_id")).string_len(20).not_null())
                    .col(ColumnDef::new(Alias::new("first_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("last_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("date_of_birth")).date().not_null())
                    .col(ColumnDef::new(Alias::new("gender")).string_len(20).not_null())
                    .col(ColumnDef::new(Alias::new("parent_name")).string().null())
                    .col(ColumnDef::new(Alias::new("parent_phone")).string_len(20).null())
                    .col(ColumnDef::new(Alias::new("parent_email")).string().null())
                    .col(ColumnDef::new(Alias::new("address")).text().null())
                    .col(ColumnDef::new(Alias::new("class_id")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("enrollment_date")).date().not_null())
                    .col(ColumnDef::new(Alias::new("status")).string_len(20).not_null().default("active"))
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .index(Index::create().col(Alias::new("student_id")).unique())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_class")
                            .from(Alias::new("students"), Alias::new("class_id"))
                            .to(Alias::new("classes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_class_id")
                    .table(Alias::new("students"))
                    .col(Alias::new("class_id"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_status")
                    .table(Alias::new("students"))
                    .col(Alias::new("status"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_name")
                    .table(Alias::new("students"))
                    .col(Alias::new("first_name"))
                    .col(Alias::new("last_name"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("students")).to_owned())
            .await
    }
}
