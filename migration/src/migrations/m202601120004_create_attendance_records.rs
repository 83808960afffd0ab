use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601120004_create_attendance_records"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("attendance_records"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("student_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("class_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("marked_by")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("attendance_date")).date().not_null())
                    .col(ColumnDef::new(Alias::new("status")).string_len(20).not_null())
                    .col(ColumnDef::new(Alias::new("notes")).text().null())
                    .col(ColumnDef::new(Alias::new("marked_at_time")).time().null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    // One record per student per calendar day.
                    .index(
                        Index::create()
                            .name("unique_student_date_attendance")
                            .col(Alias::new("student_id"))
                            .col(Alias::new("attendance_date"))
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_student")
                            .from(Alias::new("attendance_records"), Alias::new("student_id"))
                            .to(Alias::new("students"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_class")
                            .from(Alias::new("attendance_records"), Alias::new("class_id"))
                            .to(Alias::new("classes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_marked_by")
                            .from(Alias::new("attendance_records"), Alias::new("marked_by"))
                            .to(Alias::new("users"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_date")
                    .table(Alias::new("attendance_records"))
                    .col(Alias::new("attendance_date"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_status")
                    .table(Alias::new("attendance_records"))
                    .col(Alias::new("status"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_class_date")
                    .table(Alias::new("attendance_records"))
                    .col(Alias::new("class_id"))
                    .col(Alias::new("attendance_date"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("attendance_records")).to_owned())
            .await
    }
}
