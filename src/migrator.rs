use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_officer_tables::Migration),
            Box::new(m20240601_000002_create_order_tables::Migration),
            Box::new(m20240601_000003_create_reason_tables::Migration),
            Box::new(m20240601_000004_create_complaint_tables::Migration),
        ]
    }
}

mod m20240601_000001_create_officer_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_officer_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CollectionOfficer::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CollectionOfficer::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(CollectionOfficer::EmpId)
                                .string_len(20)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(CollectionOfficer::FirstNameEnglish)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CollectionOfficer::LastNameEnglish)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CollectionOfficer::FirstNameSinhala).string().null())
                        .col(ColumnDef::new(CollectionOfficer::LastNameSinhala).string().null())
                        .col(ColumnDef::new(CollectionOfficer::FirstNameTamil).string().null())
                        .col(ColumnDef::new(CollectionOfficer::LastNameTamil).string().null())
                        .col(ColumnDef::new(CollectionOfficer::PhoneCode01).string().null())
                        .col(ColumnDef::new(CollectionOfficer::PhoneNumber01).string().null())
                        .col(ColumnDef::new(CollectionOfficer::Nic).string().null())
                        .col(ColumnDef::new(CollectionOfficer::Email).string().null())
                        .col(ColumnDef::new(CollectionOfficer::Image).string().null())
                        .col(ColumnDef::new(CollectionOfficer::JobRole).string().not_null())
                        .col(ColumnDef::new(CollectionOfficer::Status).string().not_null())
                        .col(ColumnDef::new(CollectionOfficer::Password).string().not_null())
                        .col(
                            ColumnDef::new(CollectionOfficer::PasswordUpdated)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(CollectionOfficer::DistributedCenterId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(CollectionOfficer::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_collectionofficer_center")
                        .table(CollectionOfficer::Table)
                        .col(CollectionOfficer::DistributedCenterId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(VehicleRegistration::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(VehicleRegistration::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(VehicleRegistration::CoId).integer().not_null())
                        .col(ColumnDef::new(VehicleRegistration::VType).string().not_null())
                        .col(ColumnDef::new(VehicleRegistration::VRegNo).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_vehicleregistration_officer")
                                .from(VehicleRegistration::Table, VehicleRegistration::CoId)
                                .to(CollectionOfficer::Table, CollectionOfficer::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(VehicleRegistration::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CollectionOfficer::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(crate) enum CollectionOfficer {
        #[sea_orm(iden = "collectionofficer")]
        Table,
        Id,
        EmpId,
        FirstNameEnglish,
        LastNameEnglish,
        FirstNameSinhala,
        LastNameSinhala,
        FirstNameTamil,
        LastNameTamil,
        #[sea_orm(iden = "phone_code01")]
        PhoneCode01,
        #[sea_orm(iden = "phone_number01")]
        PhoneNumber01,
        Nic,
        Email,
        Image,
        JobRole,
        Status,
        Password,
        PasswordUpdated,
        DistributedCenterId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum VehicleRegistration {
        #[sea_orm(iden = "vehicleregistration")]
        Table,
        Id,
        CoId,
        #[sea_orm(iden = "v_type")]
        VType,
        #[sea_orm(iden = "v_reg_no")]
        VRegNo,
    }
}

mod m20240601_000002_create_order_tables {

    use super::m20240601_000001_create_officer_tables::CollectionOfficer;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Orders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Orders::Title).string().null())
                        .col(ColumnDef::new(Orders::FullName).string().null())
                        .col(ColumnDef::new(Orders::PhoneCode1).string().null())
                        .col(ColumnDef::new(Orders::Phone1).string().null())
                        .col(ColumnDef::new(Orders::PhoneCode2).string().null())
                        .col(ColumnDef::new(Orders::Phone2).string().null())
                        .col(ColumnDef::new(Orders::BuildingType).string().null())
                        .col(ColumnDef::new(Orders::HouseNo).string().null())
                        .col(ColumnDef::new(Orders::StreetName).string().null())
                        .col(ColumnDef::new(Orders::City).string().null())
                        .col(
                            ColumnDef::new(Orders::FullTotal)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Orders::DeliveryType).string().null())
                        .col(ColumnDef::new(Orders::ScheduleDate).date().null())
                        .col(ColumnDef::new(Orders::ScheduleTime).string().null())
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProcessOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProcessOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ProcessOrders::OrderId).integer().not_null())
                        .col(
                            ColumnDef::new(ProcessOrders::InvNo)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ProcessOrders::PaymentMethod).string().not_null())
                        .col(
                            ColumnDef::new(ProcessOrders::Amount)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ProcessOrders::IsPaid)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(ProcessOrders::Status).string().not_null())
                        .col(
                            ColumnDef::new(ProcessOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_processorders_order")
                                .from(ProcessOrders::Table, ProcessOrders::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DriverOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DriverOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(DriverOrders::DriverId).integer().not_null())
                        .col(ColumnDef::new(DriverOrders::OrderId).integer().not_null())
                        .col(
                            ColumnDef::new(DriverOrders::DrvStatus)
                                .string_len(32)
                                .not_null()
                                .default("Todo"),
                        )
                        .col(
                            ColumnDef::new(DriverOrders::IsHandOver)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(DriverOrders::HandOverOfficer).integer().null())
                        .col(ColumnDef::new(DriverOrders::HandOverPrice).decimal_len(15, 2).null())
                        .col(
                            ColumnDef::new(DriverOrders::HandOverTime)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriverOrders::HandedOverAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(DriverOrders::Signature).text().null())
                        .col(
                            ColumnDef::new(DriverOrders::StartTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DriverOrders::CompleteTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DriverOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_driverorders_driver")
                                .from(DriverOrders::Table, DriverOrders::DriverId)
                                .to(CollectionOfficer::Table, CollectionOfficer::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_driverorders_processorder")
                                .from(DriverOrders::Table, DriverOrders::OrderId)
                                .to(ProcessOrders::Table, ProcessOrders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_driverorders_driver_status")
                        .table(DriverOrders::Table)
                        .col(DriverOrders::DriverId)
                        .col(DriverOrders::DrvStatus)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_driverorders_order")
                        .table(DriverOrders::Table)
                        .col(DriverOrders::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DriverOrders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProcessOrders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Orders {
        Table,
        Id,
        Title,
        FullName,
        #[sea_orm(iden = "phone_code1")]
        PhoneCode1,
        #[sea_orm(iden = "phone1")]
        Phone1,
        #[sea_orm(iden = "phone_code2")]
        PhoneCode2,
        #[sea_orm(iden = "phone2")]
        Phone2,
        BuildingType,
        HouseNo,
        StreetName,
        City,
        FullTotal,
        DeliveryType,
        ScheduleDate,
        ScheduleTime,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(crate) enum ProcessOrders {
        #[sea_orm(iden = "processorders")]
        Table,
        Id,
        OrderId,
        InvNo,
        PaymentMethod,
        Amount,
        IsPaid,
        Status,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(crate) enum DriverOrders {
        #[sea_orm(iden = "driverorders")]
        Table,
        Id,
        DriverId,
        OrderId,
        DrvStatus,
        IsHandOver,
        HandOverOfficer,
        HandOverPrice,
        HandOverTime,
        HandedOverAt,
        Signature,
        StartTime,
        CompleteTime,
        CreatedAt,
    }
}

mod m20240601_000003_create_reason_tables {

    use super::m20240601_000002_create_order_tables::DriverOrders;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_reason_tables"
        }
    }

    fn reason_table<T: IntoIden + Copy + 'static>(table: T, cols: ReasonCols<T>) -> TableCreateStatement {
        Table::create()
            .table(table)
            .if_not_exists()
            .col(
                ColumnDef::new(cols.id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(cols.index_no).integer().not_null())
            .col(ColumnDef::new(cols.english).string().not_null())
            .col(ColumnDef::new(cols.sinhala).string().not_null())
            .col(ColumnDef::new(cols.tamil).string().not_null())
            .col(
                ColumnDef::new(cols.created_at)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned()
    }

    struct ReasonCols<T> {
        id: T,
        index_no: T,
        english: T,
        sinhala: T,
        tamil: T,
        created_at: T,
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(reason_table(
                    HoldReason::Table,
                    ReasonCols {
                        id: HoldReason::Id,
                        index_no: HoldReason::IndexNo,
                        english: HoldReason::RsnEnglish,
                        sinhala: HoldReason::RsnSinhala,
                        tamil: HoldReason::RsnTamil,
                        created_at: HoldReason::CreatedAt,
                    },
                ))
                .await?;

            manager
                .create_table(reason_table(
                    ReturnReason::Table,
                    ReasonCols {
                        id: ReturnReason::Id,
                        index_no: ReturnReason::IndexNo,
                        english: ReturnReason::RsnEnglish,
                        sinhala: ReturnReason::RsnSinhala,
                        tamil: ReturnReason::RsnTamil,
                        created_at: ReturnReason::CreatedAt,
                    },
                ))
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DriverHoldOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DriverHoldOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(DriverHoldOrders::DrvOrderId).integer().not_null())
                        .col(ColumnDef::new(DriverHoldOrders::HoldReasonId).integer().not_null())
                        .col(ColumnDef::new(DriverHoldOrders::Note).text().null())
                        .col(
                            ColumnDef::new(DriverHoldOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_driverholdorders_driverorder")
                                .from(DriverHoldOrders::Table, DriverHoldOrders::DrvOrderId)
                                .to(DriverOrders::Table, DriverOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_driverholdorders_reason")
                                .from(DriverHoldOrders::Table, DriverHoldOrders::HoldReasonId)
                                .to(HoldReason::Table, HoldReason::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DriverReturnOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DriverReturnOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(DriverReturnOrders::DrvOrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriverReturnOrders::ReturnReasonId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(DriverReturnOrders::Note).text().null())
                        .col(
                            ColumnDef::new(DriverReturnOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_driverreturnorders_driverorder")
                                .from(DriverReturnOrders::Table, DriverReturnOrders::DrvOrderId)
                                .to(DriverOrders::Table, DriverOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_driverreturnorders_reason")
                                .from(
                                    DriverReturnOrders::Table,
                                    DriverReturnOrders::ReturnReasonId,
                                )
                                .to(ReturnReason::Table, ReturnReason::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DriverReturnOrders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(DriverHoldOrders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ReturnReason::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(HoldReason::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum HoldReason {
        #[sea_orm(iden = "holdreason")]
        Table,
        Id,
        IndexNo,
        RsnEnglish,
        RsnSinhala,
        RsnTamil,
        CreatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum ReturnReason {
        #[sea_orm(iden = "returnreason")]
        Table,
        Id,
        IndexNo,
        RsnEnglish,
        RsnSinhala,
        RsnTamil,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum DriverHoldOrders {
        #[sea_orm(iden = "driverholdorders")]
        Table,
        Id,
        DrvOrderId,
        HoldReasonId,
        Note,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum DriverReturnOrders {
        #[sea_orm(iden = "driverreturnorders")]
        Table,
        Id,
        DrvOrderId,
        ReturnReasonId,
        Note,
        CreatedAt,
    }
}

mod m20240601_000004_create_complaint_tables {

    use super::m20240601_000001_create_officer_tables::CollectionOfficer;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_complaint_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SystemApplications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SystemApplications::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(SystemApplications::AppName)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ComplainCategory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ComplainCategory::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ComplainCategory::AppId).integer().not_null())
                        .col(
                            ColumnDef::new(ComplainCategory::CategoryEnglish)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ComplainCategory::CategorySinhala).string().null())
                        .col(ColumnDef::new(ComplainCategory::CategoryTamil).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_complaincategory_app")
                                .from(ComplainCategory::Table, ComplainCategory::AppId)
                                .to(SystemApplications::Table, SystemApplications::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DriverComplains::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DriverComplains::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(DriverComplains::DriverId).integer().not_null())
                        .col(
                            ColumnDef::new(DriverComplains::ComplainCategory)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriverComplains::RefNo)
                                .string_len(40)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(DriverComplains::Complain).text().not_null())
                        .col(ColumnDef::new(DriverComplains::Reply).text().null())
                        .col(ColumnDef::new(DriverComplains::Status).string().not_null())
                        .col(ColumnDef::new(DriverComplains::AdminReplyBy).integer().null())
                        .col(
                            ColumnDef::new(DriverComplains::ReplyTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DriverComplains::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_drivercomplains_driver")
                                .from(DriverComplains::Table, DriverComplains::DriverId)
                                .to(CollectionOfficer::Table, CollectionOfficer::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_drivercomplains_category")
                                .from(DriverComplains::Table, DriverComplains::ComplainCategory)
                                .to(ComplainCategory::Table, ComplainCategory::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_drivercomplains_driver")
                        .table(DriverComplains::Table)
                        .col(DriverComplains::DriverId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DriverComplains::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ComplainCategory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SystemApplications::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum SystemApplications {
        #[sea_orm(iden = "systemapplications")]
        Table,
        Id,
        AppName,
    }

    #[derive(DeriveIden)]
    enum ComplainCategory {
        #[sea_orm(iden = "complaincategory")]
        Table,
        Id,
        AppId,
        CategoryEnglish,
        CategorySinhala,
        CategoryTamil,
    }

    #[derive(DeriveIden)]
    enum DriverComplains {
        #[sea_orm(iden = "drivercomplains")]
        Table,
        Id,
        DriverId,
        ComplainCategory,
        RefNo,
        Complain,
        Reply,
        Status,
        AdminReplyBy,
        ReplyTime,
        CreatedAt,
    }
}
