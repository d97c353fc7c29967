// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pod::Table)
                    .if_not_exists()
                    .col(string_len(Pod::Id, 36).primary_key())
                    .col(string_len(Pod::RegionName, 255))
                    .col(string_len(Pod::AzName, 255))
                    .col(string_len_null(Pod::PodAzName, 255))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq-pod-region-name")
                    .table(Pod::Table)
                    .col(Pod::RegionName)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(ResourceRouting::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResourceRouting::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(ResourceRouting::TopId, 127))
                    .col(string_len_null(ResourceRouting::BottomId, 127))
                    .col(string_len(ResourceRouting::PodId, 36))
                    .col(string_len(ResourceRouting::ProjectId, 36))
                    .col(string_len(ResourceRouting::ResourceType, 64))
                    .col(timestamp_null(ResourceRouting::CreatedAt))
                    .col(timestamp_null(ResourceRouting::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-resource-routing-pod")
                            .from(ResourceRouting::Table, ResourceRouting::PodId)
                            .to(Pod::Table, Pod::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq-resource-routing-top-pod-type")
                    .table(ResourceRouting::Table)
                    .col(ResourceRouting::TopId)
                    .col(ResourceRouting::PodId)
                    .col(ResourceRouting::ResourceType)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(AsyncJob::Table)
                    .if_not_exists()
                    .col(string_len(AsyncJob::Id, 36).primary_key())
                    .col(string_len(AsyncJob::Type, 36))
                    .col(timestamp(AsyncJob::Timestamp))
                    .col(string_len(AsyncJob::Status, 36))
                    .col(string_len(AsyncJob::ResourceId, 127))
                    .col(string_len(AsyncJob::ExtraId, 36))
                    .col(string_len_null(AsyncJob::ProjectId, 36))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq-async-job-type-status-resource-extra")
                    .table(AsyncJob::Table)
                    .col(AsyncJob::Type)
                    .col(AsyncJob::Status)
                    .col(AsyncJob::ResourceId)
                    .col(AsyncJob::ExtraId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Quota::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quota::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Quota::ProjectId, 36))
                    .col(string_len(Quota::Resource, 255))
                    .col(big_integer(Quota::HardLimit))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq-quota-project-resource")
                    .table(Quota::Table)
                    .col(Quota::ProjectId)
                    .col(Quota::Resource)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(QuotaUsage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuotaUsage::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(QuotaUsage::ProjectId, 36))
                    .col(string_len(QuotaUsage::Resource, 255))
                    .col(big_integer(QuotaUsage::InUse))
                    .col(big_integer(QuotaUsage::Reserved))
                    .col(big_integer_null(QuotaUsage::UntilRefresh))
                    .col(timestamp_null(QuotaUsage::UpdatedAt))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq-quota-usage-project-resource")
                    .table(QuotaUsage::Table)
                    .col(QuotaUsage::ProjectId)
                    .col(QuotaUsage::Resource)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservation::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Reservation::Uuid, 36))
                    .col(big_integer(Reservation::UsageId))
                    .col(string_len(Reservation::ProjectId, 36))
                    .col(string_len(Reservation::Resource, 255))
                    .col(big_integer(Reservation::Delta))
                    .col(timestamp_null(Reservation::Expire))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservation-usage")
                            .from(Reservation::Table, Reservation::UsageId)
                            .to(QuotaUsage::Table, QuotaUsage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq-reservation-uuid")
                    .table(Reservation::Table)
                    .col(Reservation::Uuid)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-reservation-expire")
                    .table(Reservation::Table)
                    .col(Reservation::Expire)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuotaUsage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quota::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AsyncJob::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ResourceRouting::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pod::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Pod {
    Table,
    Id,
    RegionName,
    AzName,
    PodAzName,
}

#[derive(DeriveIden)]
enum ResourceRouting {
    Table,
    Id,
    TopId,
    BottomId,
    PodId,
    ProjectId,
    ResourceType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AsyncJob {
    Table,
    Id,
    Type,
    Timestamp,
    Status,
    ResourceId,
    ExtraId,
    ProjectId,
}

#[derive(DeriveIden)]
enum Quota {
    Table,
    Id,
    ProjectId,
    Resource,
    HardLimit,
}

#[derive(DeriveIden)]
enum QuotaUsage {
    Table,
    Id,
    ProjectId,
    Resource,
    InUse,
    Reserved,
    UntilRefresh,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reservation {
    Table,
    Id,
    Uuid,
    UsageId,
    ProjectId,
    Resource,
    Delta,
    Expire,
}
