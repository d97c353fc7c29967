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

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use sea_orm::entity::*;
use sea_orm::query::*;
use sea_orm::sea_query::Expr;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::db::entity::{
    prelude::{Quota as DbQuota, QuotaUsage as DbQuotaUsage},
    quota as db_quota, quota_usage as db_usage, reservation as db_reservation,
};
use crate::error::DbContextExt;
use crate::quota::error::QuotaProviderError;
use crate::quota::types::{QuotaUsageSnapshot, RefreshPolicy, ReservationOutcome};

/// Reserve the deltas against the project limits.
///
/// One transaction covers the whole request. Usage rows are locked in the
/// resource name order the sorted map iterates in; rows of resources never
/// used before are created with zero counters. The limit check runs against
/// the locked counters, so two racing reservations serialize on the row
/// locks and the second one sees the first one's `reserved` increment.
///
/// Positive deltas insert a reservation row and move `reserved`; negative
/// deltas are a release and are folded into `in_use` immediately, since they
/// can never violate a limit. Any offending resource aborts everything.
pub async fn reserve<'a>(
    db: &DatabaseConnection,
    project_id: &'a str,
    deltas: &BTreeMap<String, i64>,
    expire: DateTime<Utc>,
    refresh: &RefreshPolicy,
) -> Result<ReservationOutcome, QuotaProviderError> {
    let now = Utc::now().naive_utc();
    let txn = db
        .begin()
        .await
        .context("starting reservation transaction")?;

    // Lock or create the usage row of every touched resource.
    let mut usages: BTreeMap<String, db_usage::Model> = BTreeMap::new();
    for resource in deltas.keys() {
        let usage = match DbQuotaUsage::find()
            .filter(db_usage::Column::ProjectId.eq(project_id))
            .filter(db_usage::Column::Resource.eq(resource.as_str()))
            .lock_exclusive()
            .one(&txn)
            .await
            .context("locking quota usage")?
        {
            Some(usage) => usage,
            None => db_usage::ActiveModel {
                id: NotSet,
                project_id: Set(project_id.to_string()),
                resource: Set(resource.clone()),
                in_use: Set(0),
                reserved: Set(0),
                until_refresh: Set((refresh.until_refresh > 0).then_some(refresh.until_refresh)),
                updated_at: Set(Some(now)),
            }
            .insert(&txn)
            .await
            .context("creating quota usage")?,
        };
        usages.insert(resource.clone(), usage);
    }

    let limits: BTreeMap<String, i64> = DbQuota::find()
        .filter(db_quota::Column::ProjectId.eq(project_id))
        .filter(db_quota::Column::Resource.is_in(deltas.keys().map(String::as_str)))
        .all(&txn)
        .await
        .context("reading quota limits")?
        .into_iter()
        .map(|limit| (limit.resource, limit.hard_limit))
        .collect();

    // The limit check. Offending resources abort the whole request.
    let mut overs: BTreeMap<String, QuotaUsageSnapshot> = BTreeMap::new();
    for (resource, delta) in deltas {
        if *delta <= 0 {
            continue;
        }
        let usage = &usages[resource];
        let hard_limit = limits.get(resource).copied().unwrap_or(-1);
        if hard_limit >= 0 && usage.in_use + usage.reserved + delta > hard_limit {
            overs.insert(
                resource.clone(),
                QuotaUsageSnapshot {
                    in_use: usage.in_use,
                    reserved: usage.reserved,
                    hard_limit,
                },
            );
        }
    }
    if !overs.is_empty() {
        txn.rollback()
            .await
            .context("aborting over-quota reservation")?;
        return Err(QuotaProviderError::OverQuota { usages: overs });
    }

    let mut reservation_ids = Vec::new();
    let mut refresh_due = Vec::new();
    for (resource, delta) in deltas {
        let usage = &usages[resource];
        let (until_refresh, due) = next_refresh_state(usage, refresh, now);
        if due {
            refresh_due.push(resource.clone());
        }

        let mut update = DbQuotaUsage::update_many()
            .col_expr(db_usage::Column::UntilRefresh, Expr::value(until_refresh))
            .col_expr(db_usage::Column::UpdatedAt, Expr::value(now))
            .filter(db_usage::Column::Id.eq(usage.id));

        if *delta > 0 {
            let uuid = Uuid::new_v4().to_string();
            db_reservation::ActiveModel {
                id: NotSet,
                uuid: Set(uuid.clone()),
                usage_id: Set(usage.id),
                project_id: Set(project_id.to_string()),
                resource: Set(resource.clone()),
                delta: Set(*delta),
                expire: Set(Some(expire.naive_utc())),
            }
            .insert(&txn)
            .await
            .context("persisting reservation")?;
            reservation_ids.push(uuid);

            update = update.col_expr(
                db_usage::Column::Reserved,
                Expr::col(db_usage::Column::Reserved).add(*delta),
            );
        } else if *delta < 0 {
            update = update.col_expr(
                db_usage::Column::InUse,
                Expr::col(db_usage::Column::InUse).add(*delta),
            );
        }

        update
            .exec(&txn)
            .await
            .context("updating quota usage counters")?;
    }

    txn.commit()
        .await
        .context("committing reservation transaction")?;
    Ok(ReservationOutcome {
        reservation_ids,
        refresh_due,
    })
}

// Counter and age based staleness bookkeeping. The refresh itself is the
// caller's job; the ledger resets the counter so due-ness is edge triggered.
fn next_refresh_state(
    usage: &db_usage::Model,
    refresh: &RefreshPolicy,
    now: NaiveDateTime,
) -> (Option<i64>, bool) {
    let mut due = false;
    let mut counter = usage.until_refresh;
    if refresh.until_refresh > 0 {
        match counter {
            Some(c) if c <= 1 => {
                due = true;
                counter = Some(refresh.until_refresh);
            }
            Some(c) => counter = Some(c - 1),
            None => counter = Some(refresh.until_refresh),
        }
    }
    if refresh.max_age > 0
        && let Some(updated_at) = usage.updated_at
        && now - updated_at > Duration::seconds(refresh.max_age)
    {
        due = true;
    }
    (counter, due)
}
