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

//! # OpenStack Cascade
//!
//! Large OpenStack installations are increasingly split into a "central"
//! control plane and a set of independently operated regional deployments.
//! The central plane owns the logical view of the cloud: a network, a router
//! or a port exists exactly once from the user's perspective, while every
//! region that materializes the resource keeps its own local copy with its
//! own identifier. Keeping those two views consistent, without a global
//! transaction spanning several autonomous OpenStack installations, is the
//! job of a coordination layer sitting between the central API services and
//! the regional ones.
//!
//! The original coordination layer was written in Python. It has served
//! production deployments well, but the parts of it that actually carry the
//! correctness burden (the resource routing table, the idempotent
//! get-or-create provisioning protocol, the asynchronous job queue and the
//! quota reservation ledger) are also the parts where Python's dynamism
//! made the concurrency story hard to audit. Those four pieces hold all of
//! the non-trivial locking, retry and idempotency logic in the codebase, and
//! they are invoked concurrently by an arbitrary number of API workers and
//! job dispatchers.
//!
//! This crate is a Rust reimplementation of that engine. It deliberately
//! covers only the coordination core:
//!
//! - The **pod registry** ([`pod`]) knows which regions exist and which one
//!   is the central ("top") region.
//!
//! - The **resource routing store** ([`routing`]) records which logical
//!   resource corresponds to which physical per-region resource. The
//!   database unique constraint is the only synchronization primitive:
//!   concurrent writers race to insert and exactly one wins.
//!
//! - The **element provisioner** ([`element`]) layers an idempotent
//!   "find-by-name-or-create" protocol over the routing store and an
//!   abstract per-region client, so that concurrent callers converge on a
//!   single physical resource instead of creating duplicates.
//!
//! - The **job queue** ([`job`]) provides durable work items with
//!   insert-based mutual exclusion and a failure feed driving eventual
//!   convergence of regional state.
//!
//! - The **quota ledger** ([`quota`]) implements reserve/commit/rollback
//!   accounting with ordered row locking and bounded deadlock retry.
//!
//! The REST layers above and the per-service HTTP clients below are out of
//! scope: regional clients are consumed through the [`client::RegionClient`]
//! trait and injected via an explicit registry, so the engine itself holds
//! no ambient state beyond the database connection.
//!
//! Every provider follows the same architecture: a thin provider type
//! delegating to a pluggable backend driver, with a SQL driver as the
//! default implementation and a mock generated for tests.

pub mod cascade;
pub mod client;
pub mod common;
pub mod config;
pub mod db;
pub mod db_migration;
pub mod element;
pub mod error;
pub mod job;
pub mod plugin_manager;
pub mod pod;
pub mod provider;
pub mod quota;
pub mod routing;
