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

pub use super::async_job::Entity as AsyncJob;
pub use super::pod::Entity as Pod;
pub use super::quota::Entity as Quota;
pub use super::quota_usage::Entity as QuotaUsage;
pub use super::reservation::Entity as Reservation;
pub use super::resource_routing::Entity as ResourceRouting;
