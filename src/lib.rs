// Copyright 2026 BadCompany
//
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

//! meshcheck: static analysis of service-mesh configuration.
//!
//! This library resolves whether strict mutual TLS is effectively enforced
//! for a workload given overlapping peer-authentication policies, and detects
//! gateways that claim overlapping hostnames on the same port. It works on a
//! fixed, already-materialized snapshot of configuration and performs no I/O
//! of its own beyond optional manifest loading.

pub mod analyzers;
pub mod config;
pub mod engine;
pub mod engine_core;
pub mod snapshot;
pub mod utils;
mod verification;
