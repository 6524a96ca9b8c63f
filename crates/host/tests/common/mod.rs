// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use cosim_host::{DescriptorSource, HostConfig, SimulationHost};
use cosim_testing::{component::fixture_wasm, descriptor::FIXTURE, init_tracing};

// References the fixture component records its call history under
pub const SET_REAL_CALLS: u32 = 100;
pub const SET_REAL_COUNT: u32 = 101;
pub const SET_REAL_FIRST: u32 = 102;
pub const SET_BOOLEAN_CALLS: u32 = 103;
pub const SET_BOOLEAN_COUNT: u32 = 104;
pub const DO_STEP_CALLS: u32 = 105;
pub const SET_REAL_SEQUENCE: u32 = 106;
pub const SET_BOOLEAN_SEQUENCE: u32 = 107;

/// References the fixture rejects with `fmi2Error`
pub const REJECTED: u32 = 999;

pub fn config(descriptor: &str) -> HostConfig {
	HostConfig::new()
		.descriptor(DescriptorSource::inline(descriptor.as_bytes()))
		.component_bytes(fixture_wasm())
		.inherit_stdio(false)
}

pub async fn load(config: HostConfig) -> SimulationHost {
	init_tracing();
	SimulationHost::load(config).await.unwrap()
}

/// The fixture component, loaded and instantiated
pub async fn instantiated() -> SimulationHost {
	let mut host = load(config(FIXTURE)).await;
	host.instantiate().unwrap();
	host
}
