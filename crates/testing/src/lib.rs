// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixtures shared by the cosim test suites

pub mod component;
pub mod descriptor;
pub mod http;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness. Honours `RUST_LOG`.
pub fn init_tracing() {
	TRACING.call_once(|| {
		let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
	});
}
