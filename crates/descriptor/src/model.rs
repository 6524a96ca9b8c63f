// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Identity of a loaded component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelDescriptor {
	/// Stable model GUID passed back to `fmi2Instantiate`.
	pub guid: String,
	/// `CoSimulation/@modelIdentifier`, the prefix of every model-specific entry point.
	pub identifier: String,
	pub model_name: String,
	pub fmi_version: String,
	pub description: String,
	pub default_experiment: Option<DefaultExperiment>,
}

/// `DefaultExperiment` element. Every attribute is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DefaultExperiment {
	pub start_time: Option<f64>,
	pub stop_time: Option<f64>,
	pub tolerance: Option<f64>,
	pub step_size: Option<f64>,
}
