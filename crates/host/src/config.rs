// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Builder for configuring a [`crate::SimulationHost`]

use std::path::PathBuf;

use cosim_descriptor::DescriptorSource;

/// Where the compiled component comes from
#[derive(Debug, Clone)]
pub enum ComponentSource {
	/// A `.wasm` (or `.wat`) file on disk
	File(PathBuf),
	/// An already loaded module
	Bytes(Vec<u8>),
}

/// Builder for the descriptor/component pair and the instantiation flags
#[derive(Debug, Clone)]
pub struct HostConfig {
	pub(crate) descriptor: Option<DescriptorSource>,
	pub(crate) component: Option<ComponentSource>,
	pub(crate) instance_name: String,
	pub(crate) resource_location: String,
	pub(crate) visible: bool,
	pub(crate) logging_on: bool,
	pub(crate) inherit_stdio: bool,
}

impl HostConfig {
	pub fn new() -> Self {
		Self {
			descriptor: None,
			component: None,
			instance_name: "instance".to_string(),
			resource_location: "file://".to_string(),
			visible: false,
			logging_on: false,
			inherit_stdio: true,
		}
	}

	pub fn descriptor(mut self, source: DescriptorSource) -> Self {
		self.descriptor = Some(source);
		self
	}

	/// Fetch the descriptor over HTTP
	pub fn descriptor_url(self, url: impl Into<String>) -> Self {
		self.descriptor(DescriptorSource::url(url))
	}

	pub fn component(mut self, source: ComponentSource) -> Self {
		self.component = Some(source);
		self
	}

	pub fn component_file(self, path: impl Into<PathBuf>) -> Self {
		self.component(ComponentSource::File(path.into()))
	}

	pub fn component_bytes(self, bytes: impl Into<Vec<u8>>) -> Self {
		self.component(ComponentSource::Bytes(bytes.into()))
	}

	pub fn instance_name(mut self, name: impl Into<String>) -> Self {
		self.instance_name = name.into();
		self
	}

	pub fn resource_location(mut self, location: impl Into<String>) -> Self {
		self.resource_location = location.into();
		self
	}

	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	/// Passed as `loggingOn` to `fmi2Instantiate`
	pub fn logging_on(mut self, logging_on: bool) -> Self {
		self.logging_on = logging_on;
		self
	}

	pub fn inherit_stdio(mut self, inherit: bool) -> Self {
		self.inherit_stdio = inherit;
		self
	}

	pub fn get_instance_name(&self) -> &str {
		&self.instance_name
	}

	pub fn get_resource_location(&self) -> &str {
		&self.resource_location
	}
}

impl Default for HostConfig {
	fn default() -> Self {
		Self::new()
	}
}
