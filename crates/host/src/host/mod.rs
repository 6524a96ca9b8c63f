// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod access;
mod lifecycle;
mod step;

use std::{
	fmt,
	fmt::{Display, Formatter},
};

use cosim_descriptor::{ModelDescriptor, ParameterRegistry, VariableRegistry};
use tracing::{debug, info, instrument};
use wasmtime::Store;

use crate::{
	binding::{BindingTable, FREE_INSTANCE},
	component::{self, Component, HostState},
	config::HostConfig,
	error::{HostError, Result},
	heap::{ForeignHeap, HeapStats},
	logging,
	queue::WriteQueue,
};

/// Opaque `fmi2Component` returned by `fmi2Instantiate`; never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceHandle(i32);

impl InstanceHandle {
	pub fn raw(&self) -> i32 {
		self.0
	}
}

/// Where the instance is in the co-simulation lifecycle. Tracked for
/// diagnostics; transitions are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
	Uninstantiated,
	Instantiated,
	InitializationMode,
	Initialized,
	Terminated,
}

impl Display for InstanceState {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			InstanceState::Uninstantiated => f.write_str("uninstantiated"),
			InstanceState::Instantiated => f.write_str("instantiated"),
			InstanceState::InitializationMode => f.write_str("initialization mode"),
			InstanceState::Initialized => f.write_str("initialized"),
			InstanceState::Terminated => f.write_str("terminated"),
		}
	}
}

/// A loaded co-simulation component together with its descriptor
pub struct SimulationHost {
	model: ModelDescriptor,
	variables: VariableRegistry,
	parameters: ParameterRegistry,
	config: HostConfig,
	store: Store<HostState>,
	heap: ForeignHeap,
	bindings: BindingTable,
	logger: i32,
	queue: WriteQueue,
	instance: Option<InstanceHandle>,
	callbacks: Option<i32>,
	state: InstanceState,
}

impl SimulationHost {
	/// Loads and parses the descriptor, then compiles the component and binds
	/// its entry points under the descriptor's model identifier. Does not
	/// instantiate.
	#[instrument(name = "host::load", level = "debug", skip_all)]
	pub async fn load(config: HostConfig) -> Result<Self> {
		let document = cosim_descriptor::load(config.descriptor.as_ref()).await?;
		let descriptor = cosim_descriptor::parse(&document)?;

		let bytes = component::read(config.component.as_ref()).await?;
		let Component {
			mut store,
			instance,
		} = Component::instantiate(&bytes, &config)?;

		let heap = ForeignHeap::resolve(&instance, &mut store)?;
		let bindings = BindingTable::bind(&instance, &mut store, &descriptor.model.identifier)?;
		let logger = logging::register(&instance, &mut store, &heap, &bindings)?;

		info!(
			model = %descriptor.model.model_name,
			identifier = %descriptor.model.identifier,
			variables = descriptor.variables.len(),
			parameters = descriptor.parameters.len(),
			"loaded co-simulation component"
		);

		Ok(Self {
			model: descriptor.model,
			variables: descriptor.variables,
			parameters: descriptor.parameters,
			config,
			store,
			heap,
			bindings,
			logger,
			queue: WriteQueue::default(),
			instance: None,
			callbacks: None,
			state: InstanceState::Uninstantiated,
		})
	}

	pub fn model(&self) -> &ModelDescriptor {
		&self.model
	}

	pub fn variables(&self) -> &VariableRegistry {
		&self.variables
	}

	pub fn parameters(&self) -> &ParameterRegistry {
		&self.parameters
	}

	pub fn config(&self) -> &HostConfig {
		&self.config
	}

	pub fn state(&self) -> InstanceState {
		self.state
	}

	pub fn instance(&self) -> Option<InstanceHandle> {
		self.instance
	}

	/// Index of the logger in the component's function table
	pub fn logger_index(&self) -> i32 {
		self.logger
	}

	pub fn heap_stats(&self) -> HeapStats {
		self.store.data().heap
	}

	fn handle(&self) -> Result<i32> {
		self.instance.map(|handle| handle.raw()).ok_or(HostError::NotInstantiated)
	}
}

impl Drop for SimulationHost {
	fn drop(&mut self) {
		let Some(handle) = self.instance.take() else {
			return;
		};
		let Some(free_instance) = &self.bindings.free_instance else {
			return;
		};

		if let Err(err) = free_instance.call(&mut self.store, handle.raw()) {
			debug!(error = %err, "{} failed during drop", self.bindings.name(FREE_INSTANCE));
		}
	}
}
