// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::{debug, instrument};

use super::{InstanceHandle, InstanceState, SimulationHost};
use crate::{
	binding::{
		CO_SIMULATION, ENTER_INITIALIZATION_MODE, EXIT_INITIALIZATION_MODE, FREE_INSTANCE, RESET,
		SETUP_EXPERIMENT, TERMINATE,
	},
	error::{HostError, Result},
	status::{self, Status},
};

impl SimulationHost {
	/// Creates the component instance. Calling it again while an instance
	/// exists returns the existing handle.
	#[instrument(name = "host::instantiate", level = "debug", skip_all)]
	pub fn instantiate(&mut self) -> Result<InstanceHandle> {
		if let Some(handle) = self.instance {
			debug!(handle = handle.raw(), "already instantiated");
			return Ok(handle);
		}

		let callbacks = match self.callbacks {
			Some(callbacks) => callbacks,
			None => {
				let callbacks = self
					.bindings
					.create_callback_functions
					.call(&mut self.store, self.logger)
					.map_err(HostError::runtime)?;
				self.callbacks = Some(callbacks);
				callbacks
			}
		};

		let name = self.config.instance_name.as_str();
		let guid = self.model.guid.as_str();
		let resource = self.config.resource_location.as_str();
		let visible = i32::from(self.config.visible);
		let logging_on = i32::from(self.config.logging_on);
		let instantiate = &self.bindings.instantiate;

		let raw = self.heap.scoped(&mut self.store, |store, scope| {
			let name = scope.marshal_str(store, name)?;
			let guid = scope.marshal_str(store, guid)?;
			let resource = scope.marshal_str(store, resource)?;
			instantiate
				.call(&mut *store, (name.ptr, CO_SIMULATION, guid.ptr, resource.ptr, callbacks, visible, logging_on))
				.map_err(HostError::runtime)
		})?;

		if raw == 0 {
			return Err(HostError::InstantiationFailed {
				instance: self.config.instance_name.clone(),
			});
		}

		let handle = InstanceHandle(raw);
		self.instance = Some(handle);
		self.state = InstanceState::Instantiated;
		debug!(handle = raw, "instantiated");
		Ok(handle)
	}

	/// `tolerance` and `stop` are passed as "defined" only when present
	#[instrument(name = "host::setup_experiment", level = "debug", skip(self))]
	pub fn setup_experiment(&mut self, tolerance: Option<f64>, start: f64, stop: Option<f64>) -> Result<Status> {
		let handle = self.handle()?;
		let code = self
			.bindings
			.setup_experiment
			.call(
				&mut self.store,
				(
					handle,
					i32::from(tolerance.is_some()),
					tolerance.unwrap_or(0.0),
					start,
					i32::from(stop.is_some()),
					stop.unwrap_or(0.0),
				),
			)
			.map_err(HostError::runtime)?;
		status::check(SETUP_EXPERIMENT, code)
	}

	/// Sets up the experiment declared in the descriptor's `DefaultExperiment`
	/// (start 0 when absent).
	pub fn setup_default_experiment(&mut self) -> Result<Status> {
		let experiment = self.model.default_experiment.unwrap_or_default();
		self.setup_experiment(experiment.tolerance, experiment.start_time.unwrap_or(0.0), experiment.stop_time)
	}

	#[instrument(name = "host::enter_initialization_mode", level = "debug", skip_all)]
	pub fn enter_initialization_mode(&mut self) -> Result<Status> {
		let handle = self.handle()?;
		let code = self.bindings.enter_initialization_mode.call(&mut self.store, handle).map_err(HostError::runtime)?;
		let status = status::check(ENTER_INITIALIZATION_MODE, code)?;
		self.state = InstanceState::InitializationMode;
		Ok(status)
	}

	#[instrument(name = "host::exit_initialization_mode", level = "debug", skip_all)]
	pub fn exit_initialization_mode(&mut self) -> Result<Status> {
		let handle = self.handle()?;
		let code = self.bindings.exit_initialization_mode.call(&mut self.store, handle).map_err(HostError::runtime)?;
		let status = status::check(EXIT_INITIALIZATION_MODE, code)?;
		self.state = InstanceState::Initialized;
		Ok(status)
	}

	/// Terminates and frees the instance; later calls that need an instance
	/// fail with [`HostError::NotInstantiated`] until `instantiate` runs again.
	#[instrument(name = "host::terminate", level = "debug", skip_all)]
	pub fn terminate(&mut self) -> Result<Status> {
		let handle = self.handle()?;

		let status = match &self.bindings.terminate {
			Some(terminate) => {
				let code = terminate.call(&mut self.store, handle).map_err(HostError::runtime)?;
				status::check(TERMINATE, code)?
			}
			None => {
				debug!("{} not exported", self.bindings.name(TERMINATE));
				Status::Ok
			}
		};

		self.instance = None;
		self.state = InstanceState::Terminated;

		if let Some(free_instance) = &self.bindings.free_instance {
			free_instance.call(&mut self.store, handle).map_err(HostError::runtime)?;
		} else {
			debug!("{} not exported", self.bindings.name(FREE_INSTANCE));
		}

		if let Some(callbacks) = self.callbacks.take() {
			self.heap.free_foreign(&mut self.store, callbacks)?;
		}

		Ok(status)
	}

	#[instrument(name = "host::reset", level = "debug", skip_all)]
	pub fn reset(&mut self) -> Result<Status> {
		let reset = self.bindings.reset.as_ref().ok_or_else(|| HostError::Unsupported(self.bindings.name(RESET)))?;
		let handle = self.handle()?;

		let code = reset.call(&mut self.store, handle).map_err(HostError::runtime)?;
		let status = status::check(RESET, code)?;
		self.state = InstanceState::Instantiated;
		Ok(status)
	}

	pub fn get_types_platform(&mut self) -> Result<String> {
		let ptr = self.bindings.get_types_platform.call(&mut self.store, ()).map_err(HostError::runtime)?;
		self.heap.read_c_string(&self.store, ptr)
	}

	pub fn get_version(&mut self) -> Result<String> {
		let ptr = self.bindings.get_version.call(&mut self.store, ()).map_err(HostError::runtime)?;
		self.heap.read_c_string(&self.store, ptr)
	}
}
