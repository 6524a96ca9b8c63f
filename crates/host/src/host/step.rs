// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::{debug, instrument};

use super::SimulationHost;
use crate::{
	binding::DO_STEP,
	error::{HostError, Result},
	status::{self, Status},
};

impl SimulationHost {
	/// Advances the component by one communication step. Queued writes are
	/// not flushed.
	#[instrument(name = "host::do_step", level = "debug", skip(self))]
	pub fn do_step(
		&mut self,
		current_time: f64,
		step_size: f64,
		no_set_state_prior_to_current_point: bool,
	) -> Result<Status> {
		let handle = self.handle()?;
		if self.has_pending_writes() {
			debug!("stepping with writes still queued");
		}

		let code = self
			.bindings
			.do_step
			.call(&mut self.store, (handle, current_time, step_size, i32::from(no_set_state_prior_to_current_point)))
			.map_err(HostError::runtime)?;
		status::check(DO_STEP, code)
	}
}
