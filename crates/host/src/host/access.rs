// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use cosim_descriptor::ValueReference;
use tracing::{debug, instrument};

use super::SimulationHost;
use crate::{
	binding::{GET_BOOLEAN, GET_REAL, SET_BOOLEAN, SET_REAL},
	error::Result,
	queue::PendingBatch,
	status::Status,
	transfer::{get_values, set_values},
};

impl SimulationHost {
	/// One `fmi2SetReal` call covering every reference
	pub fn set_real(&mut self, references: &[ValueReference], values: &[f64]) -> Result<Status> {
		let handle = self.handle()?;
		set_values(&mut self.store, &self.heap, &self.bindings.set_real, SET_REAL, handle, references, values)
	}

	pub fn set_boolean(&mut self, references: &[ValueReference], values: &[bool]) -> Result<Status> {
		let handle = self.handle()?;
		set_values(&mut self.store, &self.heap, &self.bindings.set_boolean, SET_BOOLEAN, handle, references, values)
	}

	/// One `fmi2GetReal` call; `output` must hold at least one value per
	/// reference.
	pub fn get_real(&mut self, references: &[ValueReference], output: &mut [f64]) -> Result<Status> {
		let handle = self.handle()?;
		get_values(&mut self.store, &self.heap, &self.bindings.get_real, GET_REAL, handle, references, output)
	}

	pub fn get_boolean(&mut self, references: &[ValueReference], output: &mut [bool]) -> Result<Status> {
		let handle = self.handle()?;
		get_values(&mut self.store, &self.heap, &self.bindings.get_boolean, GET_BOOLEAN, handle, references, output)
	}

	pub fn set_single_real(&mut self, reference: ValueReference, value: f64) -> Result<Status> {
		self.set_real(&[reference], &[value])
	}

	pub fn set_single_boolean(&mut self, reference: ValueReference, value: bool) -> Result<Status> {
		self.set_boolean(&[reference], &[value])
	}

	pub fn get_single_real(&mut self, reference: ValueReference) -> Result<f64> {
		let mut output = [0.0];
		self.get_real(&[reference], &mut output)?;
		Ok(output[0])
	}

	pub fn get_single_boolean(&mut self, reference: ValueReference) -> Result<bool> {
		let mut output = [false];
		self.get_boolean(&[reference], &mut output)?;
		Ok(output[0])
	}

	/// Queues a real write for the next [`Self::flush_real_queue`]
	pub fn enqueue_set_real(&mut self, reference: ValueReference, value: f64) {
		self.queue.enqueue_real(reference, value);
	}

	pub fn enqueue_set_boolean(&mut self, reference: ValueReference, value: bool) {
		self.queue.enqueue_boolean(reference, value);
	}

	/// Sends the pending real writes in one call. Returns `None` when nothing
	/// was queued. The batch is kept if the call fails; drop it with
	/// [`Self::discard_real_queue`].
	#[instrument(name = "host::flush_real_queue", level = "debug", skip_all)]
	pub fn flush_real_queue(&mut self) -> Result<Option<Status>> {
		let Some(batch) = self.queue.real() else {
			return Ok(None);
		};

		let handle = self.handle()?;
		debug!(count = batch.len(), "flushing real writes");
		let status = set_values(
			&mut self.store,
			&self.heap,
			&self.bindings.set_real,
			SET_REAL,
			handle,
			batch.references(),
			batch.values(),
		)?;

		self.queue.take_real();
		Ok(Some(status))
	}

	#[instrument(name = "host::flush_boolean_queue", level = "debug", skip_all)]
	pub fn flush_boolean_queue(&mut self) -> Result<Option<Status>> {
		let Some(batch) = self.queue.boolean() else {
			return Ok(None);
		};

		let handle = self.handle()?;
		debug!(count = batch.len(), "flushing boolean writes");
		let status = set_values(
			&mut self.store,
			&self.heap,
			&self.bindings.set_boolean,
			SET_BOOLEAN,
			handle,
			batch.references(),
			batch.values(),
		)?;

		self.queue.take_boolean();
		Ok(Some(status))
	}

	/// Flushes real writes, then boolean writes
	pub fn flush_set_queues(&mut self) -> Result<()> {
		self.flush_real_queue()?;
		self.flush_boolean_queue()?;
		Ok(())
	}

	pub fn has_pending_writes(&self) -> bool {
		!self.queue.is_empty()
	}

	pub fn pending_real(&self) -> Option<&PendingBatch<f64>> {
		self.queue.real()
	}

	pub fn pending_boolean(&self) -> Option<&PendingBatch<bool>> {
		self.queue.boolean()
	}

	/// Drops the queued real writes without sending them and hands them back
	pub fn discard_real_queue(&mut self) -> Option<PendingBatch<f64>> {
		let batch = self.queue.take_real();
		if let Some(batch) = &batch {
			debug!(count = batch.len(), "discarding real writes");
		}
		batch
	}

	pub fn discard_boolean_queue(&mut self) -> Option<PendingBatch<bool>> {
		let batch = self.queue.take_boolean();
		if let Some(batch) = &batch {
			debug!(count = batch.len(), "discarding boolean writes");
		}
		batch
	}
}
