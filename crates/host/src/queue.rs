// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use cosim_descriptor::ValueReference;

/// Queued writes of one type, kept as parallel sequences in enqueue order
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBatch<T> {
	references: Vec<ValueReference>,
	values: Vec<T>,
}

impl<T> PendingBatch<T> {
	fn new() -> Self {
		Self {
			references: Vec::new(),
			values: Vec::new(),
		}
	}

	fn push(&mut self, reference: ValueReference, value: T) {
		self.references.push(reference);
		self.values.push(value);
	}

	pub fn references(&self) -> &[ValueReference] {
		&self.references
	}

	pub fn values(&self) -> &[T] {
		&self.values
	}

	pub fn len(&self) -> usize {
		self.references.len()
	}

	pub fn is_empty(&self) -> bool {
		self.references.is_empty()
	}
}

/// Pending real and boolean writes; a batch exists only once something has
/// been enqueued for its type.
#[derive(Debug, Default)]
pub(crate) struct WriteQueue {
	real: Option<PendingBatch<f64>>,
	boolean: Option<PendingBatch<bool>>,
}

impl WriteQueue {
	pub(crate) fn enqueue_real(&mut self, reference: ValueReference, value: f64) {
		self.real.get_or_insert_with(PendingBatch::new).push(reference, value);
	}

	pub(crate) fn enqueue_boolean(&mut self, reference: ValueReference, value: bool) {
		self.boolean.get_or_insert_with(PendingBatch::new).push(reference, value);
	}

	pub(crate) fn real(&self) -> Option<&PendingBatch<f64>> {
		self.real.as_ref()
	}

	pub(crate) fn boolean(&self) -> Option<&PendingBatch<bool>> {
		self.boolean.as_ref()
	}

	pub(crate) fn take_real(&mut self) -> Option<PendingBatch<f64>> {
		self.real.take()
	}

	pub(crate) fn take_boolean(&mut self) -> Option<PendingBatch<bool>> {
		self.boolean.take()
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.real.is_none() && self.boolean.is_none()
	}
}
