// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Batched get/set through the `(instance, references, count, values)` entry
//! points

use cosim_descriptor::ValueReference;
use tracing::{instrument, trace};
use wasmtime::Store;

use crate::{
	binding::Transfer,
	component::HostState,
	error::{HostError, Result},
	heap::{ForeignHeap, Scalar, foreign_len},
	status::{self, Status},
};

#[instrument(name = "transfer::set", level = "debug", skip_all, fields(function = %function, count = references.len()))]
pub(crate) fn set_values<T: Scalar>(
	store: &mut Store<HostState>,
	heap: &ForeignHeap,
	entry: &Transfer,
	function: &'static str,
	handle: i32,
	references: &[ValueReference],
	values: &[T],
) -> Result<Status> {
	if references.len() != values.len() {
		return Err(HostError::LengthMismatch {
			references: references.len(),
			values: values.len(),
		});
	}

	let count = foreign_len(references.len())?;
	let code = heap.scoped(store, |store, scope| {
		let refs = scope.marshal(store, references)?;
		let vals = scope.marshal(store, values)?;
		trace!(refs = refs.ptr, values = vals.ptr, "calling {}", function);
		entry.call(&mut *store, (handle, refs.ptr, count, vals.ptr)).map_err(HostError::runtime)
	})?;

	status::check(function, code)
}

/// Fills `output[..references.len()]`; the remainder is left untouched.
#[instrument(name = "transfer::get", level = "debug", skip_all, fields(function = %function, count = references.len()))]
pub(crate) fn get_values<T: Scalar>(
	store: &mut Store<HostState>,
	heap: &ForeignHeap,
	entry: &Transfer,
	function: &'static str,
	handle: i32,
	references: &[ValueReference],
	output: &mut [T],
) -> Result<Status> {
	if output.len() < references.len() {
		return Err(HostError::LengthMismatch {
			references: references.len(),
			values: output.len(),
		});
	}

	let count = foreign_len(references.len())?;
	let (code, values) = heap.scoped(store, |store, scope| {
		let refs = scope.marshal(store, references)?;
		let vals = scope.allocate::<T>(store, references.len())?;
		let code = entry.call(&mut *store, (handle, refs.ptr, count, vals.ptr)).map_err(HostError::runtime)?;

		// nothing worth reading back after a failed call
		if Status::from_code(code).is_some_and(Status::is_failure) {
			return Ok((code, Vec::new()));
		}
		Ok((code, scope.read::<T>(&*store, vals)?))
	})?;

	let status = status::check(function, code)?;
	output[..values.len()].copy_from_slice(&values);
	Ok(status)
}
