// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Logger callback handed to the component at instantiation
//!
//! The component calls the logger through its indirect function table with
//! `(environment, instanceName, status, category, message, ...)`. The message
//! is a printf format; the host formats it with the component's own
//! `snprintf` and forwards the text to `tracing`.

use tracing::{debug, error, info, instrument, warn};
use wasmtime::{AsContextMut, Caller, Func, Instance, Ref, TypedFunc};

use crate::{
	binding::BindingTable,
	component::HostState,
	error::{HostError, Result},
	heap::ForeignHeap,
	status::Status,
};

pub(crate) const FUNCTION_TABLE: &str = "__indirect_function_table";

/// Addresses handed to the logger by the component
#[derive(Debug, Clone, Copy)]
struct Record {
	instance: i32,
	status: i32,
	category: i32,
	message: i32,
	args: i32,
}

#[derive(Clone)]
struct LogBridge {
	heap: ForeignHeap,
	snprintf: TypedFunc<(i32, i32, i32, i32), i32>,
}

/// Appends the logger to the component's function table and returns its
/// index.
#[instrument(name = "logging::register", level = "debug", skip_all)]
pub(crate) fn register(
	instance: &Instance,
	mut store: impl AsContextMut<Data = HostState>,
	heap: &ForeignHeap,
	bindings: &BindingTable,
) -> Result<i32> {
	let table = instance.get_table(&mut store, FUNCTION_TABLE).ok_or_else(|| HostError::Binding {
		name: FUNCTION_TABLE.to_string(),
		reason: "not exported".to_string(),
	})?;

	let bridge = LogBridge {
		heap: heap.clone(),
		snprintf: bindings.snprintf.clone(),
	};

	let func = Func::wrap(
		&mut store,
		move |mut caller: Caller<'_, HostState>,
		      _environment: i32,
		      instance: i32,
		      status: i32,
		      category: i32,
		      message: i32,
		      args: i32| {
			let record = Record {
				instance,
				status,
				category,
				message,
				args,
			};
			if let Err(err) = bridge.emit(&mut caller, record) {
				warn!(error = %err, "failed to decode component log message");
			}
		},
	);

	let index = table.grow(&mut store, 1, Ref::Func(Some(func))).map_err(|err| HostError::Binding {
		name: FUNCTION_TABLE.to_string(),
		reason: format!("{:#}", err),
	})?;

	let index = i32::try_from(index).map_err(|_| HostError::Binding {
		name: FUNCTION_TABLE.to_string(),
		reason: format!("logger index {} does not fit a function pointer", index),
	})?;

	debug!(index, "registered component logger");
	Ok(index)
}

impl LogBridge {
	fn emit(&self, caller: &mut Caller<'_, HostState>, record: Record) -> Result<()> {
		let instance = self.heap.read_c_string(&*caller, record.instance)?;
		let category = self.heap.read_c_string(&*caller, record.category)?;
		let text = self.format(caller, record.message, record.args)?;

		match Status::from_code(record.status) {
			Some(Status::Ok) => {
				info!(instance = %instance, category = %category, status = %Status::Ok, "Component[{}]: {}", instance, text)
			}
			Some(status @ (Status::Warning | Status::Discard)) => {
				warn!(instance = %instance, category = %category, status = %status, "Component[{}]: {}", instance, text)
			}
			Some(status @ (Status::Error | Status::Fatal)) => {
				error!(instance = %instance, category = %category, status = %status, "Component[{}]: {}", instance, text)
			}
			Some(Status::Pending) => {
				debug!(instance = %instance, category = %category, status = %Status::Pending, "Component[{}]: {}", instance, text)
			}
			None => {
				warn!(instance = %instance, category = %category, status = record.status, "Component[{}]: {}", instance, text)
			}
		}
		Ok(())
	}

	/// Sizes the message with `snprintf(NULL, 0, ..)`, then formats it into a
	/// scoped buffer of `len + 1` bytes.
	fn format(&self, caller: &mut Caller<'_, HostState>, message: i32, args: i32) -> Result<String> {
		self.heap.scoped(caller, |caller, scope| {
			let len = self.snprintf.call(&mut *caller, (0, 0, message, args)).map_err(HostError::runtime)?;
			let len = usize::try_from(len)
				.map_err(|_| HostError::Runtime(format!("snprintf failed with {}", len)))?;

			let buffer = scope.allocate_bytes(caller, len + 1)?;
			let capacity = i32::try_from(buffer.len).map_err(|_| HostError::OutOfMemory {
				bytes: buffer.len,
			})?;
			self.snprintf.call(&mut *caller, (buffer.ptr, capacity, message, args)).map_err(HostError::runtime)?;

			let bytes = scope.read_bytes(&*caller, buffer, len)?;
			Ok(String::from_utf8_lossy(&bytes).into_owned())
		})
	}
}
