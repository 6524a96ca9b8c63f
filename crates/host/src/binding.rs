// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Typed handles for every entry point the host calls
//!
//! Model-specific entry points are exported as `<modelIdentifier>_<function>`;
//! this is the only place where those names are built.

use tracing::{debug, instrument};
use wasmtime::{AsContextMut, Instance, TypedFunc, WasmParams, WasmResults};

use crate::{
	component::HostState,
	error::{HostError, Result},
};

pub const SNPRINTF: &str = "snprintf";
pub const CREATE_CALLBACK_FUNCTIONS: &str = "createFmi2CallbackFunctions";

pub const GET_TYPES_PLATFORM: &str = "fmi2GetTypesPlatform";
pub const GET_VERSION: &str = "fmi2GetVersion";
pub const INSTANTIATE: &str = "fmi2Instantiate";
pub const SETUP_EXPERIMENT: &str = "fmi2SetupExperiment";
pub const ENTER_INITIALIZATION_MODE: &str = "fmi2EnterInitializationMode";
pub const EXIT_INITIALIZATION_MODE: &str = "fmi2ExitInitializationMode";
pub const GET_REAL: &str = "fmi2GetReal";
pub const GET_BOOLEAN: &str = "fmi2GetBoolean";
pub const SET_REAL: &str = "fmi2SetReal";
pub const SET_BOOLEAN: &str = "fmi2SetBoolean";
pub const DO_STEP: &str = "fmi2DoStep";
pub const TERMINATE: &str = "fmi2Terminate";
pub const FREE_INSTANCE: &str = "fmi2FreeInstance";
pub const RESET: &str = "fmi2Reset";

/// `fmi2CoSimulation` in `fmi2Type`
pub(crate) const CO_SIMULATION: i32 = 1;

/// Name of a model-specific export
pub fn entry_point(identifier: &str, function: &str) -> String {
	format!("{}_{}", identifier, function)
}

/// Get/set signature: (instance, references, count, values)
pub(crate) type Transfer = TypedFunc<(i32, i32, i32, i32), i32>;

/// Resolved entry points; built once per component and never changed
#[derive(Clone)]
pub(crate) struct BindingTable {
	pub(crate) identifier: String,
	pub(crate) snprintf: TypedFunc<(i32, i32, i32, i32), i32>,
	pub(crate) create_callback_functions: TypedFunc<i32, i32>,
	pub(crate) get_types_platform: TypedFunc<(), i32>,
	pub(crate) get_version: TypedFunc<(), i32>,
	pub(crate) instantiate: TypedFunc<(i32, i32, i32, i32, i32, i32, i32), i32>,
	pub(crate) setup_experiment: TypedFunc<(i32, i32, f64, f64, i32, f64), i32>,
	pub(crate) enter_initialization_mode: TypedFunc<i32, i32>,
	pub(crate) exit_initialization_mode: TypedFunc<i32, i32>,
	pub(crate) get_real: Transfer,
	pub(crate) get_boolean: Transfer,
	pub(crate) set_real: Transfer,
	pub(crate) set_boolean: Transfer,
	pub(crate) do_step: TypedFunc<(i32, f64, f64, i32), i32>,
	pub(crate) terminate: Option<TypedFunc<i32, i32>>,
	pub(crate) free_instance: Option<TypedFunc<i32, ()>>,
	pub(crate) reset: Option<TypedFunc<i32, i32>>,
}

impl BindingTable {
	#[instrument(name = "binding::bind", level = "debug", skip(instance, store))]
	pub(crate) fn bind(
		instance: &Instance,
		mut store: impl AsContextMut<Data = HostState>,
		identifier: &str,
	) -> Result<Self> {
		let model = |function: &str| entry_point(identifier, function);

		let table = Self {
			identifier: identifier.to_string(),
			snprintf: required(instance, &mut store, SNPRINTF.to_string())?,
			create_callback_functions: required(instance, &mut store, CREATE_CALLBACK_FUNCTIONS.to_string())?,
			get_types_platform: required(instance, &mut store, model(GET_TYPES_PLATFORM))?,
			get_version: required(instance, &mut store, model(GET_VERSION))?,
			instantiate: required(instance, &mut store, model(INSTANTIATE))?,
			setup_experiment: required(instance, &mut store, model(SETUP_EXPERIMENT))?,
			enter_initialization_mode: required(instance, &mut store, model(ENTER_INITIALIZATION_MODE))?,
			exit_initialization_mode: required(instance, &mut store, model(EXIT_INITIALIZATION_MODE))?,
			get_real: required(instance, &mut store, model(GET_REAL))?,
			get_boolean: required(instance, &mut store, model(GET_BOOLEAN))?,
			set_real: required(instance, &mut store, model(SET_REAL))?,
			set_boolean: required(instance, &mut store, model(SET_BOOLEAN))?,
			do_step: required(instance, &mut store, model(DO_STEP))?,
			terminate: optional(instance, &mut store, model(TERMINATE))?,
			free_instance: optional(instance, &mut store, model(FREE_INSTANCE))?,
			reset: optional(instance, &mut store, model(RESET))?,
		};

		debug!(
			terminate = table.terminate.is_some(),
			free_instance = table.free_instance.is_some(),
			reset = table.reset.is_some(),
			"bound component entry points"
		);
		Ok(table)
	}

	/// The exported name of a model-specific function
	pub(crate) fn name(&self, function: &str) -> String {
		entry_point(&self.identifier, function)
	}
}

fn required<P, R>(
	instance: &Instance,
	store: &mut impl AsContextMut<Data = HostState>,
	name: String,
) -> Result<TypedFunc<P, R>>
where
	P: WasmParams,
	R: WasmResults,
{
	match instance.get_typed_func::<P, R>(&mut *store, &name) {
		Ok(func) => Ok(func),
		Err(err) => Err(HostError::Binding {
			reason: format!("{:#}", err),
			name,
		}),
	}
}

/// Absent exports are fine; present ones must have the expected signature.
fn optional<P, R>(
	instance: &Instance,
	store: &mut impl AsContextMut<Data = HostState>,
	name: String,
) -> Result<Option<TypedFunc<P, R>>>
where
	P: WasmParams,
	R: WasmResults,
{
	let Some(func) = instance.get_func(&mut *store, &name) else {
		return Ok(None);
	};

	match func.typed::<P, R>(&*store) {
		Ok(func) => Ok(Some(func)),
		Err(err) => Err(HostError::Binding {
			reason: format!("{:#}", err),
			name,
		}),
	}
}

#[cfg(test)]
mod tests {
	use cosim_testing::component::{FIXTURE_IDENTIFIER, fixture_wasm};

	use super::*;
	use crate::{component::Component, config::HostConfig};

	fn component(wasm: &[u8]) -> Component {
		Component::instantiate(wasm, &HostConfig::new().inherit_stdio(false)).unwrap()
	}

	#[test]
	fn test_entry_point_names() {
		assert_eq!(entry_point("bouncingBall", DO_STEP), "bouncingBall_fmi2DoStep");
		assert_eq!(entry_point("m", SET_REAL), "m_fmi2SetReal");
	}

	#[test]
	fn test_bind_fixture() {
		let mut component = component(&fixture_wasm());
		let table = BindingTable::bind(&component.instance, &mut component.store, FIXTURE_IDENTIFIER).unwrap();

		assert_eq!(table.identifier, "fixture");
		assert_eq!(table.name(GET_REAL), "fixture_fmi2GetReal");
		assert!(table.terminate.is_some());
		assert!(table.free_instance.is_some());
		assert!(table.reset.is_none());
	}

	#[test]
	fn test_unknown_identifier() {
		let mut component = component(&fixture_wasm());
		let err = BindingTable::bind(&component.instance, &mut component.store, "other").err().unwrap();

		assert!(matches!(err, HostError::Binding { ref name, .. } if name == "other_fmi2GetTypesPlatform"));
	}

	#[test]
	fn test_signature_mismatch() {
		let wasm = wat::parse_str(
			r#"(module
				(memory (export "memory") 1)
				(func (export "snprintf") (param i32) (result i32) (i32.const 0)))"#,
		)
		.unwrap();
		let mut component = component(&wasm);

		let err = BindingTable::bind(&component.instance, &mut component.store, "m").err().unwrap();
		assert!(matches!(err, HostError::Binding { ref name, .. } if name == "snprintf"));
	}
}
