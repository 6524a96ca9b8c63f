// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Reading, compiling and instantiating the compiled component

use tracing::{debug, instrument};
use wasmtime::{Engine, Instance, Linker, Module, Store};
use wasmtime_wasi::{WasiCtxBuilder, p1::WasiP1Ctx};

use crate::{
	config::{ComponentSource, HostConfig},
	error::{HostError, Result},
	heap::HeapStats,
};

/// Data owned by the wasmtime store
pub(crate) struct HostState {
	pub(crate) wasi: WasiP1Ctx,
	pub(crate) heap: HeapStats,
}

/// A compiled and instantiated component together with its store
pub(crate) struct Component {
	pub(crate) store: Store<HostState>,
	pub(crate) instance: Instance,
}

/// Reads the component bytes from the configured source
#[instrument(name = "component::read", level = "debug", skip_all)]
pub(crate) async fn read(source: Option<&ComponentSource>) -> Result<Vec<u8>> {
	match source.ok_or(HostError::MissingComponent)? {
		ComponentSource::Bytes(bytes) => Ok(bytes.clone()),
		ComponentSource::File(path) => tokio::fs::read(path)
			.await
			.map_err(|err| HostError::Component(format!("{}: {}", path.display(), err))),
	}
}

impl Component {
	#[instrument(name = "component::instantiate", level = "debug", skip_all, fields(bytes = bytes.len()))]
	pub(crate) fn instantiate(bytes: &[u8], config: &HostConfig) -> Result<Self> {
		let engine = Engine::default();
		let module = Module::new(&engine, bytes).map_err(HostError::component)?;

		let mut linker: Linker<HostState> = Linker::new(&engine);
		wasmtime_wasi::p1::add_to_linker_sync(&mut linker, |state: &mut HostState| &mut state.wasi)
			.map_err(HostError::component)?;
		// Emscripten builds import a handful of env functions that are never
		// reached from the co-simulation surface.
		linker.define_unknown_imports_as_traps(&module).map_err(HostError::component)?;

		let mut builder = WasiCtxBuilder::new();
		if config.inherit_stdio {
			builder.inherit_stdio();
		}

		let mut store = Store::new(
			&engine,
			HostState {
				wasi: builder.build_p1(),
				heap: HeapStats::default(),
			},
		);

		let instance = linker.instantiate(&mut store, &module).map_err(HostError::component)?;

		if let Ok(initialize) = instance.get_typed_func::<(), ()>(&mut store, "_initialize") {
			debug!("running _initialize");
			initialize.call(&mut store, ()).map_err(HostError::runtime)?;
		}

		Ok(Self {
			store,
			instance,
		})
	}
}
