// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host for FMI 2.0 co-simulation components compiled to WebAssembly
//!
//! [`SimulationHost::load`] fetches and parses the component's
//! `modelDescription.xml`, compiles the component with wasmtime and binds its
//! entry points. Values cross the boundary through short-lived buffers in the
//! component's linear memory; writes can be queued per type and sent as one
//! batched call.

mod binding;
mod component;
mod config;
mod error;
mod heap;
mod host;
mod logging;
mod queue;
mod status;
mod transfer;

pub use binding::entry_point;
pub use config::{ComponentSource, HostConfig};
pub use cosim_descriptor::{
	Causality, DescriptorSource, ModelDescriptor, ParameterRegistry, ValueReference, VariableDescriptor,
	VariableRegistry,
};
pub use error::{HostError, Result};
pub use heap::{HeapStats, Scalar, SharedBuffer};
pub use host::{InstanceHandle, InstanceState, SimulationHost};
pub use queue::PendingBatch;
pub use status::Status;
