// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Display;

use cosim_descriptor::DescriptorError;

use crate::status::Status;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
	#[error(transparent)]
	Descriptor(#[from] DescriptorError),

	#[error("missing configuration: no component source configured")]
	MissingComponent,

	#[error("failed to load component: {0}")]
	Component(String),

	#[error("entry point '{name}' could not be bound: {reason}")]
	Binding {
		name: String,
		reason: String,
	},

	#[error("foreign call failed: {0}")]
	Runtime(String),

	#[error("foreign allocation of {bytes} bytes failed")]
	OutOfMemory {
		bytes: usize,
	},

	#[error("foreign memory access out of bounds: offset {offset}, length {len}")]
	OutOfBounds {
		offset: usize,
		len: usize,
	},

	#[error("{references} references but {values} values")]
	LengthMismatch {
		references: usize,
		values: usize,
	},

	#[error("no component instance, instantiate first")]
	NotInstantiated,

	#[error("component refused to instantiate '{instance}'")]
	InstantiationFailed {
		instance: String,
	},

	#[error("{function} returned unknown status code {code}")]
	UnknownStatus {
		function: &'static str,
		code: i32,
	},

	#[error("{0} is not exported by the component")]
	Unsupported(String),

	#[error("{function} returned {status}")]
	Status {
		function: &'static str,
		status: Status,
	},
}

impl HostError {
	pub(crate) fn runtime(err: impl Display) -> Self {
		HostError::Runtime(format!("{:#}", err))
	}

	pub(crate) fn component(err: impl Display) -> Self {
		HostError::Component(format!("{:#}", err))
	}
}
