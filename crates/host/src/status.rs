// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
};

use crate::error::{HostError, Result};

/// `fmi2Status` as returned by every lifecycle, get/set and step entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
	Ok = 0,
	Warning = 1,
	Discard = 2,
	Error = 3,
	Fatal = 4,
	Pending = 5,
}

impl Status {
	pub fn from_code(code: i32) -> Option<Self> {
		match code {
			0 => Some(Status::Ok),
			1 => Some(Status::Warning),
			2 => Some(Status::Discard),
			3 => Some(Status::Error),
			4 => Some(Status::Fatal),
			5 => Some(Status::Pending),
			_ => None,
		}
	}

	pub fn code(self) -> i32 {
		self as i32
	}

	pub fn is_failure(self) -> bool {
		matches!(self, Status::Error | Status::Fatal)
	}
}

impl Display for Status {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Status::Ok => f.write_str("fmi2OK"),
			Status::Warning => f.write_str("fmi2Warning"),
			Status::Discard => f.write_str("fmi2Discard"),
			Status::Error => f.write_str("fmi2Error"),
			Status::Fatal => f.write_str("fmi2Fatal"),
			Status::Pending => f.write_str("fmi2Pending"),
		}
	}
}

/// `Error` and `Fatal` become [`HostError::Status`]; every other code is
/// handed back to the caller.
pub(crate) fn check(function: &'static str, code: i32) -> Result<Status> {
	let status = Status::from_code(code).ok_or(HostError::UnknownStatus {
		function,
		code,
	})?;

	if status.is_failure() {
		return Err(HostError::Status {
			function,
			status,
		});
	}
	Ok(status)
}
