// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, DescriptorError>;

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
	#[error("missing configuration: no descriptor source configured")]
	MissingSource,

	#[error("{}", render_transport(*status, message))]
	Transport {
		status: Option<u16>,
		message: String,
	},

	#[error("failed to read descriptor '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("malformed descriptor: {0}")]
	Malformed(String),
}

fn render_transport(status: Option<u16>, message: &str) -> String {
	match status {
		Some(status) => format!("{} {}", status, message),
		None => format!("transport failure: {}", message),
	}
}

/// Failure of a single `ScalarVariable` entry. Never escapes a registry pass.
#[derive(Debug, thiserror::Error)]
pub(crate) enum EntryError {
	#[error("variable is missing the '{0}' attribute")]
	MissingAttribute(&'static str),

	#[error("variable '{name}' has an invalid valueReference '{value}'")]
	InvalidReference {
		name: String,
		value: String,
	},

	#[error("variable '{name}' has an invalid canHandleMultipleSetPerTimeInstant '{value}'")]
	InvalidFlag {
		name: String,
		value: String,
	},

	#[error("unreadable attributes: {0}")]
	Attribute(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_transport_message_contains_status() {
		let err = DescriptorError::Transport {
			status: Some(404),
			message: "Not Found".to_string(),
		};
		assert_eq!(err.to_string(), "404 Not Found");
	}

	#[test]
	fn test_transport_without_status() {
		let err = DescriptorError::Transport {
			status: None,
			message: "connection refused".to_string(),
		};
		assert_eq!(err.to_string(), "transport failure: connection refused");
	}
}
