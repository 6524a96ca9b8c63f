// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Retrieval of the raw descriptor document

use std::{error::Error, path::PathBuf};

use reqwest::StatusCode;
use tracing::{debug, instrument};

use crate::error::{DescriptorError, Result};

/// Where the descriptor document comes from.
#[derive(Debug, Clone)]
pub enum DescriptorSource {
	Url(String),
	File(PathBuf),
	Inline(Vec<u8>),
}

impl DescriptorSource {
	pub fn url(url: impl Into<String>) -> Self {
		DescriptorSource::Url(url.into())
	}

	pub fn file(path: impl Into<PathBuf>) -> Self {
		DescriptorSource::File(path.into())
	}

	pub fn inline(bytes: impl Into<Vec<u8>>) -> Self {
		DescriptorSource::Inline(bytes.into())
	}
}

/// A retrieved descriptor, guaranteed to be UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	text: String,
}

impl Document {
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		let text = String::from_utf8(bytes)
			.map_err(|e| DescriptorError::Malformed(format!("descriptor is not UTF-8: {}", e)))?;
		Ok(Self {
			text,
		})
	}

	pub fn text(&self) -> &str {
		&self.text
	}
}

impl From<String> for Document {
	fn from(text: String) -> Self {
		Self {
			text,
		}
	}
}

impl From<&str> for Document {
	fn from(text: &str) -> Self {
		Self {
			text: text.to_string(),
		}
	}
}

/// Performs a single retrieval attempt. No retry, no timeout.
#[instrument(name = "descriptor::load", level = "debug", skip_all)]
pub async fn load(source: Option<&DescriptorSource>) -> Result<Document> {
	let Some(source) = source else {
		return Err(DescriptorError::MissingSource);
	};

	let bytes = match source {
		DescriptorSource::Url(url) => fetch(url).await?,
		DescriptorSource::File(path) => tokio::fs::read(path).await.map_err(|source| DescriptorError::Io {
			path: path.clone(),
			source,
		})?,
		DescriptorSource::Inline(bytes) => bytes.clone(),
	};

	debug!(bytes = bytes.len(), "descriptor retrieved");
	Document::from_bytes(bytes)
}

async fn fetch(url: &str) -> Result<Vec<u8>> {
	let response = reqwest::get(url).await.map_err(|e| DescriptorError::Transport {
		status: e.status().map(|s| s.as_u16()),
		message: render_chain(&e),
	})?;

	let status = response.status();
	if !is_success(status) {
		return Err(DescriptorError::Transport {
			status: Some(status.as_u16()),
			message: status.canonical_reason().unwrap_or("unexpected status").to_string(),
		});
	}

	let body = response.bytes().await.map_err(|e| DescriptorError::Transport {
		status: Some(status.as_u16()),
		message: render_chain(&e),
	})?;
	Ok(body.to_vec())
}

fn is_success(status: StatusCode) -> bool {
	status == StatusCode::OK || status == StatusCode::NON_AUTHORITATIVE_INFORMATION
}

/// The error followed by each of its causes, joined with ": "
fn render_chain(err: &dyn Error) -> String {
	let mut message = err.to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		message.push_str(": ");
		message.push_str(&cause.to_string());
		source = cause.source();
	}
	message
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_missing_source() {
		let err = load(None).await.unwrap_err();
		assert!(matches!(err, DescriptorError::MissingSource));
		assert!(err.to_string().contains("missing configuration"));
	}

	#[tokio::test]
	async fn test_inline_source() {
		let source = DescriptorSource::inline("<fmiModelDescription/>");
		let document = load(Some(&source)).await.unwrap();
		assert_eq!(document.text(), "<fmiModelDescription/>");
	}

	#[tokio::test]
	async fn test_non_utf8_is_malformed() {
		let source = DescriptorSource::inline(vec![0xff, 0xfe, 0x00]);
		let err = load(Some(&source)).await.unwrap_err();
		assert!(matches!(err, DescriptorError::Malformed(_)));
	}

	#[tokio::test]
	async fn test_missing_file() {
		let source = DescriptorSource::file("/nonexistent/modelDescription.xml");
		let err = load(Some(&source)).await.unwrap_err();
		assert!(matches!(err, DescriptorError::Io { .. }));
	}

	#[test]
	fn test_success_statuses() {
		assert!(is_success(StatusCode::OK));
		assert!(is_success(StatusCode::NON_AUTHORITATIVE_INFORMATION));
		assert!(!is_success(StatusCode::NO_CONTENT));
		assert!(!is_success(StatusCode::NOT_FOUND));
	}

	#[derive(Debug, thiserror::Error)]
	#[error("error sending request")]
	struct Outer(#[source] std::io::Error);

	#[test]
	fn test_render_chain_includes_causes() {
		let err = Outer(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"));
		assert_eq!(render_chain(&err), "error sending request: connection refused");
	}

	#[test]
	fn test_render_chain_without_cause() {
		let err = std::io::Error::other("timed out");
		assert_eq!(render_chain(&err), "timed out");
	}
}
