// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `modelDescription.xml` parsing
//!
//! Identity is read in one pass over the document. The declared scalar
//! variables are then walked twice, once per registry, so that a failure while
//! building one registry never affects the other.

mod attributes;
mod identity;
mod variables;

use tracing::{debug, instrument};

use crate::{
	error::Result,
	loader::Document,
	model::ModelDescriptor,
	registry::{ParameterRegistry, VariableRegistry},
};

/// Everything extracted from a descriptor document.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
	pub model: ModelDescriptor,
	pub variables: VariableRegistry,
	pub parameters: ParameterRegistry,
}

/// Fails only when the document is unusable before the model identity is
/// found. Broken variable entries are logged and skipped.
#[instrument(name = "descriptor::parse", level = "debug", skip_all)]
pub fn parse(document: &Document) -> Result<Descriptor> {
	let text = document.text();

	let model = identity::extract(text)?;
	let variables = variables::collect(text, variables::Selection::Variables);
	let parameters = variables::collect(text, variables::Selection::Parameters);

	debug!(
		guid = %model.guid,
		identifier = %model.identifier,
		variables = variables.len(),
		parameters = parameters.len(),
		"descriptor parsed"
	);

	Ok(Descriptor {
		model,
		variables,
		parameters,
	})
}
