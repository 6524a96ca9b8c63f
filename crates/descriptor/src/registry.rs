// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{HashMap, hash_map};

use tracing::debug;

use crate::variable::{ValueReference, VariableDescriptor};

/// Name-keyed set of declared variables.
///
/// Only the parser inserts; once handed out a registry is read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
	entries: HashMap<String, VariableDescriptor>,
}

pub type VariableRegistry = Registry;
pub type ParameterRegistry = Registry;

impl Registry {
	pub(crate) fn new() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}

	/// Last write wins on duplicate names.
	pub(crate) fn insert(&mut self, variable: VariableDescriptor) {
		if let Some(previous) = self.entries.insert(variable.name.clone(), variable) {
			debug!(name = %previous.name, "duplicate variable name, previous declaration overwritten");
		}
	}

	pub fn get(&self, name: &str) -> Option<&VariableDescriptor> {
		self.entries.get(name)
	}

	pub fn reference(&self, name: &str) -> Option<ValueReference> {
		self.entries.get(name).map(|v| v.value_reference)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> hash_map::Values<'_, String, VariableDescriptor> {
		self.entries.values()
	}

	pub fn names(&self) -> hash_map::Keys<'_, String, VariableDescriptor> {
		self.entries.keys()
	}
}

impl<'a> IntoIterator for &'a Registry {
	type Item = &'a VariableDescriptor;
	type IntoIter = hash_map::Values<'a, String, VariableDescriptor>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::variable::{Causality, Variability};

	fn variable(name: &str, value_reference: ValueReference) -> VariableDescriptor {
		VariableDescriptor {
			name: name.to_string(),
			value_reference,
			description: String::new(),
			causality: Causality::Output,
			variability: Variability::Continuous,
			initial: None,
			can_handle_multiple_set_per_time_instant: false,
			kind: None,
			start: None,
		}
	}

	#[test]
	fn test_duplicate_name_last_write_wins() {
		let mut registry = Registry::new();
		registry.insert(variable("x", 1));
		registry.insert(variable("x", 2));

		assert_eq!(registry.len(), 1);
		assert_eq!(registry.reference("x"), Some(2));
	}

	#[test]
	fn test_lookup() {
		let mut registry = Registry::new();
		registry.insert(variable("x", 1));
		registry.insert(variable("y", 7));

		assert!(registry.contains("y"));
		assert_eq!(registry.get("y").map(|v| v.value_reference), Some(7));
		assert_eq!(registry.reference("z"), None);
		assert_eq!(registry.iter().count(), 2);
	}
}
