// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quick_xml::{
	Reader,
	events::{BytesStart, Event},
};
use tracing::warn;

use super::attributes::Attributes;
use crate::{
	error::EntryError,
	registry::Registry,
	variable::{Causality, Initial, ScalarKind, VariableDescriptor, Variability},
};

const SCALAR_VARIABLE: &[u8] = b"ScalarVariable";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Selection {
	/// Every causality except `parameter`.
	Variables,
	Parameters,
}

impl Selection {
	fn accepts(self, causality: &Causality) -> bool {
		match self {
			Selection::Variables => *causality != Causality::Parameter,
			Selection::Parameters => *causality == Causality::Parameter,
		}
	}

	fn label(self) -> &'static str {
		match self {
			Selection::Variables => "variables",
			Selection::Parameters => "parameters",
		}
	}
}

/// Never fails: a broken document leaves the registry with the entries read so far.
pub(super) fn collect(text: &str, selection: Selection) -> Registry {
	let mut registry = Registry::new();
	if let Err(err) = fill(text, selection, &mut registry) {
		warn!(
			registry = selection.label(),
			entries = registry.len(),
			error = %err,
			"registry construction stopped early, keeping partial registry"
		);
	}
	registry
}

fn fill(text: &str, selection: Selection, registry: &mut Registry) -> Result<(), quick_xml::Error> {
	let mut reader = Reader::from_str(text);
	let mut current: Option<VariableDescriptor> = None;

	loop {
		match reader.read_event()? {
			Event::Start(element) if element.local_name().as_ref() == SCALAR_VARIABLE => {
				current = entry(&element, selection);
			}
			Event::Empty(element) if element.local_name().as_ref() == SCALAR_VARIABLE => {
				if let Some(variable) = entry(&element, selection) {
					registry.insert(variable);
				}
			}
			Event::Start(element) | Event::Empty(element) => {
				if let Some(variable) = current.as_mut() {
					type_child(variable, &element);
				}
			}
			Event::End(element) if element.local_name().as_ref() == SCALAR_VARIABLE => {
				if let Some(variable) = current.take() {
					registry.insert(variable);
				}
			}
			Event::Eof => return Ok(()),
			_ => {}
		}
	}
}

fn entry(element: &BytesStart<'_>, selection: Selection) -> Option<VariableDescriptor> {
	match read_entry(element, selection) {
		Ok(variable) => variable,
		Err(err) => {
			warn!(registry = selection.label(), error = %err, "skipping malformed variable");
			None
		}
	}
}

/// `Ok(None)` when the entry belongs to the other registry.
fn read_entry(element: &BytesStart<'_>, selection: Selection) -> Result<Option<VariableDescriptor>, EntryError> {
	let attributes = Attributes::read(element).map_err(EntryError::Attribute)?;

	let causality = attributes.get("causality").map(Causality::from).unwrap_or_default();
	if !selection.accepts(&causality) {
		return Ok(None);
	}

	build(&attributes, causality).map(Some)
}

fn build(attributes: &Attributes, causality: Causality) -> Result<VariableDescriptor, EntryError> {
	let name = attributes.get("name").ok_or(EntryError::MissingAttribute("name"))?.to_string();

	let reference = attributes.get("valueReference").ok_or(EntryError::MissingAttribute("valueReference"))?;
	let value_reference = reference.trim().parse().map_err(|_| EntryError::InvalidReference {
		name: name.clone(),
		value: reference.to_string(),
	})?;

	let can_handle_multiple_set_per_time_instant = match attributes.get("canHandleMultipleSetPerTimeInstant") {
		None => false,
		Some("true") | Some("1") => true,
		Some("false") | Some("0") => false,
		Some(other) => {
			return Err(EntryError::InvalidFlag {
				name,
				value: other.to_string(),
			});
		}
	};

	Ok(VariableDescriptor {
		description: attributes.text("description"),
		value_reference,
		causality,
		variability: attributes.get("variability").map(Variability::from).unwrap_or_default(),
		initial: attributes.get("initial").map(Initial::from),
		can_handle_multiple_set_per_time_instant,
		kind: None,
		start: None,
		name,
	})
}

/// Only the first type child counts; later siblings (annotations etc.) are ignored.
fn type_child(variable: &mut VariableDescriptor, element: &BytesStart<'_>) {
	if variable.kind.is_some() {
		return;
	}
	let Some(kind) = ScalarKind::from_element(element.local_name().as_ref()) else {
		return;
	};

	variable.kind = Some(kind);
	match Attributes::read(element) {
		Ok(attributes) => variable.start = attributes.get("start").map(str::to_string),
		Err(err) => {
			warn!(name = %variable.name, error = %err, "ignoring unreadable type attributes");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DOCUMENT: &str = r#"<fmiModelDescription guid="g">
		<ModelVariables>
			<ScalarVariable name="h" valueReference="0" causality="output" variability="continuous" initial="exact" description="height">
				<Real start="1"/>
			</ScalarVariable>
			<ScalarVariable name="e" valueReference="3" causality="parameter" variability="tunable" canHandleMultipleSetPerTimeInstant="true">
				<Real start="0.7"/>
			</ScalarVariable>
			<ScalarVariable name="bounced" valueReference="4">
				<Boolean/>
			</ScalarVariable>
		</ModelVariables>
	</fmiModelDescription>"#;

	#[test]
	fn test_selection_splits_on_causality() {
		let variables = collect(DOCUMENT, Selection::Variables);
		let parameters = collect(DOCUMENT, Selection::Parameters);

		assert_eq!(variables.len(), 2);
		assert!(variables.contains("h"));
		assert!(variables.contains("bounced"));

		assert_eq!(parameters.len(), 1);
		assert!(parameters.contains("e"));
	}

	#[test]
	fn test_attributes_copied() {
		let variables = collect(DOCUMENT, Selection::Variables);
		let h = variables.get("h").unwrap();
		assert_eq!(h.value_reference, 0);
		assert_eq!(h.description, "height");
		assert_eq!(h.causality, Causality::Output);
		assert_eq!(h.variability, Variability::Continuous);
		assert_eq!(h.initial, Some(Initial::Exact));
		assert_eq!(h.kind, Some(ScalarKind::Real));
		assert_eq!(h.start.as_deref(), Some("1"));
		assert!(!h.can_handle_multiple_set_per_time_instant);

		let parameters = collect(DOCUMENT, Selection::Parameters);
		let e = parameters.get("e").unwrap();
		assert_eq!(e.variability, Variability::Tunable);
		assert!(e.can_handle_multiple_set_per_time_instant);
		assert_eq!(e.start.as_deref(), Some("0.7"));
	}

	#[test]
	fn test_defaults_for_absent_attributes() {
		let variables = collect(DOCUMENT, Selection::Variables);
		let bounced = variables.get("bounced").unwrap();
		assert_eq!(bounced.causality, Causality::Local);
		assert_eq!(bounced.variability, Variability::Continuous);
		assert_eq!(bounced.initial, None);
		assert_eq!(bounced.description, "");
		assert_eq!(bounced.kind, Some(ScalarKind::Boolean));
		assert_eq!(bounced.start, None);
	}

	#[test]
	fn test_malformed_entry_is_skipped() {
		let document = r#"<fmiModelDescription><ModelVariables>
			<ScalarVariable name="a" valueReference="x1" causality="input"><Real/></ScalarVariable>
			<ScalarVariable valueReference="2" causality="input"><Real/></ScalarVariable>
			<ScalarVariable name="c" valueReference="3" causality="input" canHandleMultipleSetPerTimeInstant="maybe"/>
			<ScalarVariable name="d" valueReference="4" causality="input"><Real/></ScalarVariable>
		</ModelVariables></fmiModelDescription>"#;

		let variables = collect(document, Selection::Variables);
		assert_eq!(variables.len(), 1);
		assert_eq!(variables.reference("d"), Some(4));
	}

	#[test]
	fn test_broken_document_keeps_partial_registry() {
		let document = r#"<fmiModelDescription><ModelVariables>
			<ScalarVariable name="a" valueReference="1" causality="input"><Real/></ScalarVariable>
			<ScalarVariable name="b" valueReference="2" causality="input"><Real/></Scalar>
			<ScalarVariable name="c" valueReference="3" causality="input"><Real/></ScalarVariable>
		</ModelVariables></fmiModelDescription>"#;

		let variables = collect(document, Selection::Variables);
		assert_eq!(variables.len(), 1);
		assert!(variables.contains("a"));
	}

	#[test]
	fn test_self_closing_variable() {
		let document = r#"<fmiModelDescription><ScalarVariable name="p" valueReference="9" causality="parameter"/></fmiModelDescription>"#;
		let parameters = collect(document, Selection::Parameters);
		assert_eq!(parameters.reference("p"), Some(9));
		assert_eq!(parameters.get("p").unwrap().kind, None);
	}

	#[test]
	fn test_unreadable_attributes_skip_the_entry() {
		let document = r#"<fmiModelDescription><ModelVariables>
			<ScalarVariable name="a" name="b" valueReference="1" causality="input"><Real start="2"/></ScalarVariable>
			<ScalarVariable name="c" valueReference="3" causality="input"><Real/></ScalarVariable>
		</ModelVariables></fmiModelDescription>"#;

		let variables = collect(document, Selection::Variables);
		assert_eq!(variables.len(), 1);
		assert!(variables.contains("c"));
		assert!(!variables.contains("a"));
		assert!(!variables.contains("b"));
	}

	#[test]
	fn test_unreadable_attributes_are_an_entry_error() {
		let element = BytesStart::from_content(r#"ScalarVariable name="a" name="b" valueReference="1""#, 14);
		let err = read_entry(&element, Selection::Variables).unwrap_err();
		assert!(matches!(err, EntryError::Attribute(_)));
		assert!(err.to_string().starts_with("unreadable attributes: "));
	}
}
