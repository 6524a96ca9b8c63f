// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quick_xml::{Reader, events::Event};
use tracing::warn;

use super::attributes::Attributes;
use crate::{
	error::{DescriptorError, Result},
	model::{DefaultExperiment, ModelDescriptor},
};

const ROOT: &[u8] = b"fmiModelDescription";
const CO_SIMULATION: &[u8] = b"CoSimulation";
const DEFAULT_EXPERIMENT: &[u8] = b"DefaultExperiment";

/// Reads `//fmiModelDescription/@guid` and
/// `//fmiModelDescription/CoSimulation/@modelIdentifier`. Absent attributes are
/// empty strings.
pub(super) fn extract(text: &str) -> Result<ModelDescriptor> {
	let mut reader = Reader::from_str(text);
	let mut model = ModelDescriptor::default();
	let mut path: Vec<Vec<u8>> = Vec::new();
	let mut root_seen = false;
	let mut co_simulation_seen = false;

	loop {
		let event = match reader.read_event() {
			Ok(event) => event,
			Err(err) if root_seen => {
				warn!(error = %err, "descriptor is malformed after the model identity, ignoring the rest");
				return Ok(model);
			}
			Err(err) => return Err(DescriptorError::Malformed(err.to_string())),
		};

		let (element, is_empty) = match event {
			Event::Start(element) => (element, false),
			Event::Empty(element) => (element, true),
			Event::End(_) => {
				path.pop();
				continue;
			}
			Event::Eof => break,
			_ => continue,
		};

		let name = element.local_name().as_ref().to_vec();
		let parent_is_root = path.last().is_some_and(|parent| parent.as_slice() == ROOT);

		if name == ROOT && !root_seen {
			root_seen = true;
			let attributes = Attributes::read(&element).map_err(DescriptorError::Malformed)?;
			model.guid = attributes.text("guid");
			model.model_name = attributes.text("modelName");
			model.fmi_version = attributes.text("fmiVersion");
			model.description = attributes.text("description");
		} else if name == CO_SIMULATION && parent_is_root && !co_simulation_seen {
			co_simulation_seen = true;
			let attributes = Attributes::read(&element).map_err(DescriptorError::Malformed)?;
			model.identifier = attributes.text("modelIdentifier");
		} else if name == DEFAULT_EXPERIMENT && parent_is_root && model.default_experiment.is_none() {
			let attributes = Attributes::read(&element).map_err(DescriptorError::Malformed)?;
			model.default_experiment = Some(DefaultExperiment {
				start_time: number(&attributes, "startTime"),
				stop_time: number(&attributes, "stopTime"),
				tolerance: number(&attributes, "tolerance"),
				step_size: number(&attributes, "stepSize"),
			});
		}

		if !is_empty {
			path.push(name);
		}
	}

	Ok(model)
}

fn number(attributes: &Attributes, key: &str) -> Option<f64> {
	let text = attributes.get(key)?;
	match text.trim().parse::<f64>() {
		Ok(value) => Some(value),
		Err(_) => {
			warn!(attribute = key, value = text, "ignoring unparsable DefaultExperiment attribute");
			None
		}
	}
}
