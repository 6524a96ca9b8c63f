// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use quick_xml::events::BytesStart;

/// Unescaped attributes of one element, keyed by local name.
pub(super) struct Attributes {
	values: HashMap<String, String>,
}

impl Attributes {
	pub(super) fn read(element: &BytesStart<'_>) -> Result<Self, String> {
		let mut values = HashMap::new();
		for attribute in element.attributes() {
			let attribute = attribute.map_err(|e| e.to_string())?;
			let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
			let value = attribute.unescape_value().map_err(|e| e.to_string())?;
			values.insert(key, value.into_owned());
		}
		Ok(Self {
			values,
		})
	}

	pub(super) fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	/// Missing attributes read as the empty string.
	pub(super) fn text(&self, key: &str) -> String {
		self.get(key).unwrap_or_default().to_string()
	}
}
