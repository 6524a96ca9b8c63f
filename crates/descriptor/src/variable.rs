// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
};

/// Integer id addressing a declared variable in foreign calls.
pub type ValueReference = u32;

/// One declared `ScalarVariable`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDescriptor {
	pub name: String,
	pub value_reference: ValueReference,
	pub description: String,
	pub causality: Causality,
	pub variability: Variability,
	pub initial: Option<Initial>,
	pub can_handle_multiple_set_per_time_instant: bool,
	/// Type of the first type child (`Real`, `Boolean`, ...), if any.
	pub kind: Option<ScalarKind>,
	/// Raw `start` attribute of the type child.
	pub start: Option<String>,
}

impl VariableDescriptor {
	pub fn is_parameter(&self) -> bool {
		self.causality == Causality::Parameter
	}
}

macro_rules! attribute_enum {
	(
		$(#[$meta:meta])*
		$name:ident {
			$($variant:ident => $text:literal),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash)]
		pub enum $name {
			$($variant,)+
			/// Attribute text not defined by FMI 2.0, kept verbatim.
			Other(String),
		}

		impl $name {
			pub fn as_str(&self) -> &str {
				match self {
					$($name::$variant => $text,)+
					$name::Other(text) => text.as_str(),
				}
			}
		}

		impl From<&str> for $name {
			fn from(text: &str) -> Self {
				match text {
					$($text => $name::$variant,)+
					other => $name::Other(other.to_string()),
				}
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}
	};
}

attribute_enum! {
	/// Declared role of a variable in the data flow.
	Causality {
		Parameter => "parameter",
		CalculatedParameter => "calculatedParameter",
		Input => "input",
		Output => "output",
		Local => "local",
		Independent => "independent",
	}
}

attribute_enum! {
	Variability {
		Constant => "constant",
		Fixed => "fixed",
		Tunable => "tunable",
		Discrete => "discrete",
		Continuous => "continuous",
	}
}

attribute_enum! {
	Initial {
		Exact => "exact",
		Approx => "approx",
		Calculated => "calculated",
	}
}

impl Default for Causality {
	fn default() -> Self {
		Causality::Local
	}
}

impl Default for Variability {
	fn default() -> Self {
		Variability::Continuous
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
	Real,
	Integer,
	Boolean,
	String,
	Enumeration,
}

impl ScalarKind {
	pub(crate) fn from_element(name: &[u8]) -> Option<Self> {
		match name {
			b"Real" => Some(ScalarKind::Real),
			b"Integer" => Some(ScalarKind::Integer),
			b"Boolean" => Some(ScalarKind::Boolean),
			b"String" => Some(ScalarKind::String),
			b"Enumeration" => Some(ScalarKind::Enumeration),
			_ => None,
		}
	}
}
