// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Loading and parsing of co-simulation component descriptors
//!
//! A component ships a `modelDescription.xml` document describing its identity
//! and the scalar variables it declares. This crate retrieves that document from
//! a configured [`DescriptorSource`], extracts the [`ModelDescriptor`] and splits
//! the declared variables into two immutable registries: one for parameters and
//! one for everything else.

pub mod error;
pub mod loader;
pub mod model;
pub mod parse;
pub mod registry;
pub mod variable;

pub use error::{DescriptorError, Result};
pub use loader::{Document, DescriptorSource, load};
pub use model::{DefaultExperiment, ModelDescriptor};
pub use parse::{Descriptor, parse};
pub use registry::{ParameterRegistry, Registry, VariableRegistry};
pub use variable::{Causality, Initial, ScalarKind, ValueReference, VariableDescriptor, Variability};
