// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use common::*;
use cosim_descriptor::DescriptorError;
use cosim_host::{Causality, HostConfig, HostError, SimulationHost};
use cosim_testing::{
	component::fixture_wasm,
	descriptor::{FIXTURE, UNKNOWN_IDENTIFIER},
	http::serve_once,
	init_tracing,
};

#[tokio::test]
async fn test_load_from_inline_descriptor() {
	let host = load(config(FIXTURE)).await;

	let model = host.model();
	assert_eq!(model.guid, "{fixture-0001}");
	assert_eq!(model.identifier, "fixture");
	assert_eq!(host.parameters().len(), 1);
	assert_eq!(host.parameters().reference("gain"), Some(8));
	assert_eq!(host.variables().get("y").unwrap().causality, Causality::Output);
	assert!(!host.variables().contains("gain"));
	assert!(host.logger_index() >= 1);
}

#[tokio::test]
async fn test_load_over_http() {
	init_tracing();
	let url = serve_once(200, "OK", FIXTURE).await;

	let host = SimulationHost::load(
		HostConfig::new().descriptor_url(url).component_bytes(fixture_wasm()).inherit_stdio(false),
	)
	.await
	.unwrap();

	assert_eq!(host.model().identifier, "fixture");
}

#[tokio::test]
async fn test_not_found_descriptor() {
	init_tracing();
	let url = serve_once(404, "Not Found", "").await;

	let err = SimulationHost::load(HostConfig::new().descriptor_url(url).component_bytes(fixture_wasm()))
		.await
		.err()
		.unwrap();

	assert!(matches!(
		err,
		HostError::Descriptor(DescriptorError::Transport {
			status: Some(404),
			..
		})
	));
	assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_missing_descriptor_source() {
	let err = SimulationHost::load(HostConfig::new().component_bytes(fixture_wasm())).await.err().unwrap();
	assert!(matches!(err, HostError::Descriptor(DescriptorError::MissingSource)));
}

#[tokio::test]
async fn test_missing_component_source() {
	let config = HostConfig::new().descriptor(cosim_host::DescriptorSource::inline(FIXTURE.as_bytes()));

	let err = SimulationHost::load(config).await.err().unwrap();
	assert!(matches!(err, HostError::MissingComponent));
}

#[tokio::test]
async fn test_component_from_file() {
	let path = std::env::temp_dir().join(format!("cosim-fixture-{}.wasm", std::process::id()));
	tokio::fs::write(&path, fixture_wasm()).await.unwrap();

	let config = config(FIXTURE).component_file(&path);
	let mut host = load(config).await;
	host.instantiate().unwrap();

	tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn test_identifier_without_entry_points() {
	init_tracing();

	let err = SimulationHost::load(config(UNKNOWN_IDENTIFIER)).await.err().unwrap();
	assert!(matches!(err, HostError::Binding { ref name, .. } if name == "other_fmi2GetTypesPlatform"));
}

#[tokio::test]
async fn test_invalid_component() {
	init_tracing();

	let config = config(FIXTURE).component_bytes(b"\0asm\x01\0\0\0garbage".to_vec());
	let err = SimulationHost::load(config).await.err().unwrap();
	assert!(matches!(err, HostError::Component(_)));
}
