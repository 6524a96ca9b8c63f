// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use common::*;
use cosim_host::{HostError, Status};

#[tokio::test]
async fn test_single_get_uses_two_buffers() {
	let mut host = instantiated().await;
	host.set_single_real(7, 4.5).unwrap();

	let before = host.heap_stats();
	let value = host.get_single_real(7).unwrap();
	let after = host.heap_stats();

	assert_eq!(value, 4.5);
	assert_eq!(after.allocations - before.allocations, 2);
	assert_eq!(after.releases - before.releases, 2);
	assert_eq!(after.live(), 0);
}

#[tokio::test]
async fn test_single_set_uses_two_buffers() {
	let mut host = instantiated().await;

	let before = host.heap_stats();
	assert_eq!(host.set_single_boolean(1, true).unwrap(), Status::Ok);
	let after = host.heap_stats();

	assert_eq!(after.allocations - before.allocations, 2);
	assert_eq!(after.releases - before.releases, 2);
}

#[tokio::test]
async fn test_buffers_are_released_when_the_component_reports_an_error() {
	let mut host = instantiated().await;
	let before = host.heap_stats();

	let err = host.set_single_real(REJECTED, 1.0).unwrap_err();
	assert!(matches!(
		err,
		HostError::Status {
			status: Status::Error,
			..
		}
	));

	let err = host.get_single_real(REJECTED).unwrap_err();
	assert_eq!(err.to_string(), "fmi2GetReal returned fmi2Error");

	let err = host.get_single_boolean(REJECTED).unwrap_err();
	assert!(matches!(err, HostError::Status { function: "fmi2GetBoolean", .. }));

	let after = host.heap_stats();
	assert_eq!(after.allocations - before.allocations, 6);
	assert_eq!(after.releases - before.releases, 6);
	assert_eq!(after.live(), 0);
}

#[tokio::test]
async fn test_empty_transfers_do_not_allocate() {
	let mut host = instantiated().await;
	let before = host.heap_stats();

	assert_eq!(host.set_real(&[], &[]).unwrap(), Status::Ok);
	assert_eq!(host.get_real(&[], &mut []).unwrap(), Status::Ok);

	assert_eq!(host.heap_stats(), before);
}

#[tokio::test]
async fn test_get_leaves_extra_output_untouched() {
	let mut host = instantiated().await;
	host.set_real(&[5, 6], &[1.25, 2.5]).unwrap();

	let mut output = [-1.0; 3];
	host.get_real(&[6, 5], &mut output).unwrap();
	assert_eq!(output, [2.5, 1.25, -1.0]);
}

#[tokio::test]
async fn test_transfers_need_an_instance() {
	let mut host = load(config(cosim_testing::descriptor::FIXTURE)).await;

	assert!(matches!(host.set_single_real(5, 1.0), Err(HostError::NotInstantiated)));
	assert!(matches!(host.get_single_boolean(1), Err(HostError::NotInstantiated)));
	assert_eq!(host.heap_stats().allocations, 0);
}
