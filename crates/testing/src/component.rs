// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A small co-simulation component written in WAT
//!
//! It exports the same surface an Emscripten build of an FMU does: `memory`,
//! `malloc`/`free`, `snprintf`, `__indirect_function_table`,
//! `createFmi2CallbackFunctions` and the `fixture_fmi2*` entry points.
//!
//! Memory layout:
//! - `4096 + 8 * vr`: real variables, `vr < 512`
//! - `8192 + 4 * vr`: boolean variables, `vr < 512`
//! - `16384..`: bump heap, rewound whenever every allocation has been freed
//!
//! The component records its own call history in real variables so tests can
//! read it back through `fmi2GetReal`:
//! - `100`: number of `fmi2SetReal` calls, `101`: length of the last batch,
//!   `102`: first reference of the last batch
//! - `103`: number of `fmi2SetBoolean` calls, `104`: length of the last batch
//! - `105`: number of `fmi2DoStep` calls
//! - `106`, `107`: sequence number of the last `fmi2SetReal` / `fmi2SetBoolean`
//!   call, counted across both entry points
//!
//! `fmi2DoStep` writes `currentTime + stepSize` into real `0`. Any reference
//! `>= 512` makes get/set return `fmi2Error`, as does a non-positive step size.
//! `snprintf` ignores its arguments and copies the format string verbatim.
//! `fmi2Instantiate` fails (returns 0) for an empty guid and, when logging is
//! on, reports "instance ready" in category "logAll" through the registered
//! logger. `fmi2Reset` is deliberately not exported.

pub const FIXTURE_IDENTIFIER: &str = "fixture";

pub const FIXTURE_WAT: &str = r#"
(module
	(type $logger_t (func (param i32 i32 i32 i32 i32 i32)))

	(memory (export "memory") 2)
	(table (export "__indirect_function_table") 1 funcref)

	(global $heap (mut i32) (i32.const 16384))
	(global $live (mut i32) (i32.const 0))
	(global $logger (mut i32) (i32.const -1))
	(global $seq (mut i32) (i32.const 0))

	(data (i32.const 16) "2.0\00")
	(data (i32.const 32) "default\00")
	(data (i32.const 64) "instance ready\00")
	(data (i32.const 128) "logAll\00")

	(func $malloc (export "malloc") (param $size i32) (result i32)
		(local $ptr i32)
		(local.set $ptr (global.get $heap))
		(global.set $heap
			(i32.and
				(i32.add (i32.add (global.get $heap) (local.get $size)) (i32.const 7))
				(i32.const -8)))
		(global.set $live (i32.add (global.get $live) (i32.const 1)))
		(local.get $ptr))

	(func $free (export "free") (param $ptr i32)
		(if (i32.eqz (local.get $ptr)) (then (return)))
		(global.set $live (i32.sub (global.get $live) (i32.const 1)))
		(if (i32.eqz (global.get $live))
			(then (global.set $heap (i32.const 16384)))))

	(func $strlen (param $s i32) (result i32)
		(local $n i32)
		(block $done
			(loop $scan
				(br_if $done (i32.eqz (i32.load8_u (i32.add (local.get $s) (local.get $n)))))
				(local.set $n (i32.add (local.get $n) (i32.const 1)))
				(br $scan)))
		(local.get $n))

	(func (export "snprintf") (param $buf i32) (param $max i32) (param $fmt i32) (param $args i32) (result i32)
		(local $len i32)
		(local $n i32)
		(local.set $len (call $strlen (local.get $fmt)))
		(if (i32.gt_u (local.get $max) (i32.const 0))
			(then
				(local.set $n (local.get $len))
				(if (i32.ge_u (local.get $n) (local.get $max))
					(then (local.set $n (i32.sub (local.get $max) (i32.const 1)))))
				(memory.copy (local.get $buf) (local.get $fmt) (local.get $n))
				(i32.store8 (i32.add (local.get $buf) (local.get $n)) (i32.const 0))))
		(local.get $len))

	(func (export "createFmi2CallbackFunctions") (param $logger i32) (result i32)
		(global.set $logger (local.get $logger))
		(call $malloc (i32.const 20)))

	(func (export "fixture_fmi2GetTypesPlatform") (result i32)
		(i32.const 32))

	(func (export "fixture_fmi2GetVersion") (result i32)
		(i32.const 16))

	(func (export "fixture_fmi2Instantiate")
		(param $name i32) (param $type i32) (param $guid i32) (param $resource i32)
		(param $callbacks i32) (param $visible i32) (param $logging i32)
		(result i32)
		(if (i32.eqz (i32.load8_u (local.get $guid)))
			(then (return (i32.const 0))))
		(if (local.get $logging)
			(then
				(if (i32.ge_s (global.get $logger) (i32.const 0))
					(then
						(call_indirect (type $logger_t)
							(i32.const 0)
							(local.get $name)
							(i32.const 0)
							(i32.const 128)
							(i32.const 64)
							(i32.const 0)
							(global.get $logger))))))
		(i32.const 1))

	(func (export "fixture_fmi2SetupExperiment")
		(param $c i32) (param $toleranceDefined i32) (param $tolerance f64)
		(param $start f64) (param $stopDefined i32) (param $stop f64)
		(result i32)
		(f64.store (i32.const 4096) (local.get $start))
		(i32.const 0))

	(func (export "fixture_fmi2EnterInitializationMode") (param $c i32) (result i32)
		(i32.const 0))

	(func (export "fixture_fmi2ExitInitializationMode") (param $c i32) (result i32)
		(i32.const 0))

	(func (export "fixture_fmi2GetReal") (param $c i32) (param $vr i32) (param $nvr i32) (param $value i32) (result i32)
		(local $i i32)
		(local $ref i32)
		(block $done
			(loop $each
				(br_if $done (i32.ge_u (local.get $i) (local.get $nvr)))
				(local.set $ref (i32.load (i32.add (local.get $vr) (i32.shl (local.get $i) (i32.const 2)))))
				(if (i32.ge_u (local.get $ref) (i32.const 512))
					(then (return (i32.const 3))))
				(f64.store
					(i32.add (local.get $value) (i32.shl (local.get $i) (i32.const 3)))
					(f64.load (i32.add (i32.const 4096) (i32.shl (local.get $ref) (i32.const 3)))))
				(local.set $i (i32.add (local.get $i) (i32.const 1)))
				(br $each)))
		(i32.const 0))

	(func (export "fixture_fmi2SetReal") (param $c i32) (param $vr i32) (param $nvr i32) (param $value i32) (result i32)
		(local $i i32)
		(local $ref i32)
		(block $done
			(loop $each
				(br_if $done (i32.ge_u (local.get $i) (local.get $nvr)))
				(local.set $ref (i32.load (i32.add (local.get $vr) (i32.shl (local.get $i) (i32.const 2)))))
				(if (i32.ge_u (local.get $ref) (i32.const 512))
					(then (return (i32.const 3))))
				(f64.store
					(i32.add (i32.const 4096) (i32.shl (local.get $ref) (i32.const 3)))
					(f64.load (i32.add (local.get $value) (i32.shl (local.get $i) (i32.const 3)))))
				(local.set $i (i32.add (local.get $i) (i32.const 1)))
				(br $each)))
		(f64.store (i32.const 4896) (f64.add (f64.load (i32.const 4896)) (f64.const 1)))
		(f64.store (i32.const 4904) (f64.convert_i32_u (local.get $nvr)))
		(if (local.get $nvr)
			(then (f64.store (i32.const 4912) (f64.convert_i32_u (i32.load (local.get $vr))))))
		(global.set $seq (i32.add (global.get $seq) (i32.const 1)))
		(f64.store (i32.const 4944) (f64.convert_i32_u (global.get $seq)))
		(i32.const 0))

	(func (export "fixture_fmi2GetBoolean") (param $c i32) (param $vr i32) (param $nvr i32) (param $value i32) (result i32)
		(local $i i32)
		(local $ref i32)
		(block $done
			(loop $each
				(br_if $done (i32.ge_u (local.get $i) (local.get $nvr)))
				(local.set $ref (i32.load (i32.add (local.get $vr) (i32.shl (local.get $i) (i32.const 2)))))
				(if (i32.ge_u (local.get $ref) (i32.const 512))
					(then (return (i32.const 3))))
				(i32.store
					(i32.add (local.get $value) (i32.shl (local.get $i) (i32.const 2)))
					(i32.load (i32.add (i32.const 8192) (i32.shl (local.get $ref) (i32.const 2)))))
				(local.set $i (i32.add (local.get $i) (i32.const 1)))
				(br $each)))
		(i32.const 0))

	(func (export "fixture_fmi2SetBoolean") (param $c i32) (param $vr i32) (param $nvr i32) (param $value i32) (result i32)
		(local $i i32)
		(local $ref i32)
		(block $done
			(loop $each
				(br_if $done (i32.ge_u (local.get $i) (local.get $nvr)))
				(local.set $ref (i32.load (i32.add (local.get $vr) (i32.shl (local.get $i) (i32.const 2)))))
				(if (i32.ge_u (local.get $ref) (i32.const 512))
					(then (return (i32.const 3))))
				(i32.store
					(i32.add (i32.const 8192) (i32.shl (local.get $ref) (i32.const 2)))
					(i32.load (i32.add (local.get $value) (i32.shl (local.get $i) (i32.const 2)))))
				(local.set $i (i32.add (local.get $i) (i32.const 1)))
				(br $each)))
		(f64.store (i32.const 4920) (f64.add (f64.load (i32.const 4920)) (f64.const 1)))
		(f64.store (i32.const 4928) (f64.convert_i32_u (local.get $nvr)))
		(global.set $seq (i32.add (global.get $seq) (i32.const 1)))
		(f64.store (i32.const 4952) (f64.convert_i32_u (global.get $seq)))
		(i32.const 0))

	(func (export "fixture_fmi2DoStep") (param $c i32) (param $t f64) (param $h f64) (param $noSetFmuStatePriorToCurrentPoint i32) (result i32)
		(if (f64.le (local.get $h) (f64.const 0))
			(then (return (i32.const 3))))
		(f64.store (i32.const 4096) (f64.add (local.get $t) (local.get $h)))
		(f64.store (i32.const 4936) (f64.add (f64.load (i32.const 4936)) (f64.const 1)))
		(i32.const 0))

	(func (export "fixture_fmi2Terminate") (param $c i32) (result i32)
		(i32.const 0))

	(func (export "fixture_fmi2FreeInstance") (param $c i32))
)
"#;

/// Assembles [`FIXTURE_WAT`] into a wasm binary.
pub fn fixture_wasm() -> Vec<u8> {
	wat::parse_str(FIXTURE_WAT).expect("fixture component assembles")
}
