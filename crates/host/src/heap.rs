// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Marshalling between host values and the component's linear memory
//!
//! Every buffer placed in foreign memory is obtained through a [`Scope`] and
//! released by [`ForeignHeap::scoped`] when the scope ends, on success and on
//! failure alike.

use tracing::{trace, warn};
use wasmtime::{AsContext, AsContextMut, Instance, Memory, MemoryAccessError, TypedFunc};

use crate::{
	component::HostState,
	error::{HostError, Result},
};

/// A fixed-width value that crosses the boundary as little-endian bytes
pub trait Scalar: Copy + Default {
	const WIDTH: usize;

	fn encode(self, out: &mut [u8]);

	fn decode(bytes: &[u8]) -> Self;
}

impl Scalar for f64 {
	const WIDTH: usize = 8;

	fn encode(self, out: &mut [u8]) {
		out.copy_from_slice(&self.to_le_bytes());
	}

	fn decode(bytes: &[u8]) -> Self {
		let mut raw = [0u8; 8];
		raw.copy_from_slice(bytes);
		f64::from_le_bytes(raw)
	}
}

impl Scalar for u32 {
	const WIDTH: usize = 4;

	fn encode(self, out: &mut [u8]) {
		out.copy_from_slice(&self.to_le_bytes());
	}

	fn decode(bytes: &[u8]) -> Self {
		let mut raw = [0u8; 4];
		raw.copy_from_slice(bytes);
		u32::from_le_bytes(raw)
	}
}

impl Scalar for i32 {
	const WIDTH: usize = 4;

	fn encode(self, out: &mut [u8]) {
		out.copy_from_slice(&self.to_le_bytes());
	}

	fn decode(bytes: &[u8]) -> Self {
		let mut raw = [0u8; 4];
		raw.copy_from_slice(bytes);
		i32::from_le_bytes(raw)
	}
}

/// `fmi2Boolean` is a C `int`: 1 for true, 0 for false. Any non-zero value
/// read back counts as true.
impl Scalar for bool {
	const WIDTH: usize = 4;

	fn encode(self, out: &mut [u8]) {
		i32::from(self).encode(out);
	}

	fn decode(bytes: &[u8]) -> Self {
		i32::decode(bytes) != 0
	}
}

pub(crate) fn encode_all<T: Scalar>(values: &[T]) -> Vec<u8> {
	let mut bytes = vec![0u8; values.len() * T::WIDTH];
	for (chunk, value) in bytes.chunks_exact_mut(T::WIDTH).zip(values) {
		value.encode(chunk);
	}
	bytes
}

pub(crate) fn decode_all<T: Scalar>(bytes: &[u8]) -> Vec<T> {
	bytes.chunks_exact(T::WIDTH).map(T::decode).collect()
}

/// Converts a host length into the `i32` the foreign signatures expect
pub(crate) fn foreign_len(len: usize) -> Result<i32> {
	i32::try_from(len).map_err(|_| HostError::OutOfMemory {
		bytes: len,
	})
}

/// Foreign addresses are unsigned 32-bit offsets carried in an `i32`
fn offset(ptr: i32) -> usize {
	ptr as u32 as usize
}

/// A transient allocation in foreign memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedBuffer {
	pub ptr: i32,
	pub len: usize,
}

impl SharedBuffer {
	const EMPTY: SharedBuffer = SharedBuffer {
		ptr: 0,
		len: 0,
	};

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}
}

/// Allocations and releases performed by the host in foreign memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
	pub allocations: u64,
	pub releases: u64,
}

impl HeapStats {
	pub fn live(&self) -> u64 {
		self.allocations.saturating_sub(self.releases)
	}
}

/// The component's linear memory together with its exported allocator
#[derive(Clone)]
pub(crate) struct ForeignHeap {
	memory: Memory,
	malloc: TypedFunc<i32, i32>,
	free: TypedFunc<i32, ()>,
}

impl ForeignHeap {
	pub(crate) fn resolve(instance: &Instance, mut store: impl AsContextMut<Data = HostState>) -> Result<Self> {
		let memory = instance.get_memory(&mut store, "memory").ok_or_else(|| HostError::Binding {
			name: "memory".to_string(),
			reason: "not exported".to_string(),
		})?;

		let malloc = instance.get_typed_func::<i32, i32>(&mut store, "malloc").map_err(|err| {
			HostError::Binding {
				name: "malloc".to_string(),
				reason: format!("{:#}", err),
			}
		})?;

		let free = instance.get_typed_func::<i32, ()>(&mut store, "free").map_err(|err| HostError::Binding {
			name: "free".to_string(),
			reason: format!("{:#}", err),
		})?;

		Ok(Self {
			memory,
			malloc,
			free,
		})
	}

	/// Runs `body` with a fresh [`Scope`] and releases every buffer the scope
	/// acquired before returning. A failure of the body wins over a failure
	/// of the release.
	pub(crate) fn scoped<S, R>(&self, store: &mut S, body: impl FnOnce(&mut S, &mut Scope) -> Result<R>) -> Result<R>
	where
		S: AsContextMut<Data = HostState>,
	{
		let mut scope = Scope {
			heap: self.clone(),
			buffers: Vec::new(),
		};

		let result = body(store, &mut scope);
		let released = scope.release_all(store);

		match (result, released) {
			(Ok(value), Ok(())) => Ok(value),
			(Ok(_), Err(err)) => Err(err),
			(Err(err), Ok(())) => Err(err),
			(Err(err), Err(release)) => {
				warn!(error = %release, "failed to release foreign buffer after error");
				Err(err)
			}
		}
	}

	fn allocate(&self, store: &mut impl AsContextMut<Data = HostState>, bytes: usize) -> Result<SharedBuffer> {
		if bytes == 0 {
			return Ok(SharedBuffer::EMPTY);
		}

		let size = foreign_len(bytes)?;
		let ptr = self.malloc.call(&mut *store, size).map_err(HostError::runtime)?;
		if ptr == 0 {
			return Err(HostError::OutOfMemory {
				bytes,
			});
		}

		store.as_context_mut().data_mut().heap.allocations += 1;
		trace!(ptr, bytes, "foreign allocation");

		Ok(SharedBuffer {
			ptr,
			len: bytes,
		})
	}

	fn release(&self, store: &mut impl AsContextMut<Data = HostState>, buffer: SharedBuffer) -> Result<()> {
		if buffer.is_empty() {
			return Ok(());
		}

		self.free.call(&mut *store, buffer.ptr).map_err(HostError::runtime)?;
		store.as_context_mut().data_mut().heap.releases += 1;
		trace!(ptr = buffer.ptr, bytes = buffer.len, "foreign release");
		Ok(())
	}

	/// Frees memory the component allocated on its own (not counted in
	/// [`HeapStats`]).
	pub(crate) fn free_foreign(&self, store: &mut impl AsContextMut<Data = HostState>, ptr: i32) -> Result<()> {
		self.free.call(&mut *store, ptr).map_err(HostError::runtime)
	}

	pub(crate) fn write(&self, store: &mut impl AsContextMut<Data = HostState>, ptr: i32, bytes: &[u8]) -> Result<()> {
		let start = offset(ptr);
		self.memory.write(&mut *store, start, bytes).map_err(|_: MemoryAccessError| HostError::OutOfBounds {
			offset: start,
			len: bytes.len(),
		})
	}

	pub(crate) fn read_bytes(&self, store: &impl AsContext<Data = HostState>, ptr: i32, len: usize) -> Result<Vec<u8>> {
		let start = offset(ptr);
		let mut bytes = vec![0u8; len];
		self.memory.read(store, start, &mut bytes).map_err(|_: MemoryAccessError| HostError::OutOfBounds {
			offset: start,
			len,
		})?;
		Ok(bytes)
	}

	pub(crate) fn read<T: Scalar>(&self, store: &impl AsContext<Data = HostState>, ptr: i32, count: usize) -> Result<Vec<T>> {
		let bytes = self.read_bytes(store, ptr, count * T::WIDTH)?;
		Ok(decode_all(&bytes))
	}

	/// Reads a NUL-terminated string, bounded by the end of linear memory.
	/// A null pointer reads as the empty string.
	pub(crate) fn read_c_string(&self, store: &impl AsContext<Data = HostState>, ptr: i32) -> Result<String> {
		if ptr == 0 {
			return Ok(String::new());
		}

		let start = offset(ptr);
		let data = self.memory.data(store.as_context());
		let tail = data.get(start..).ok_or(HostError::OutOfBounds {
			offset: start,
			len: 0,
		})?;

		let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
		Ok(String::from_utf8_lossy(&tail[..end]).into_owned())
	}
}

/// Buffers acquired for the duration of one [`ForeignHeap::scoped`] call
pub(crate) struct Scope {
	heap: ForeignHeap,
	buffers: Vec<SharedBuffer>,
}

impl Scope {
	/// Copies `values` into a new foreign buffer. An empty slice yields a
	/// null buffer without allocating.
	pub(crate) fn marshal<T: Scalar>(
		&mut self,
		store: &mut impl AsContextMut<Data = HostState>,
		values: &[T],
	) -> Result<SharedBuffer> {
		let bytes = encode_all(values);
		self.place(store, &bytes)
	}

	/// Copies `text` plus a terminating NUL into a new foreign buffer
	pub(crate) fn marshal_str(
		&mut self,
		store: &mut impl AsContextMut<Data = HostState>,
		text: &str,
	) -> Result<SharedBuffer> {
		let mut bytes = Vec::with_capacity(text.len() + 1);
		bytes.extend_from_slice(text.as_bytes());
		bytes.push(0);
		self.place(store, &bytes)
	}

	/// Zeroed room for `count` values of `T`
	pub(crate) fn allocate<T: Scalar>(
		&mut self,
		store: &mut impl AsContextMut<Data = HostState>,
		count: usize,
	) -> Result<SharedBuffer> {
		self.place(store, &vec![0u8; count * T::WIDTH])
	}

	pub(crate) fn allocate_bytes(
		&mut self,
		store: &mut impl AsContextMut<Data = HostState>,
		len: usize,
	) -> Result<SharedBuffer> {
		let buffer = self.heap.allocate(store, len)?;
		self.buffers.push(buffer);
		Ok(buffer)
	}

	pub(crate) fn read<T: Scalar>(&self, store: &impl AsContext<Data = HostState>, buffer: SharedBuffer) -> Result<Vec<T>> {
		self.heap.read(store, buffer.ptr, buffer.len / T::WIDTH)
	}

	pub(crate) fn read_bytes(&self, store: &impl AsContext<Data = HostState>, buffer: SharedBuffer, len: usize) -> Result<Vec<u8>> {
		self.heap.read_bytes(store, buffer.ptr, len.min(buffer.len))
	}

	fn place(&mut self, store: &mut impl AsContextMut<Data = HostState>, bytes: &[u8]) -> Result<SharedBuffer> {
		let buffer = self.allocate_bytes(store, bytes.len())?;
		if !buffer.is_empty() {
			self.heap.write(store, buffer.ptr, bytes)?;
		}
		Ok(buffer)
	}

	/// Releases in reverse acquisition order; keeps going after a failure and
	/// reports the first one.
	fn release_all(&mut self, store: &mut impl AsContextMut<Data = HostState>) -> Result<()> {
		let mut first = None;
		while let Some(buffer) = self.buffers.pop() {
			if let Err(err) = self.heap.release(store, buffer) {
				first.get_or_insert(err);
			}
		}
		first.map_or(Ok(()), Err)
	}
}

#[cfg(test)]
mod tests {
	use cosim_testing::component::fixture_wasm;

	use super::*;
	use crate::{component::Component, config::HostConfig};

	fn component() -> (Component, ForeignHeap) {
		let mut component =
			Component::instantiate(&fixture_wasm(), &HostConfig::new().inherit_stdio(false)).unwrap();
		let heap = ForeignHeap::resolve(&component.instance, &mut component.store).unwrap();
		(component, heap)
	}

	#[test]
	fn test_scalar_encoding() {
		assert_eq!(encode_all(&[1.5f64]), 1.5f64.to_le_bytes().to_vec());
		assert_eq!(encode_all(&[5u32, 6u32]), vec![5, 0, 0, 0, 6, 0, 0, 0]);
		assert_eq!(encode_all(&[true, false]), vec![1, 0, 0, 0, 0, 0, 0, 0]);
		assert!(encode_all::<f64>(&[]).is_empty());
	}

	#[test]
	fn test_boolean_decoding_treats_non_zero_as_true() {
		assert_eq!(decode_all::<bool>(&[0, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0]), vec![false, true, true]);
	}

	#[test]
	fn test_foreign_len_rejects_oversized() {
		assert_eq!(foreign_len(12).unwrap(), 12);
		assert!(matches!(foreign_len(usize::MAX), Err(HostError::OutOfMemory { .. })));
	}

	#[test]
	fn test_scope_copies_and_releases() {
		let (mut component, heap) = component();

		let values = heap
			.scoped(&mut component.store, |store, scope| {
				let buffer = scope.marshal(store, &[1.0f64, -2.5, 3.25])?;
				assert_eq!(buffer.len, 24);
				assert_ne!(buffer.ptr, 0);
				scope.read::<f64>(&*store, buffer)
			})
			.unwrap();

		assert_eq!(values, vec![1.0, -2.5, 3.25]);
		let stats = component.store.data().heap;
		assert_eq!(stats.allocations, 1);
		assert_eq!(stats.releases, 1);
		assert_eq!(stats.live(), 0);
	}

	#[test]
	fn test_scope_releases_on_error() {
		let (mut component, heap) = component();

		let result: Result<()> = heap.scoped(&mut component.store, |store, scope| {
			scope.marshal(store, &[5u32, 6])?;
			scope.marshal_str(store, "instance")?;
			Err(HostError::NotInstantiated)
		});

		assert!(matches!(result, Err(HostError::NotInstantiated)));
		let stats = component.store.data().heap;
		assert_eq!(stats.allocations, 2);
		assert_eq!(stats.releases, 2);
	}

	#[test]
	fn test_empty_marshal_does_not_allocate() {
		let (mut component, heap) = component();

		let buffer = heap.scoped(&mut component.store, |store, scope| scope.marshal::<f64>(store, &[])).unwrap();

		assert_eq!(buffer.ptr, 0);
		assert!(buffer.is_empty());
		assert_eq!(component.store.data().heap, HeapStats::default());
	}

	#[test]
	fn test_c_strings() {
		let (mut component, heap) = component();

		let text = heap
			.scoped(&mut component.store, |store, scope| {
				let buffer = scope.marshal_str(store, "fixture")?;
				assert_eq!(buffer.len, 8);
				heap.read_c_string(&*store, buffer.ptr)
			})
			.unwrap();

		assert_eq!(text, "fixture");
		assert_eq!(heap.read_c_string(&component.store, 0).unwrap(), "");
		// version string baked into the fixture's data segment
		assert_eq!(heap.read_c_string(&component.store, 16).unwrap(), "2.0");
	}

	#[test]
	fn test_out_of_bounds_read() {
		let (component, heap) = component();

		assert!(matches!(heap.read_bytes(&component.store, -8, 16), Err(HostError::OutOfBounds { .. })));
		assert!(matches!(heap.read_c_string(&component.store, -8), Err(HostError::OutOfBounds { .. })));
	}
}
