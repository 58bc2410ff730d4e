//! Strongly typed stand-ins for GPU compute buffers.
//!
//! Every element type declares its memory layout with a [`BufferSchema`], and kernels bind buffers by type instead of by
//! name. The [`BufferPool`](crate::BufferPool) logs the schema of each buffer it allocates.

use crate::GenerationError;

use basalt_core::bytemuck::{Pod, Zeroable};
use basalt_core::static_assertions::const_assert_eq;
use std::cell::UnsafeCell;
use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicU32, Ordering};

/// One named field of a buffer element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldLayout {
    pub name: &'static str,
    /// Byte offset from the start of the element.
    pub offset: usize,
    /// Number of `f32` components.
    pub components: usize,
}

/// Layout of a single buffer element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BufferSchema {
    pub name: &'static str,
    pub stride: usize,
    pub fields: &'static [FieldLayout],
}

impl fmt::Display for BufferSchema {
    /// Formats as `points { position: f32x3 @ 0, density: f32x1 @ 12 } (16 bytes)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: f32x{} @ {}", field.name, field.components, field.offset)?;
        }
        write!(f, " }} ({} bytes)", self.stride)
    }
}

/// An element type that can live in a compute buffer.
pub trait GpuLayout: Pod + Send + Sync {
    const SCHEMA: BufferSchema;
}

/// A lattice sample: world-space position plus scalar density (a `float4` on the GPU).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct LatticePoint {
    pub position: [f32; 3],
    pub density: f32,
}

unsafe impl Zeroable for LatticePoint {}
unsafe impl Pod for LatticePoint {}

impl GpuLayout for LatticePoint {
    const SCHEMA: BufferSchema = BufferSchema {
        name: "points",
        stride: 16,
        fields: &[
            FieldLayout {
                name: "position",
                offset: 0,
                components: 3,
            },
            FieldLayout {
                name: "density",
                offset: 12,
                components: 1,
            },
        ],
    };
}

const_assert_eq!(mem::size_of::<LatticePoint>(), LatticePoint::SCHEMA.stride);

/// Three world-space vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Triangle {
    pub a: [f32; 3],
    pub b: [f32; 3],
    pub c: [f32; 3],
}

unsafe impl Zeroable for Triangle {}
unsafe impl Pod for Triangle {}

impl GpuLayout for Triangle {
    const SCHEMA: BufferSchema = BufferSchema {
        name: "triangles",
        stride: 36,
        fields: &[
            FieldLayout {
                name: "a",
                offset: 0,
                components: 3,
            },
            FieldLayout {
                name: "b",
                offset: 12,
                components: 3,
            },
            FieldLayout {
                name: "c",
                offset: 24,
                components: 3,
            },
        ],
    };
}

const_assert_eq!(mem::size_of::<Triangle>(), Triangle::SCHEMA.stride);

impl Triangle {
    pub fn vertices(&self) -> [[f32; 3]; 3] {
        [self.a, self.b, self.c]
    }
}

/// Per-octave noise offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct OctaveOffset {
    pub offset: [f32; 3],
}

unsafe impl Zeroable for OctaveOffset {}
unsafe impl Pod for OctaveOffset {}

impl GpuLayout for OctaveOffset {
    const SCHEMA: BufferSchema = BufferSchema {
        name: "offsets",
        stride: 12,
        fields: &[FieldLayout {
            name: "offset",
            offset: 0,
            components: 3,
        }],
    };
}

const_assert_eq!(mem::size_of::<OctaveOffset>(), OctaveOffset::SCHEMA.stride);

fn try_alloc<T>(len: usize, buffer: &'static str, fill: impl FnMut() -> T) -> Result<Vec<T>, GenerationError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| GenerationError::BufferAllocation {
            buffer,
            bytes: len.saturating_mul(mem::size_of::<T>()),
        })?;
    values.resize_with(len, fill);
    Ok(values)
}

/// A fixed-length structured buffer.
pub struct ComputeBuffer<T> {
    values: Box<[T]>,
}

impl<T: GpuLayout> ComputeBuffer<T> {
    pub fn new_zeroed(len: usize) -> Result<Self, GenerationError> {
        let values = try_alloc(len, T::SCHEMA.name, T::zeroed)?;
        Ok(Self {
            values: values.into_boxed_slice(),
        })
    }

    /// Creates a buffer holding a copy of `data`.
    pub fn from_data(data: &[T]) -> Result<Self, GenerationError> {
        let mut buffer = Self::new_zeroed(data.len())?;
        buffer.set_data(data);
        Ok(buffer)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.values.len() * T::SCHEMA.stride
    }

    /// Copies `data` into the front of the buffer.
    pub fn set_data(&mut self, data: &[T]) {
        self.values[..data.len()].copy_from_slice(data);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }
}

/// A structured buffer with a hidden append counter, written concurrently by a kernel.
///
/// Each [`append`](Self::append) reserves a unique slot with an atomic increment, so concurrent writers never alias. Appends
/// past the capacity are dropped, but they still advance the counter; [`CounterBuffer::copy_count`] reports the raw value
/// and readers must clamp it.
pub struct AppendBuffer<T> {
    slots: Box<[UnsafeCell<T>]>,
    counter: AtomicU32,
}

// SAFETY: A slot is only written by the single thread that reserved its index, and slots are only read through `&mut self`.
unsafe impl<T: Send> Sync for AppendBuffer<T> {}

impl<T: GpuLayout> AppendBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Result<Self, GenerationError> {
        let slots = try_alloc(capacity, T::SCHEMA.name, || UnsafeCell::new(T::zeroed()))?;
        Ok(Self {
            slots: slots.into_boxed_slice(),
            counter: AtomicU32::new(0),
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn byte_len(&self) -> usize {
        self.slots.len() * T::SCHEMA.stride
    }

    pub fn set_counter_value(&mut self, value: u32) {
        *self.counter.get_mut() = value;
    }

    pub fn append(&self, value: T) {
        let i = self.counter.fetch_add(1, Ordering::Relaxed) as usize;
        if let Some(slot) = self.slots.get(i) {
            // SAFETY: `i` was handed out exactly once by the counter.
            unsafe { *slot.get() = value };
        }
    }

    /// Copies out the first `count` elements, clamped to capacity.
    pub fn read_prefix(&mut self, count: usize) -> Vec<T> {
        let count = count.min(self.slots.len());
        self.slots[..count].iter_mut().map(|s| *s.get_mut()).collect()
    }
}

/// A single-element buffer that receives the hidden counter of an [`AppendBuffer`].
#[derive(Debug, Default)]
pub struct CounterBuffer {
    value: u32,
}

impl CounterBuffer {
    pub fn copy_count<T>(&mut self, src: &mut AppendBuffer<T>) {
        self.value = *src.counter.get_mut();
    }

    pub fn get(&self) -> u32 {
        self.value
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
