use crate::{
    lattice_shape, AppendBuffer, ComputeBuffer, CounterBuffer, GenerationError, GpuLayout, LatticePoint, LatticeShape,
    Triangle,
};

use log::debug;

/// The buffers shared by sampling and extraction, all sized for one lattice resolution.
pub struct WorkingBuffers {
    points_per_axis: u32,
    shape: LatticeShape,
    pub points: ComputeBuffer<LatticePoint>,
    /// Second density pass for samplers that combine two fields.
    pub aux_points: ComputeBuffer<LatticePoint>,
    pub triangles: AppendBuffer<Triangle>,
    pub triangle_count: CounterBuffer,
}

impl WorkingBuffers {
    fn allocate(points_per_axis: u32) -> Result<Self, GenerationError> {
        if points_per_axis < 2 {
            return Err(GenerationError::InvalidResolution(points_per_axis));
        }
        let num_points = (points_per_axis as usize).pow(3);
        let cells = points_per_axis as usize - 1;

        // All or nothing; a failed allocation drops the ones that succeeded.
        Ok(Self {
            points_per_axis,
            shape: lattice_shape(points_per_axis),
            points: ComputeBuffer::new_zeroed(num_points)?,
            aux_points: ComputeBuffer::new_zeroed(num_points)?,
            triangles: AppendBuffer::with_capacity(5 * cells * cells * cells)?,
            triangle_count: CounterBuffer::default(),
        })
    }

    pub fn points_per_axis(&self) -> u32 {
        self.points_per_axis
    }

    pub fn shape(&self) -> &LatticeShape {
        &self.shape
    }

    pub fn byte_len(&self) -> usize {
        self.points.byte_len() + self.aux_points.byte_len() + self.triangles.byte_len() + 4
    }

    /// One line per buffer: element count and element layout.
    pub fn layout_summary(&self) -> String {
        format!(
            "{} x {}\n{} x {}\n{} x {}\n1 x counter (4 bytes)",
            self.points.len(),
            LatticePoint::SCHEMA,
            self.aux_points.len(),
            LatticePoint::SCHEMA,
            self.triangles.capacity(),
            Triangle::SCHEMA,
        )
    }
}

/// Owns the [`WorkingBuffers`] and reallocates them only when the lattice resolution changes.
#[derive(Default)]
pub struct BufferPool {
    buffers: Option<WorkingBuffers>,
    allocations: usize,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns buffers sized exactly for `points_per_axis`, reusing the current ones when the size matches.
    pub fn prepare(&mut self, points_per_axis: u32) -> Result<&mut WorkingBuffers, GenerationError> {
        let buffers = match self.buffers.take() {
            Some(b) if b.points_per_axis == points_per_axis => b,
            old => {
                drop(old);
                let b = WorkingBuffers::allocate(points_per_axis)?;
                debug!(
                    "Allocated working buffers for {}³ points ({} bytes):\n{}",
                    points_per_axis,
                    b.byte_len(),
                    b.layout_summary()
                );
                self.allocations += 1;
                b
            }
        };
        Ok(self.buffers.insert(buffers))
    }

    /// Frees every buffer. Does nothing if none are allocated.
    pub fn release(&mut self) {
        if self.buffers.take().is_some() {
            debug!("Released working buffers");
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.buffers.is_some()
    }

    pub fn allocated_points_per_axis(&self) -> Option<u32> {
        self.buffers.as_ref().map(|b| b.points_per_axis)
    }

    /// Number of times a fresh group of buffers was allocated.
    pub fn allocation_count(&self) -> usize {
        self.allocations
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
