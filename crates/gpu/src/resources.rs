use foundation::handles::Handle;

/// GPU-resident texture handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub Handle);

/// GPU-resident vertex/index buffer handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub Handle);

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    generation: u32,
    /// Allocation size in bytes; `None` when the slot is free.
    live_bytes: Option<usize>,
}

/// Registry of GPU-resident allocations.
///
/// The engine does not talk to a graphics API directly; it records every
/// texture and buffer it would keep resident here, and teardown is correct
/// exactly when `live_count()` drops to zero. Generational handles make
/// double-release a detectable no-op instead of a corruption.
#[derive(Debug, Default)]
pub struct GpuResources {
    textures: Vec<Slot>,
    buffers: Vec<Slot>,
}

impl GpuResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_texture(&mut self, width: u32, height: u32) -> TextureHandle {
        let bytes = (width as usize) * (height as usize) * 4;
        TextureHandle(alloc(&mut self.textures, bytes))
    }

    pub fn create_buffer(&mut self, bytes: usize) -> BufferHandle {
        BufferHandle(alloc(&mut self.buffers, bytes))
    }

    /// Returns `false` for stale or already-released handles.
    pub fn release_texture(&mut self, handle: TextureHandle) -> bool {
        release(&mut self.textures, handle.0)
    }

    pub fn release_buffer(&mut self, handle: BufferHandle) -> bool {
        release(&mut self.buffers, handle.0)
    }

    pub fn is_live_texture(&self, handle: TextureHandle) -> bool {
        is_live(&self.textures, handle.0)
    }

    pub fn release_all(&mut self) {
        for slot in self.textures.iter_mut().chain(self.buffers.iter_mut()) {
            if slot.live_bytes.take().is_some() {
                slot.generation += 1;
            }
        }
    }

    /// Number of allocations still resident. Non-zero after teardown is a
    /// leak.
    pub fn live_count(&self) -> usize {
        self.textures
            .iter()
            .chain(self.buffers.iter())
            .filter(|s| s.live_bytes.is_some())
            .count()
    }

    pub fn live_bytes(&self) -> usize {
        self.textures
            .iter()
            .chain(self.buffers.iter())
            .filter_map(|s| s.live_bytes)
            .sum()
    }
}

fn alloc(slots: &mut Vec<Slot>, bytes: usize) -> Handle {
    // Reuse the first free slot, bumping its generation.
    for (index, slot) in slots.iter_mut().enumerate() {
        if slot.live_bytes.is_none() {
            slot.live_bytes = Some(bytes);
            return Handle::new(index as u32, slot.generation);
        }
    }
    slots.push(Slot {
        generation: 0,
        live_bytes: Some(bytes),
    });
    Handle::new((slots.len() - 1) as u32, 0)
}

fn release(slots: &mut [Slot], handle: Handle) -> bool {
    let Some(slot) = slots.get_mut(handle.index() as usize) else {
        return false;
    };
    if slot.generation != handle.generation() || slot.live_bytes.is_none() {
        return false;
    }
    slot.live_bytes = None;
    slot.generation += 1;
    true
}

fn is_live(slots: &[Slot], handle: Handle) -> bool {
    slots
        .get(handle.index() as usize)
        .is_some_and(|s| s.generation == handle.generation() && s.live_bytes.is_some())
}

#[cfg(test)]
mod tests {
    use super::GpuResources;

    #[test]
    fn create_and_release_tracks_live_count() {
        let mut resources = GpuResources::new();
        let tex = resources.create_texture(16, 16);
        let buf = resources.create_buffer(1024);
        assert_eq!(resources.live_count(), 2);
        assert_eq!(resources.live_bytes(), 16 * 16 * 4 + 1024);

        assert!(resources.release_texture(tex));
        assert!(resources.release_buffer(buf));
        assert_eq!(resources.live_count(), 0);
    }

    #[test]
    fn double_release_is_a_detectable_noop() {
        let mut resources = GpuResources::new();
        let tex = resources.create_texture(8, 8);
        assert!(resources.release_texture(tex));
        assert!(!resources.release_texture(tex));
    }

    #[test]
    fn recycled_slots_invalidate_stale_handles() {
        let mut resources = GpuResources::new();
        let old = resources.create_texture(8, 8);
        resources.release_texture(old);

        let new = resources.create_texture(8, 8);
        assert!(!resources.is_live_texture(old));
        assert!(resources.is_live_texture(new));
        assert_ne!(old, new);
    }

    #[test]
    fn release_all_clears_everything() {
        let mut resources = GpuResources::new();
        let _ = resources.create_texture(8, 8);
        let _ = resources.create_buffer(64);
        let _ = resources.create_buffer(128);
        resources.release_all();
        assert_eq!(resources.live_count(), 0);
        assert_eq!(resources.live_bytes(), 0);
    }
}
