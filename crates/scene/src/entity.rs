use foundation::handles::Handle;

/// Identity of a spawned overlay entity.
///
/// Wraps a generational handle; the index doubles as the deterministic
/// tie-break key in picking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(pub Handle);

impl EntityId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }

    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}
