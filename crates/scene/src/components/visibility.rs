/// Draw gate for an entity. Absent visibility counts as visible; the
/// component exists so a build pass can hide entities without despawning
/// them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Visibility {
    pub visible: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::visible()
    }
}

impl Visibility {
    pub fn visible() -> Self {
        Self { visible: true }
    }

    pub fn hidden() -> Self {
        Self { visible: false }
    }
}
