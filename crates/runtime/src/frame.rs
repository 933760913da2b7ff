/// Frame metadata for one cooperative render tick.
///
/// Intentionally small and pure: the engine clock is derived state, so a
/// frame sequence can be recorded and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Wall-clock delta for this tick (milliseconds).
    pub dt_ms: f64,
    /// Engine clock at the start of the frame (milliseconds).
    pub clock_ms: f64,
}

impl Frame {
    pub fn first() -> Self {
        Self {
            index: 0,
            dt_ms: 0.0,
            clock_ms: 0.0,
        }
    }

    pub fn advance(self, dt_ms: f64) -> Self {
        Self {
            index: self.index + 1,
            dt_ms,
            clock_ms: self.clock_ms + self.dt_ms,
        }
    }

    pub fn clock_s(&self) -> f64 {
        self.clock_ms / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn advance_accumulates_the_clock() {
        let f0 = Frame::first();
        let f1 = f0.advance(16.0);
        let f2 = f1.advance(32.0);
        assert_eq!(f1.index, 1);
        assert_eq!(f1.clock_ms, 0.0);
        assert_eq!(f2.clock_ms, 16.0);
        assert_eq!(f2.dt_ms, 32.0);
    }

    #[test]
    fn clock_converts_to_seconds() {
        let f = Frame {
            index: 3,
            dt_ms: 16.0,
            clock_ms: 1500.0,
        };
        assert_eq!(f.clock_s(), 1.5);
    }
}
