/// Timeline primitives
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(pub i32);

impl Year {
    pub fn clamp(self, min: Year, max: Year) -> Year {
        Year(self.0.clamp(min.0, max.0))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct YearSpan {
    pub start: Year,
    pub end: Year,
}

impl YearSpan {
    pub fn new(start: Year, end: Year) -> Self {
        Self { start, end }
    }

    /// Boundary-inclusive containment: both `start` and `end` are active.
    pub fn contains(&self, year: Year) -> bool {
        year >= self.start && year <= self.end
    }

    pub fn duration_years(&self) -> i32 {
        (self.end.0 - self.start.0).max(0)
    }
}
