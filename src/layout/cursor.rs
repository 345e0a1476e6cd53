//! The vertical text cursor.

/// Baseline position of the next line, in points from the page bottom.
///
/// A cursor only ever moves down the page. It is passed by value into each
/// drawing step, which hands back the advanced cursor.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Cursor(f32);

impl Cursor {
    /// Start a cursor at baseline `y`.
    pub fn at(y: f32) -> Self {
        Self(y)
    }

    /// Current baseline.
    pub fn y(&self) -> f32 {
        self.0
    }

    /// Move down by `distance` points. Negative distances are ignored.
    #[must_use]
    pub fn advance(self, distance: f32) -> Self {
        debug_assert!(distance >= 0.0, "cursor cannot move up ({})", distance);
        Self(self.0 - distance.max(0.0))
    }

    /// Move down by `lines` steps of `leading`.
    #[must_use]
    pub fn advance_lines(self, lines: usize, leading: f32) -> Self {
        self.advance(leading * lines as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_moves_down() {
        let c = Cursor::at(574.0).advance(6.0);
        assert_eq!(c.y(), 568.0);
    }

    #[test]
    fn test_advance_lines() {
        let c = Cursor::at(574.0).advance_lines(3, 16.0);
        assert_eq!(c.y(), 526.0);
        assert_eq!(Cursor::at(100.0).advance_lines(0, 16.0).y(), 100.0);
    }

    #[test]
    fn test_ordering_follows_page_position() {
        assert!(Cursor::at(100.0) > Cursor::at(100.0).advance(1.0));
    }
}
