use diagnostics_js::TextRange;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A half-open range within the source, expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  /// An empty location at `offset`.
  pub fn point(offset: usize) -> Loc {
    Loc(offset, offset)
  }

  /// An empty location immediately after this one, where a missing token would go.
  pub fn point_after(&self) -> Loc {
    Loc(self.1, self.1)
  }

  pub fn point_before(&self) -> Loc {
    Loc(self.0, self.0)
  }

  /// Converts into a diagnostics range, clamping to `u32` on overflow.
  pub fn as_range(&self) -> TextRange {
    TextRange::from_usize(self.0, self.1)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

impl From<Loc> for TextRange {
  fn from(value: Loc) -> Self {
    value.as_range()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn converts_loc_into_range() {
    assert_eq!(Loc(4, 10).as_range(), TextRange::new(4, 10));
  }

  #[test]
  fn loc_to_range_clamps_on_overflow() {
    let range = Loc(usize::MAX - 1, usize::MAX).as_range();
    assert_eq!(range.start, u32::MAX);
    assert_eq!(range.end, u32::MAX);
  }

  #[test]
  fn extends_to_cover_both() {
    assert_eq!(Loc(1, 2) + Loc(5, 6), Loc(1, 6));
    assert_eq!(Loc(5, 6).add_option(None), Loc(5, 6));
    assert_eq!(Loc(3, 7).point_after(), Loc(7, 7));
    assert!(Loc(3, 7).point_before().is_empty());
  }
}
