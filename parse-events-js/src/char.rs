use ahash::HashSet;
use ahash::HashSetExt;
use core::ops::RangeInclusive;
use once_cell::sync::Lazy;

#[derive(Clone)]
pub struct CharFilter {
  chars: HashSet<char>,
}

impl CharFilter {
  pub fn new() -> CharFilter {
    CharFilter {
      chars: HashSet::new(),
    }
  }

  pub fn add_char(&mut self, c: char) {
    self.chars.insert(c);
  }

  pub fn add_chars(&mut self, chars: RangeInclusive<char>) {
    for c in chars {
      self.chars.insert(c);
    }
  }

  pub fn has(&self, c: char) -> bool {
    self.chars.contains(&c)
  }
}

pub const ECMASCRIPT_LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

#[inline]
pub fn is_line_terminator(c: char) -> bool {
  ECMASCRIPT_LINE_TERMINATORS.contains(&c)
}

/// `ID_Start` plus `$` and `_`. Non-ASCII classification approximates Unicode `ID_Start` with `char::is_alphabetic`.
#[inline]
pub fn is_id_start(c: char) -> bool {
  if c.is_ascii() {
    c.is_ascii_alphabetic() || c == '$' || c == '_'
  } else {
    c.is_alphabetic()
  }
}

#[inline]
pub fn is_id_continue(c: char) -> bool {
  if c.is_ascii() {
    c.is_ascii_alphanumeric() || c == '$' || c == '_'
  } else {
    c.is_alphanumeric() || c == '\u{200C}' || c == '\u{200D}'
  }
}

pub static DIGIT: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='9');
  filter.add_char('_');
  filter
});

pub static DIGIT_BIN: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='1');
  filter.add_char('_');
  filter
});

pub static DIGIT_HEX: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='9');
  filter.add_chars('a'..='f');
  filter.add_chars('A'..='F');
  filter.add_char('_');
  filter
});

pub static DIGIT_OCT: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='7');
  filter.add_char('_');
  filter
});

pub static ID_CONTINUE_ASCII: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('a'..='z');
  filter.add_chars('A'..='Z');
  filter.add_chars('0'..='9');
  filter.add_char('$');
  filter.add_char('_');
  filter
});

// JSX names may contain hyphens, e.g. `aria-label`.
pub static ID_CONTINUE_JSX_ASCII: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = ID_CONTINUE_ASCII.clone();
  filter.add_char('-');
  filter
});
