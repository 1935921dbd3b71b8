//! A skeletal expression tree.
//!
//! Only what matters to scope analysis is kept: identifiers, and enough structure to tell reads
//! from writes and declarations. Nested functions and classes are reported while parsing and leave
//! a [`ExprKind::Leaf`] behind.

use crate::loc::Loc;
use crate::parse::ParseCtx;
use crate::parse::Parser;
use crate::visit::Access;
use crate::visit::DeclarationFlags;
use crate::visit::Identifier;
use crate::visit::VariableKind;

#[derive(Clone, Debug)]
pub struct Expr {
  pub loc: Loc,
  pub kind: ExprKind,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
  Id(Identifier),
  Array(Vec<Expr>),
  Object(Vec<Prop>),
  Assign {
    target: Box<Expr>,
    value: Box<Expr>,
  },
  /// `++x`, `x--`.
  Update(Box<Expr>),
  Spread(Box<Expr>),
  Paren(Box<Expr>),
  Member {
    object: Box<Expr>,
    computed: Option<Box<Expr>>,
  },
  /// `x!`, `x as T`, `x satisfies T` and `<T>x`; assignable if the inner expression is.
  Transparent(Box<Expr>),
  /// Any other expression; its parts are only ever read.
  Composite(Vec<Expr>),
  Leaf,
  /// An array hole, or an expression that failed to parse and was already reported.
  Missing,
}

#[derive(Clone, Debug)]
pub struct Prop {
  pub computed_key: Option<Expr>,
  // `None` for methods and accessors, whose bodies were already reported.
  pub value: Option<Expr>,
}

impl Expr {
  pub fn new(loc: Loc, kind: ExprKind) -> Expr {
    Expr { loc, kind }
  }

  pub fn leaf(loc: Loc) -> Expr {
    Expr::new(loc, ExprKind::Leaf)
  }

  pub fn missing(loc: Loc) -> Expr {
    Expr::new(loc, ExprKind::Missing)
  }

  pub fn id(id: Identifier) -> Expr {
    Expr::new(id.loc, ExprKind::Id(id))
  }

  /// Parts of a composite are only read, so nested composites and member chains are spliced in.
  /// Left-associative chains like `a + b + c` or `f()()` stay one level deep however long they are.
  pub fn composite(loc: Loc, parts: Vec<Expr>) -> Expr {
    let mut flat: Vec<Expr> = Vec::new();
    for part in parts {
      let part = part.into_read();
      match part.kind {
        ExprKind::Composite(inner) if flat.is_empty() => flat = inner,
        ExprKind::Composite(inner) => flat.extend(inner),
        kind => flat.push(Expr::new(part.loc, kind)),
      }
    }
    Expr::new(loc, ExprKind::Composite(flat))
  }

  /// `object.x` or `object[computed]`. The object is only read, so it is stored flattened.
  pub fn member(loc: Loc, object: Expr, computed: Option<Expr>) -> Expr {
    Expr::new(loc, ExprKind::Member {
      object: Box::new(object.into_read()),
      computed: computed.map(Box::new),
    })
  }

  /// `x!`, `x as T` and friends. Wrapping twice is the same as wrapping once, and wrapping
  /// something that is only ever read changes nothing.
  pub fn transparent(loc: Loc, inner: Expr) -> Expr {
    match inner.kind {
      kind @ (ExprKind::Transparent(_) | ExprKind::Composite(_)) => Expr::new(loc, kind),
      kind => Expr::new(loc, ExprKind::Transparent(Box::new(Expr::new(inner.loc, kind)))),
    }
  }

  /// `x++` or `--x`. An invalid target has already been reported and is only read.
  pub fn update(loc: Loc, target: Expr) -> Expr {
    if target.is_assignable(false) {
      Expr::new(loc, ExprKind::Update(Box::new(target)))
    } else {
      Expr::composite(loc, vec![target])
    }
  }

  /// The same reads, without the structure that only matters to assignment targets.
  fn into_read(self) -> Expr {
    match self.kind {
      ExprKind::Member { object, computed } => {
        let mut parts = vec![*object];
        parts.extend(computed.map(|c| *c));
        Expr::composite(self.loc, parts)
      }
      ExprKind::Transparent(inner) => {
        let inner = inner.into_read();
        Expr::new(self.loc, inner.kind)
      }
      kind => Expr::new(self.loc, kind),
    }
  }

  /// Whether this can appear left of `=`. Array and object literals only qualify as patterns,
  /// which compound assignments and updates don't accept.
  pub fn is_assignable(&self, allow_pattern: bool) -> bool {
    match &self.kind {
      ExprKind::Id(_) | ExprKind::Member { .. } | ExprKind::Missing => true,
      ExprKind::Paren(inner) | ExprKind::Transparent(inner) => inner.is_assignable(false),
      ExprKind::Array(elems) if allow_pattern => elems.iter().all(Expr::is_pattern_element),
      ExprKind::Object(props) if allow_pattern => props.iter().all(|p| match &p.value {
        Some(value) => value.is_pattern_element(),
        None => false,
      }),
      _ => false,
    }
  }

  fn is_pattern_element(&self) -> bool {
    match &self.kind {
      ExprKind::Assign { target, .. } => target.is_assignable(true),
      ExprKind::Spread(inner) => inner.is_assignable(true),
      _ => self.is_assignable(true),
    }
  }
}

impl<'a> Parser<'a> {
  /// Reports every identifier in the expression as read, except assignment targets.
  pub fn visit_expr(&mut self, ctx: ParseCtx, e: &Expr) {
    match &e.kind {
      ExprKind::Id(id) => self.use_variable(ctx, id, Access::Read),
      ExprKind::Array(elems) => {
        for elem in elems {
          self.visit_expr(ctx, elem);
        }
      }
      ExprKind::Object(props) => {
        for prop in props {
          if let Some(key) = &prop.computed_key {
            self.visit_expr(ctx, key);
          }
          if let Some(value) = &prop.value {
            self.visit_expr(ctx, value);
          }
        }
      }
      ExprKind::Assign { target, value } => {
        self.visit_expr(ctx, value);
        self.visit_target(ctx, target);
      }
      ExprKind::Update(target) => self.visit_target(ctx, target),
      ExprKind::Spread(inner) | ExprKind::Paren(inner) | ExprKind::Transparent(inner) => {
        self.visit_expr(ctx, inner)
      }
      ExprKind::Member { object, computed } => {
        self.visit_expr(ctx, object);
        if let Some(computed) = computed {
          self.visit_expr(ctx, computed);
        }
      }
      ExprKind::Composite(parts) => {
        for part in parts {
          self.visit_expr(ctx, part);
        }
      }
      ExprKind::Leaf | ExprKind::Missing => {}
    }
  }

  /// Reports the identifiers an assignment target writes to.
  pub fn visit_target(&mut self, ctx: ParseCtx, e: &Expr) {
    match &e.kind {
      ExprKind::Id(id) => self.use_variable(ctx, id, Access::Write),
      ExprKind::Array(elems) => {
        for elem in elems {
          self.visit_target(ctx, elem);
        }
      }
      ExprKind::Object(props) => {
        for prop in props {
          if let Some(key) = &prop.computed_key {
            self.visit_expr(ctx, key);
          }
          if let Some(value) = &prop.value {
            self.visit_target(ctx, value);
          }
        }
      }
      // A default value inside a destructuring target.
      ExprKind::Assign { target, value } => {
        self.visit_expr(ctx, value);
        self.visit_target(ctx, target);
      }
      ExprKind::Spread(inner) | ExprKind::Paren(inner) | ExprKind::Transparent(inner) => {
        self.visit_target(ctx, inner)
      }
      // Writing a property only reads the object.
      ExprKind::Member { .. } => self.visit_expr(ctx, e),
      ExprKind::Update(_) | ExprKind::Composite(_) => self.visit_expr(ctx, e),
      ExprKind::Leaf | ExprKind::Missing => {}
    }
  }

  /// Declares every name bound by a binding pattern. Defaults are read before the name they belong to.
  pub fn declare_pattern(
    &mut self,
    ctx: ParseCtx,
    e: &Expr,
    kind: VariableKind,
    flags: DeclarationFlags,
  ) {
    match &e.kind {
      ExprKind::Id(id) => self.declare(ctx, id, kind, flags),
      ExprKind::Array(elems) => {
        for elem in elems {
          self.declare_pattern(ctx, elem, kind, flags);
        }
      }
      ExprKind::Object(props) => {
        for prop in props {
          if let Some(key) = &prop.computed_key {
            self.visit_expr(ctx, key);
          }
          if let Some(value) = &prop.value {
            self.declare_pattern(ctx, value, kind, flags);
          }
        }
      }
      ExprKind::Assign { target, value } => {
        self.visit_expr(ctx, value);
        self.declare_pattern(ctx, target, kind, flags);
      }
      ExprKind::Spread(inner) | ExprKind::Paren(inner) | ExprKind::Transparent(inner) => {
        self.declare_pattern(ctx, inner, kind, flags)
      }
      ExprKind::Member { .. } | ExprKind::Update(_) | ExprKind::Composite(_) => {
        self.visit_expr(ctx, e)
      }
      ExprKind::Leaf | ExprKind::Missing => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn id(name: &str, at: usize) -> Expr {
    Expr::id(Identifier {
      name: name.to_string(),
      loc: Loc(at, at + name.len()),
    })
  }

  #[test]
  fn destructuring_literals_are_only_assignable_as_patterns() {
    let array = Expr::new(Loc(0, 6), ExprKind::Array(vec![id("a", 1), id("b", 4)]));
    assert!(array.is_assignable(true));
    assert!(!array.is_assignable(false));

    let sum = Expr::composite(Loc(1, 4), vec![id("a", 1), id("b", 3)]);
    let bad = Expr::new(Loc(0, 5), ExprKind::Array(vec![sum]));
    assert!(!bad.is_assignable(true));
  }

  #[test]
  fn parenthesised_targets_must_be_simple() {
    let member = Expr::new(Loc(1, 4), ExprKind::Member {
      object: Box::new(id("a", 1)),
      computed: None,
    });
    assert!(Expr::new(Loc(0, 5), ExprKind::Paren(Box::new(member))).is_assignable(false));
    let array = Expr::new(Loc(1, 4), ExprKind::Array(vec![id("a", 2)]));
    assert!(!Expr::new(Loc(0, 5), ExprKind::Paren(Box::new(array))).is_assignable(true));
  }

  fn depth(e: &Expr) -> usize {
    let children: Vec<&Expr> = match &e.kind {
      ExprKind::Member { object, computed } => {
        let mut c = vec![&**object];
        c.extend(computed.as_deref());
        c
      }
      ExprKind::Transparent(inner) | ExprKind::Update(inner) => vec![&**inner],
      ExprKind::Composite(parts) => parts.iter().collect(),
      _ => Vec::new(),
    };
    1 + children.into_iter().map(depth).max().unwrap_or(0)
  }

  #[test]
  fn left_associative_chains_stay_shallow() {
    let mut sum = id("a", 0);
    let mut member = id("a", 0);
    for i in 1..10_000 {
      sum = Expr::composite(Loc(0, i + 1), vec![sum, id("b", i)]);
      member = Expr::member(Loc(0, i + 1), member, Some(id("c", i)));
      member = Expr::transparent(Loc(0, i + 1), member);
    }
    let ExprKind::Composite(parts) = &sum.kind else {
      panic!("expected a composite, got {:?}", sum.kind);
    };
    assert_eq!(parts.len(), 10_000);
    assert_eq!(depth(&sum), 2);
    assert!(depth(&member) <= 4);
    // The last step is still a member expression, so it can be assigned to.
    assert!(member.is_assignable(false));
  }
}
