use diagnostics_js::DiagKind;
use diagnostics_js::Diagnostic;
use diagnostics_js::TextRange;
use lint_js::lint;
use lint_js::lint_with_events;
use lint_js::LintOptions;
use parse_events_js::options::LanguageMode;
use parse_events_js::visit::Event;
use parse_events_js::visit::ScopeKind;
use scope_js::GlobalDeclaredVariableSet;
use std::sync::Arc;
use std::thread;

fn run(code: &str, language: LanguageMode) -> Vec<Diagnostic> {
  let options = LintOptions::new(language);
  lint(code, &options, &GlobalDeclaredVariableSet::default_globals())
}

fn kinds(diags: &[Diagnostic]) -> Vec<DiagKind> {
  diags.iter().map(|d| d.kind).collect()
}

fn scope_depths_balance(events: &[Event]) -> bool {
  let mut depth = 0i64;
  for event in events {
    match event {
      Event::EnterScope { .. } => depth += 1,
      Event::ExitScope { .. } => depth -= 1,
      _ => {}
    }
    if depth < 0 {
      return false;
    }
  }
  depth == 0 && events.last() == Some(&Event::EndOfModule)
}

#[test]
fn valid_javascript_has_no_diagnostics() {
  let code = r#"
    "use strict";
    const items = [1, 2, 3];
    let total = 0;
    for (const item of items) total += item;
    function double(x) { return x * 2; }
    const doubled = items.map(double).filter((n) => n > total / 10);
    label: while (doubled.length) { doubled.pop(); break label; }
    export { doubled as result, total };
  "#;
  assert_eq!(kinds(&run(code, LanguageMode::JavaScript)), vec![]);
}

#[test]
fn scopes_balance_on_any_input() {
  let inputs = [
    "function f( { class { m(",
    "interface I {",
    "type T = { [K in",
    "<div>{x</span>",
    "let x = (((",
    "}}}) ] )",
    "`${`${",
    "for (let i of",
    "a => b => c =>",
  ];
  let globals = GlobalDeclaredVariableSet::default_globals();
  for code in inputs {
    for language in LanguageMode::ALL {
      let (_, events) = lint_with_events(code, &LintOptions::new(language), &globals);
      assert!(scope_depths_balance(&events), "{:?} in {}", code, language);
    }
  }
}

#[test]
fn const_reassignment_is_reported_once_at_the_assignment() {
  let diags = run("const x = 1; x = 2;", LanguageMode::JavaScript);
  assert_eq!(kinds(&diags), vec![DiagKind::AssignmentToConstVariable]);
  assert_eq!(diags[0].primary_range(), TextRange::new(13, 14));
}

#[test]
fn undeclared_use_with_no_globals() {
  let options = LintOptions::from_json_str(r#"{ "include-default-globals": false }"#).unwrap();
  let globals = options.build_globals().unwrap();
  let diags = lint("y;", &options, &globals);
  assert_eq!(kinds(&diags), vec![DiagKind::UseOfUndeclaredVariable]);
  assert_eq!(diags[0].primary_range(), TextRange::new(0, 1));
}

#[test]
fn asserted_interface_field() {
  let options = LintOptions::new(LanguageMode::TypeScript);
  let (diags, events) = lint_with_events(
    "interface I { field!: any; }",
    &options,
    &GlobalDeclaredVariableSet::default_globals(),
  );
  assert_eq!(kinds(&diags), vec![
    DiagKind::AssignmentAssertedFieldsNotAllowedInInterfaces
  ]);
  assert!(events.iter().any(|e| matches!(
    e,
    Event::DeclareProperty { name: Some(name), .. } if name == "field"
  )));
}

#[test]
fn interface_method_with_every_invalid_modifier() {
  let options = LintOptions::new(LanguageMode::TypeScript);
  let (diags, events) = lint_with_events(
    "interface I { static async *method(); }",
    &options,
    &GlobalDeclaredVariableSet::default_globals(),
  );
  assert_eq!(kinds(&diags), vec![
    DiagKind::InterfacePropertiesCannotBeStatic,
    DiagKind::InterfaceMethodsCannotBeAsync,
    DiagKind::InterfaceMethodsCannotBeGenerators,
  ]);
  assert_eq!(diags[0].primary_range(), TextRange::new(14, 20));
  assert_eq!(diags[1].primary_range(), TextRange::new(21, 26));
  assert_eq!(diags[2].primary_range(), TextRange::new(27, 28));

  let property = events
    .iter()
    .position(|e| matches!(e, Event::DeclareProperty { name: Some(name), .. } if name == "method"))
    .unwrap();
  assert_eq!(events[property - 1], Event::ExitScope {
    kind: ScopeKind::Function
  });
  assert_eq!(events[property - 2], Event::EnterScope {
    kind: ScopeKind::Function
  });
}

#[test]
fn declare_relaxes_declaration_order() {
  for code in [
    "declare const a: number; a;",
    "a; declare const a: number;",
    "C; declare class C {}",
    "declare class Derived extends Base {}  class Base {}",
    "declare namespace ns {\n  class Derived extends Base {}\n}\nclass Base {}",
  ] {
    assert_eq!(kinds(&run(code, LanguageMode::TypeScript)), vec![], "{}", code);
  }
}

#[test]
fn output_is_sorted_and_repeatable() {
  // The undeclared `b` is found at the end of the module, after the redeclaration.
  let code = "b; let a; let a;\nfunction (";
  let first = run(code, LanguageMode::JavaScript);
  let second = run(code, LanguageMode::JavaScript);
  assert_eq!(first, second);
  let starts: Vec<u32> = first.iter().map(|d| d.primary_range().start).collect();
  let mut sorted = starts.clone();
  sorted.sort();
  assert_eq!(starts, sorted);
  assert_eq!(first[0].kind, DiagKind::UseOfUndeclaredVariable);
  assert!(first.iter().any(|d| d.kind == DiagKind::RedeclarationOfVariable));
}

#[test]
fn documents_share_globals_across_threads() {
  let options = Arc::new(LintOptions::new(LanguageMode::JavaScript));
  let globals = Arc::new(options.build_globals().unwrap());
  let handles: Vec<_> = (0..4)
    .map(|i| {
      let options = Arc::clone(&options);
      let globals = Arc::clone(&globals);
      thread::spawn(move || {
        let code = format!("console.log(v{i}); const c{i} = 1; c{i} = 2;");
        lint(&code, &options, &globals)
      })
    })
    .collect();
  for handle in handles {
    let diags = handle.join().unwrap();
    assert_eq!(kinds(&diags), vec![
      DiagKind::UseOfUndeclaredVariable,
      DiagKind::AssignmentToConstVariable,
    ]);
  }
}

#[test]
fn long_chains_lint_without_overflow() {
  let chain = format!("let a; a{};", " + a".repeat(50_000));
  assert_eq!(kinds(&run(&chain, LanguageMode::JavaScript)), vec![]);
  let members = format!("let a; a{};", ".b".repeat(50_000));
  assert_eq!(kinds(&run(&members, LanguageMode::JavaScript)), vec![]);
}

#[test]
fn recording_events_does_not_change_diagnostics() {
  let globals = GlobalDeclaredVariableSet::default_globals();
  for (code, language) in [
    ("b; let a; let a;\nfunction (", LanguageMode::JavaScript),
    ("const x = 1; x = 2; y;", LanguageMode::JavaScript),
    ("let v: Missing = w; interface I { [k: string](); }", LanguageMode::TypeScript),
    ("f(); let f = () => g; class C extends D {}", LanguageMode::JavaScriptJsx),
  ] {
    let options = LintOptions::new(language);
    let (with_events, events) = lint_with_events(code, &options, &globals);
    assert_eq!(lint(code, &options, &globals), with_events, "{}", code);
    assert!(scope_depths_balance(&events), "{}", code);
  }
}
