use diagnostics_js::DiagKind;
use diagnostics_js::Diagnostic;
use diagnostics_js::LabelRole;
use diagnostics_js::TextRange;
use parse_events_js::options::LanguageMode;
use parse_events_js::options::ParserOptions;
use parse_events_js::parse_module;
use parse_events_js::visit::EventRecorder;
use scope_js::analyze;
use scope_js::GlobalDeclaredVariableSet;

const JS: LanguageMode = LanguageMode::JavaScript;
const TS: LanguageMode = LanguageMode::TypeScript;

#[track_caller]
fn analyze_with(code: &str, language: LanguageMode, globals: &GlobalDeclaredVariableSet) -> Vec<Diagnostic> {
  let mut recorder = EventRecorder::new();
  let mut syntax: Vec<Diagnostic> = Vec::new();
  parse_module(code, ParserOptions::new(language), &mut recorder, &mut syntax);
  assert!(syntax.is_empty(), "syntax errors in {:?}: {:?}", code, syntax);
  let mut diags: Vec<Diagnostic> = Vec::new();
  analyze(&recorder.into_events(), globals, language, &mut diags);
  diags
}

#[track_caller]
fn check(code: &str, language: LanguageMode) -> Vec<DiagKind> {
  analyze_with(code, language, &GlobalDeclaredVariableSet::default_globals())
    .iter()
    .map(|d| d.kind)
    .collect()
}

#[test]
fn clean_code_has_no_diagnostics() {
  let code = r#"
    import { readFile } from "fs";
    const cache = new Map();
    export async function load(path, { encoding = "utf8" } = {}) {
      if (cache.has(path)) return cache.get(path);
      let text;
      try {
        text = await readFile(path, encoding);
      } catch (err) {
        console.error(err);
        throw err;
      }
      for (const [key, value] of Object.entries(JSON.parse(text))) {
        cache.set(key, value);
      }
      return text;
    }
    class Loader extends EventTarget {
      #pending = [];
      static create() { return new Loader(); }
    }
  "#;
  assert_eq!(check(code, JS), vec![]);
}

#[test]
fn assignment_to_const() {
  let diags = analyze_with("const x = 1; x = 2;", JS, &GlobalDeclaredVariableSet::new());
  assert_eq!(diags.len(), 1);
  assert_eq!(diags[0].kind, DiagKind::AssignmentToConstVariable);
  assert_eq!(diags[0].label(LabelRole::AssignedHere), Some(TextRange::new(13, 14)));
  assert_eq!(diags[0].label(LabelRole::DeclaredHere), Some(TextRange::new(6, 7)));
}

#[test]
fn assignment_to_const_from_a_function_declared_earlier() {
  assert_eq!(check("function f() { x = 1; } const x = 2;", JS), vec![
    DiagKind::AssignmentToConstVariable
  ]);
}

#[test]
fn assignment_to_import() {
  assert_eq!(check(r#"import { a } from "m"; a = 1; a.b = 2;"#, JS), vec![
    DiagKind::AssignmentToImportedVariable
  ]);
}

#[test]
fn undeclared_use_with_empty_globals() {
  let diags = analyze_with("y;", JS, &GlobalDeclaredVariableSet::new());
  assert_eq!(diags.len(), 1);
  assert_eq!(diags[0].kind, DiagKind::UseOfUndeclaredVariable);
  assert_eq!(diags[0].primary_range(), TextRange::new(0, 1));
}

#[test]
fn undeclared_assignment_and_type() {
  assert_eq!(check("z = 1;", JS), vec![DiagKind::AssignmentToUndeclaredVariable]);
  let diags = analyze_with("let v: Missing;", TS, &GlobalDeclaredVariableSet::default_globals());
  assert_eq!(diags.len(), 1);
  assert_eq!(diags[0].kind, DiagKind::UseOfUndeclaredType);
  assert_eq!(diags[0].primary_range(), TextRange::new(7, 14));
}

#[test]
fn read_only_globals() {
  assert_eq!(check("undefined = 1; NaN++;", JS), vec![
    DiagKind::AssignmentToConstGlobalVariable,
    DiagKind::AssignmentToConstGlobalVariable,
  ]);
  assert_eq!(check("console = null; window.x = 1;", JS), vec![]);
}

#[test]
fn use_before_declaration() {
  let diags = analyze_with("let x = x;", JS, &GlobalDeclaredVariableSet::new());
  assert_eq!(diags.len(), 1);
  assert_eq!(diags[0].kind, DiagKind::VariableUsedBeforeDeclaration);
  assert_eq!(diags[0].label(LabelRole::UsedHere), Some(TextRange::new(8, 9)));
  assert_eq!(diags[0].label(LabelRole::DeclaredHere), Some(TextRange::new(4, 5)));

  assert_eq!(check("{ x; } let x;", JS), vec![DiagKind::VariableUsedBeforeDeclaration]);
  assert_eq!(check("new C(); class C {}", JS), vec![DiagKind::VariableUsedBeforeDeclaration]);
}

#[test]
fn later_declarations_are_fine_inside_functions() {
  assert_eq!(check("function f() { return x; } let x;", JS), vec![]);
  assert_eq!(check("const g = () => h(); const h = () => 1;", JS), vec![]);
  assert_eq!(check("class A { field = b; } let b;", JS), vec![]);
}

#[test]
fn hoisted_declarations() {
  assert_eq!(check("x; var x;", JS), vec![]);
  assert_eq!(check("f(); function f() {}", JS), vec![]);
  assert_eq!(check("{ var inner; } inner;", JS), vec![]);
}

#[test]
fn block_bindings_do_not_escape() {
  assert_eq!(check("{ let a; } a;", JS), vec![DiagKind::UseOfUndeclaredVariable]);
  assert_eq!(check("for (let i = 0; i < 3; i++) {} i;", JS), vec![
    DiagKind::UseOfUndeclaredVariable
  ]);
  assert_eq!(check("try {} catch (e) {} e;", JS), vec![DiagKind::UseOfUndeclaredVariable]);
}

#[test]
fn shadowing_is_not_a_redeclaration() {
  assert_eq!(check("let a = 1; { let a = 2; a; } function f(a) { a; }", JS), vec![]);
}

#[test]
fn redeclarations() {
  let diags = analyze_with("let a; let a;", JS, &GlobalDeclaredVariableSet::new());
  assert_eq!(diags.len(), 1);
  assert_eq!(diags[0].kind, DiagKind::RedeclarationOfVariable);
  assert_eq!(diags[0].label(LabelRole::RedeclaredHere), Some(TextRange::new(11, 12)));
  assert_eq!(diags[0].label(LabelRole::FirstDeclaredHere), Some(TextRange::new(4, 5)));

  assert_eq!(check("var a; var a; function a() {}", JS), vec![]);
  assert_eq!(check("function f(a) { var a; }", JS), vec![]);
  assert_eq!(check("try {} catch (e) { var e; }", JS), vec![]);
  assert_eq!(check("function f(a) { let a; }", JS), vec![DiagKind::RedeclarationOfVariable]);
  assert_eq!(check("let a; { var a; }", JS), vec![DiagKind::RedeclarationOfVariable]);
  assert_eq!(check("class C {} const C = 1;", JS), vec![DiagKind::RedeclarationOfVariable]);
  assert_eq!(check(r#"import a from "m"; var a;"#, JS), vec![DiagKind::RedeclarationOfVariable]);
}

#[test]
fn typescript_declaration_merging() {
  assert_eq!(check("interface I {} interface I {} class I {}", TS), vec![]);
  assert_eq!(check("type T = number; const T = 1;", TS), vec![]);
  assert_eq!(check("namespace N {} function N() {}", TS), vec![]);
  assert_eq!(check("enum E { A } enum E { B }", TS), vec![]);
  assert_eq!(check("function f<T>(T: T): T { return T; }", TS), vec![]);
  assert_eq!(check("type T = number; type T = string;", TS), vec![
    DiagKind::RedeclarationOfVariable
  ]);
}

#[test]
fn type_uses_never_come_too_early() {
  assert_eq!(check("let v: T; type T = number;", TS), vec![]);
  assert_eq!(check("function f(): Shape { return null; } interface Shape {}", TS), vec![]);
}

#[test]
fn generic_and_inferred_types_resolve() {
  let code = "type A<T> = T extends Array<infer U> ? U : never; function id<T>(x: T): T { return x; }";
  assert_eq!(check(code, TS), vec![]);
  assert_eq!(check("type M<T> = { [K in keyof T]: T[K] };", TS), vec![]);
  assert_eq!(check("let n: Partial<Record<string, number>>;", TS), vec![]);
}

#[test]
fn declare_allows_any_order() {
  assert_eq!(check("declare const a: number; a;", TS), vec![]);
  assert_eq!(check("a; declare const a: number;", TS), vec![]);
  assert_eq!(check("C; declare class C {}", TS), vec![]);
  assert_eq!(check("declare class Derived extends Base {}  class Base {}", TS), vec![]);
  assert_eq!(
    check("declare namespace ns {\n  class Derived extends Base {}\n}\nclass Base {}", TS),
    vec![]
  );
}

#[test]
fn declare_context_still_needs_declarations() {
  assert_eq!(check("declare const a: Nowhere;", TS), vec![DiagKind::UseOfUndeclaredType]);
}

#[test]
fn definition_files_are_ambient() {
  let definition = LanguageMode::TypeScriptDefinition;
  assert_eq!(check("export const b: typeof a; const a: number;", definition), vec![]);
  assert_eq!(check("let a: number; let a: string;", definition), vec![
    DiagKind::RedeclarationOfVariable
  ]);
}

#[test]
fn exports_use_local_bindings() {
  assert_eq!(check("export { missing };", JS), vec![DiagKind::UseOfUndeclaredVariable]);
  assert_eq!(check(r#"export { missing } from "m";"#, JS), vec![]);
  assert_eq!(check("interface I {} export type { I };", TS), vec![]);
}

#[test]
fn analysis_is_deterministic() {
  let code = "a; b = 1; let c = c; { let d; let d; } e; f(g, h);";
  let globals = GlobalDeclaredVariableSet::new();
  let first = analyze_with(code, JS, &globals);
  let second = analyze_with(code, JS, &globals);
  assert_eq!(first, second);
  assert!(first.len() >= 7);
}
