mod common;

use common::assert_events;
use common::parse;
use parse_events_js::options::LanguageMode;

const JS: LanguageMode = LanguageMode::JavaScript;
const JSX: LanguageMode = LanguageMode::JavaScriptJsx;
const TS: LanguageMode = LanguageMode::TypeScript;

#[test]
fn function_declaration_declares_before_its_scope() {
  assert_events("function f(a, b = a) { return b; }", JS, &[
    "declare f Function",
    "enter Function",
    "declare a Parameter",
    "use a Read",
    "declare b Parameter",
    "use b Read",
    "exit Function",
  ]);
}

#[test]
fn initializers_are_read_before_bindings_are_declared() {
  assert_events("let x = y, [a = x] = z;", JS, &[
    "use y Read",
    "declare x Let HAS_INITIALIZER",
    "use z Read",
    "use x Read",
    "declare a Let HAS_INITIALIZER",
  ]);
}

#[test]
fn assignments_and_updates_write() {
  assert_events("x = y; x += 1; x++;", JS, &[
    "use y Read",
    "use x Write",
    "use x Write",
    "use x Write",
  ]);
}

#[test]
fn destructuring_assignment_reads_then_writes() {
  assert_events("[a, b] = [b, a];", JS, &[
    "use b Read",
    "use a Read",
    "use a Write",
    "use b Write",
  ]);
}

#[test]
fn class_members_and_both_class_bindings() {
  assert_events("class C extends B { m() { C; } f = 1; static s = x; }", JS, &[
    "enter Class",
    "use B Read",
    "declare C Class",
    "enter Function",
    "use C Read",
    "exit Function",
    "property m",
    "enter FieldInitializer",
    "exit FieldInitializer",
    "property f",
    "use x Read",
    "property s",
    "exit Class",
    "declare C Class",
  ]);
}

#[test]
fn object_literal_methods_are_reported_before_the_literal_is_visited() {
  assert_events("({ a, m() { return this; }, [k]: v });", JS, &[
    "enter Function",
    "exit Function",
    "use a Read",
    "use k Read",
    "use v Read",
  ]);
}

#[test]
fn for_loop_bindings_get_their_own_scope() {
  assert_events("for (let i = 0; i < n; i++) { let j; }", JS, &[
    "enter For",
    "declare i Let HAS_INITIALIZER",
    "use i Read",
    "use n Read",
    "use i Write",
    "enter Block",
    "declare j Let",
    "exit Block",
    "exit For",
  ]);
}

#[test]
fn catch_binding_lives_in_the_catch_scope() {
  assert_events("try { f(); } catch ({ message }) { message; }", JS, &[
    "enter Block",
    "use f Read",
    "exit Block",
    "enter Catch",
    "declare message CatchVariable",
    "use message Read",
    "exit Catch",
  ]);
}

#[test]
fn async_arrow_function() {
  assert_events("const g = async (x) => await x;", JS, &[
    "enter Function",
    "declare x Parameter",
    "use x Read",
    "exit Function",
    "declare g Const HAS_INITIALIZER",
  ]);
}

#[test]
fn jsx_component_names_and_expressions_are_read() {
  assert_events("const el = <Foo bar={baz}><div>{qux}</div></Foo>;", JSX, &[
    "use Foo Read",
    "use baz Read",
    "use qux Read",
    "declare el Const HAS_INITIALIZER",
  ]);
}

#[test]
fn imports_declare_and_exports_use() {
  assert_events(
    r#"import d, { a as b, type T } from "m"; export { b, T as U }; export default d;"#,
    TS,
    &[
      "declare d Import",
      "declare b Import",
      "declare T ImportType",
      "use b Read",
      "use T Read",
      "use d Read",
    ],
  );
}

#[test]
fn reexports_use_nothing() {
  assert_events(r#"export { a } from "m"; export * as ns from "m";"#, JS, &[]);
}

#[test]
fn interface_members() {
  assert_events(
    "interface I<T> extends Base { [k: string]: T; (): void; m(a: T): void; }",
    TS,
    &[
      "declare I Interface",
      "enter Interface",
      "declare T GenericParameter",
      "type Base",
      "enter IndexSignature",
      "declare k Parameter",
      "type T",
      "exit IndexSignature",
      "property <none>",
      "enter Function",
      "exit Function",
      "enter Function",
      "type T",
      "declare a Parameter",
      "exit Function",
      "property m",
      "exit Interface",
    ],
  );
}

#[test]
fn conditional_type_scopes_infer() {
  assert_events("type A<T> = T extends Array<infer U> ? U : never;", TS, &[
    "declare A TypeAlias",
    "enter TypeAlias",
    "declare T GenericParameter",
    "type T",
    "enter ConditionalType",
    "type Array",
    "declare U InferType",
    "type U",
    "exit ConditionalType",
    "exit TypeAlias",
  ]);
}

#[test]
fn mapped_type_key_is_declared_after_its_constraint() {
  assert_events("type M = { [K in keyof T]: T[K] };", TS, &[
    "declare M TypeAlias",
    "enter TypeAlias",
    "enter MappedType",
    "type T",
    "declare K GenericParameter",
    "type T",
    "type K",
    "exit MappedType",
    "exit TypeAlias",
  ]);
}

#[test]
fn nested_type_arguments_split_closing_chevrons() {
  let code = "let x: A<B<C>> = y; let z: A<B<C<D>>>= w; x;";
  assert_events(code, TS, &[
    "type A",
    "type B",
    "type C",
    "use y Read",
    "declare x Let HAS_INITIALIZER",
    "type A",
    "type B",
    "type C",
    "type D",
    "use w Read",
    "declare z Let HAS_INITIALIZER",
    "use x Read",
  ]);
  assert!(parse(code, TS).1.is_empty());
}

#[test]
fn generic_call_reports_type_arguments_first() {
  assert_events("f<T>(x);", TS, &["type T", "use f Read", "use x Read"]);
}

#[test]
fn typeof_in_a_type_reads_the_value() {
  assert_events("let v: typeof x;", TS, &["use x Read", "declare v Let"]);
}

#[test]
fn enum_members_see_earlier_members() {
  assert_events("enum E { A = 1, B = A }", TS, &[
    "declare E Enum",
    "enter Enum",
    "declare A EnumMember",
    "use A Read",
    "declare B EnumMember",
    "exit Enum",
  ]);
}

#[test]
fn namespace_body() {
  assert_events("namespace ns { export const x = 1; }", TS, &[
    "declare ns Namespace",
    "enter Namespace",
    "declare x Const HAS_INITIALIZER",
    "exit Namespace",
  ]);
}

#[test]
fn declare_marks_declarations() {
  assert_events("declare const a: number; declare function g(): void;", TS, &[
    "declare a Const DECLARE_CONTEXT",
    "declare g Function DECLARE_CONTEXT",
    "enter Function",
    "exit Function",
  ]);
}

#[test]
fn definition_files_are_ambient() {
  assert_events("class C {}", LanguageMode::TypeScriptDefinition, &[
    "enter Class",
    "declare C Class DECLARE_CONTEXT",
    "exit Class",
    "declare C Class DECLARE_CONTEXT",
  ]);
}

#[test]
fn let_can_be_an_identifier() {
  assert_events("let = 1; let;", JS, &["use let Write", "use let Read"]);
}
