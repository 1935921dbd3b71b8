mod common;

use common::is_balanced;
use common::parse;
use parse_events_js::options::LanguageMode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use std::time::Instant;

const TIMEOUT_PER_CASE: Duration = Duration::from_millis(500);
const TIMEOUT_PER_CHAIN: Duration = Duration::from_secs(10);
const RANDOM_INPUTS: usize = 200;

#[derive(Clone)]
struct SimpleRng(u64);

impl SimpleRng {
  fn new(seed: u64) -> Self {
    SimpleRng(seed)
  }

  fn next_u64(&mut self) -> u64 {
    let mut x = self.0;
    // xorshift64*
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    self.0 = x;
    x
  }

  fn gen_range(&mut self, upper: usize) -> usize {
    if upper <= 1 {
      0
    } else {
      (self.next_u64() % upper as u64) as usize
    }
  }

  fn choose<'a>(&mut self, slice: &'a [&'a str]) -> &'a str {
    let idx = self.gen_range(slice.len());
    slice[idx]
  }

  fn coinflip(&mut self, numerator: u32, denominator: u32) -> bool {
    debug_assert!(numerator <= denominator && denominator != 0);
    (self.next_u64() % denominator as u64) < numerator as u64
  }
}

fn deep_nesting(depth: usize) -> String {
  let mut out = String::new();
  for _ in 0..depth {
    out.push_str("({[");
  }
  out.push_str("value");
  for _ in 0..depth {
    out.push_str("]})");
  }
  out
}

fn random_source(rng: &mut SimpleRng) -> String {
  // Operators, delimiters, and keywords that open scopes or declare names.
  const FRAGMENTS: &[&str] = &[
    "+", "-", "*", "/", "!", "?", ":", ";", ",", ".", "<", ">", "</", "/>", "=", "=>", "...", "(",
    ")", "[", "]", "{", "}", "@", "#x", "let", "const", "var", "function", "class", "interface",
    "type", "enum", "namespace", "declare", "import", "export", "from", "as", "yield", "await",
    "async", "static", "get", "set", "extends", "implements", "infer", "keyof", "in", "of", "for",
    "try", "catch", "finally", "new", "x", "y", "T",
  ];
  const UNICODE_SCALARS: &[&str] = &["λ", "Ж", "中", "😀", "𝛑", "‽", "ß"];
  const MALFORMED: &[&str] = &["\\u{}", "\\xZZ", "\\u{110000}", "\\u{", "\\", "/*", "`${", "0.5n"];

  let mut out = String::new();
  if rng.coinflip(1, 3) {
    let depth = 1 + rng.gen_range(8);
    out.push_str(&deep_nesting(depth));
  }

  let target_len = 16 + rng.gen_range(96);
  while out.len() < target_len {
    match rng.gen_range(5) {
      0 | 1 => {
        out.push_str(rng.choose(FRAGMENTS));
        out.push(' ');
      }
      2 => out.push_str(rng.choose(UNICODE_SCALARS)),
      3 => {
        let quote = if rng.coinflip(1, 2) { '"' } else { '\'' };
        out.push(quote);
        out.push_str(rng.choose(MALFORMED));
        if rng.coinflip(3, 4) {
          out.push(quote);
        }
      }
      _ => {
        if rng.coinflip(1, 2) {
          out.push_str(&deep_nesting(rng.gen_range(6)));
        } else {
          out.push('\n');
        }
      }
    }
  }
  out
}

const SAMPLE: &str = r#"import React, { useState } from "react";
export default class App<T extends object> extends React.Component<T> {
  #count = 0;
  static async *items(this: App<T>, [a, b = a]: number[]) { yield* [a, b]; }
  render() {
    const [v, setV] = useState(() => this.#count);
    return <div onClick={() => setV(v + 1)}>{`${v}`}</div>;
  }
}
interface Props { readonly [key: string]: unknown; }
type Keys<U> = U extends Array<infer E> ? keyof E : never;
enum Color { Red, Green = Red + 1 }
namespace N.M { export let z = /re/g.test("a\u{62}c"); }
"#;

fn truncations() -> Vec<String> {
  SAMPLE
    .char_indices()
    .map(|(i, _)| SAMPLE[..i].to_string())
    .collect()
}

fn preview(input: &str) -> String {
  let replaced = input.replace('\n', "\\n");
  let mut preview: String = replaced.chars().take(80).collect();
  if replaced.chars().count() > 80 {
    preview.push('…');
  }
  preview
}

fn run_under_budget(input: String, language: LanguageMode) {
  run_within(input, language, TIMEOUT_PER_CASE);
}

fn run_within(input: String, language: LanguageMode, budget: Duration) {
  let input_preview = preview(&input);
  let (tx, rx) = mpsc::channel();
  let handle = thread::spawn(move || {
    let start = Instant::now();
    let result = std::panic::catch_unwind(|| {
      let (events, _) = parse(&input, language);
      is_balanced(&events)
    });
    let _ = tx.send((result, start.elapsed()));
  });

  match rx.recv_timeout(budget) {
    Ok((Ok(balanced), elapsed)) => {
      assert!(
        balanced,
        "{:?} produced unbalanced scopes on {:?}",
        language, input_preview
      );
      assert!(
        elapsed <= budget,
        "{:?} finished in {:?} which exceeds budget {:?} on {:?}",
        language,
        elapsed,
        budget,
        input_preview,
      );
    }
    Ok((Err(panic), _)) => {
      let _ = handle.join();
      panic!("{:?} panicked on {:?}: {:?}", language, input_preview, panic);
    }
    Err(_) => {
      panic!(
        "{:?} timed out after {:?} on {:?}",
        language, budget, input_preview
      );
    }
  };

  let _ = handle.join();
}

#[test]
fn parser_handles_adversarial_inputs_quickly() {
  let mut rng = SimpleRng::new(0xBEEF_F00D_FACE_FEED);
  let mut cases = Vec::new();
  while cases.len() < RANDOM_INPUTS {
    cases.push(random_source(&mut rng));
  }

  for case in cases {
    for language in LanguageMode::ALL {
      run_under_budget(case.clone(), language);
    }
  }
}

#[test]
fn every_prefix_of_a_module_stays_balanced() {
  for prefix in truncations() {
    for language in [LanguageMode::TypeScriptJsx, LanguageMode::JavaScriptJsx] {
      run_under_budget(prefix.clone(), language);
    }
  }
}

#[test]
fn long_operator_chains_stay_shallow() {
  let js = LanguageMode::JavaScript;
  let ts = LanguageMode::TypeScript;
  let cases = [
    (format!("let a; a{};", " + a".repeat(50_000)), js),
    (format!("a{};", " < a".repeat(10_000)), js),
    (format!("a{};", " < a".repeat(10_000)), ts),
    (format!("a{};", ".b".repeat(50_000)), js),
    (format!("a{};", "[0]".repeat(50_000)), js),
    (format!("f{};", "()".repeat(50_000)), js),
    (format!("f{};", "().g".repeat(20_000)), js),
    (format!("a{};", ", a".repeat(50_000)), js),
    (format!("a{};", "++".repeat(20_000)), js),
    (format!("a{};", "!".repeat(50_000)), ts),
    (format!("a{};", " as T".repeat(20_000)), ts),
    (format!("f{};", "<<".repeat(20_000)), ts),
    (format!("type T = {}a;", "keyof ".repeat(10_000)), ts),
    (format!("x = a{};", "`t`".repeat(20_000)), js),
    ("let x: A<B<C>>;\n".repeat(20_000), ts),
  ];
  for (input, language) in cases {
    run_within(input, language, TIMEOUT_PER_CHAIN);
  }
}
