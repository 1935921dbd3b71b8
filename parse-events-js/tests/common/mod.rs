#![allow(dead_code)]

use diagnostics_js::Diagnostic;
use diagnostics_js::DiagKind;
use parse_events_js::options::LanguageMode;
use parse_events_js::options::ParserOptions;
use parse_events_js::parse_module;
use parse_events_js::visit::DeclarationFlags;
use parse_events_js::visit::Event;
use parse_events_js::visit::EventRecorder;
use similar::ChangeTag;
use similar::TextDiff;

pub fn parse(code: &str, language: LanguageMode) -> (Vec<Event>, Vec<Diagnostic>) {
  let mut recorder = EventRecorder::new();
  let mut diags: Vec<Diagnostic> = Vec::new();
  parse_module(code, ParserOptions::new(language), &mut recorder, &mut diags);
  (recorder.into_events(), diags)
}

/// One line per event, without locations.
pub fn describe(event: &Event) -> String {
  match event {
    Event::EnterScope { kind } => format!("enter {:?}", kind),
    Event::ExitScope { kind } => format!("exit {:?}", kind),
    Event::DeclareVariable(decl) if decl.flags == DeclarationFlags::NONE => {
      format!("declare {} {:?}", decl.name, decl.kind)
    }
    Event::DeclareVariable(decl) => format!("declare {} {:?} {:?}", decl.name, decl.kind, decl.flags),
    Event::UseVariable(usage) => format!("use {} {:?}", usage.name, usage.access),
    Event::UseType(usage) => format!("type {}", usage.name),
    Event::DeclareProperty { name, .. } => match name {
      Some(name) => format!("property {}", name),
      None => "property <none>".to_string(),
    },
    Event::EndOfModule => "end".to_string(),
  }
}

fn render(lines: &[String]) -> String {
  let mut out = lines.join("\n");
  out.push('\n');
  out
}

/// Compares the event stream against `expected` (without the final `end`), printing a line diff on mismatch.
#[track_caller]
pub fn assert_events(code: &str, language: LanguageMode, expected: &[&str]) {
  let (events, _) = parse(code, language);
  let actual: Vec<String> = events.iter().map(describe).collect();
  let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
  expected.push("end".to_string());
  if actual != expected {
    let expected_fmt = render(&expected);
    let actual_fmt = render(&actual);
    let mut msg = format!("unexpected events for {:?}:\n", code);
    let diff = TextDiff::from_lines(&expected_fmt, &actual_fmt);
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      msg.push_str(sign);
      msg.push_str(change.as_str().unwrap());
    }
    panic!("{}", msg);
  }
}

pub fn kinds(diags: &[Diagnostic]) -> Vec<DiagKind> {
  diags.iter().map(|d| d.kind).collect()
}

/// Whether every scope is exited in reverse order of entry and the stream ends with `EndOfModule`.
pub fn is_balanced(events: &[Event]) -> bool {
  let mut stack = Vec::new();
  for event in events {
    match event {
      Event::EnterScope { kind } => stack.push(*kind),
      Event::ExitScope { kind } => {
        if stack.pop() != Some(*kind) {
          return false;
        }
      }
      _ => {}
    }
  }
  stack.is_empty() && events.last() == Some(&Event::EndOfModule)
}
