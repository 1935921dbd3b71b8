use crate::LabelRole;
use crate::Severity;
use serde::Serialize;

// Each row: variant, stable code, severity, label roles (in order, first is primary), summary.
macro_rules! diag_kinds {
  ($($(#[$attr:meta])* $name:ident = $code:literal, $severity:ident, [$($role:ident),+], $summary:literal;)*) => {
    /// Every rule violation the lexer, parser and analyzer can report.
    ///
    /// The set is closed: consumers may match exhaustively. Each kind has a
    /// fixed arity of labelled spans, see [`DiagKind::label_roles`].
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
    pub enum DiagKind {
      $($(#[$attr])* $name,)*
    }

    impl DiagKind {
      pub const ALL: &'static [DiagKind] = &[$(DiagKind::$name,)*];

      /// Stable identifier, suitable for configuration and suppression lists.
      pub const fn code(self) -> &'static str {
        match self {
          $(DiagKind::$name => $code,)*
        }
      }

      pub const fn severity(self) -> Severity {
        match self {
          $(DiagKind::$name => Severity::$severity,)*
        }
      }

      /// Roles of the labels carried by a diagnostic of this kind, primary label first.
      pub const fn label_roles(self) -> &'static [LabelRole] {
        match self {
          $(DiagKind::$name => &[$(LabelRole::$role),+],)*
        }
      }

      /// Untranslated one-line summary. Rendering and localization belong to the caller.
      pub const fn summary(self) -> &'static str {
        match self {
          $(DiagKind::$name => $summary,)*
        }
      }
    }
  };
}

#[rustfmt::skip]
diag_kinds! {
  // Lexical.
  InvalidCharacter = "E0001", Error, [Here], "invalid character";
  UnclosedBlockComment = "E0002", Error, [OpenedHere], "unclosed block comment";
  UnclosedStringLiteral = "E0003", Error, [Here], "unclosed string literal";
  UnclosedTemplate = "E0004", Error, [OpenedHere], "unclosed template literal";
  UnclosedRegexp = "E0005", Error, [Here], "unclosed regular expression literal";
  InvalidUnicodeEscapeSequence = "E0006", Error, [Here], "invalid Unicode escape sequence in identifier";
  KeywordsCannotContainEscapeSequences = "E0007", Error, [Here], "keywords cannot contain escape sequences";
  BigIntLiteralContainsDecimalPoint = "E0008", Error, [Here], "BigInt literal contains decimal point";

  // Syntax.
  UnexpectedToken = "E0010", Error, [Here], "unexpected token";
  ExpectedToken = "E0011", Error, [Here], "expected punctuation here";
  MissingExpression = "E0012", Error, [Here], "missing expression";
  MissingSemicolonAfterStatement = "E0013", Error, [Here], "missing semicolon after statement";
  UnclosedBlock = "E0014", Error, [OpenedHere], "unclosed code block; expected '}' by end of file";
  UnmatchedParenthesis = "E0015", Error, [OpenedHere], "unmatched parenthesis";
  UnmatchedBracket = "E0016", Error, [OpenedHere], "unmatched indexing bracket";
  UnclosedObjectLiteral = "E0017", Error, [OpenedHere], "unclosed object literal";
  ExpectedOpenParenthesis = "E0018", Error, [Here], "expected '('";
  MissingColonInConditional = "E0019", Error, [Here], "missing ':' in conditional expression";
  InvalidAssignmentTarget = "E0020", Error, [Here], "invalid expression left of assignment";
  MissingCatchOrFinally = "E0021", Error, [Here], "missing catch or finally clause for try statement";
  MissingNameInFunctionStatement = "E0022", Error, [Here], "missing name in function statement";
  MissingFunctionParameterList = "E0023", Error, [Here], "missing function parameter list";
  MissingBodyForFunction = "E0024", Error, [Here], "missing body for function";
  MissingVariableName = "E0025", Error, [Here], "missing variable name";
  ClassStatementNotAllowedInBody = "E0026", Error, [Here, Keyword], "class statement is not allowed as the body of a statement";
  CannotDeclareAwaitInAsyncFunction = "E0027", Error, [Here], "cannot declare 'await' inside async function";
  CannotDeclareYieldInGenerator = "E0028", Error, [Here], "cannot declare 'yield' inside generator function";
  DepthLimitExceeded = "E0029", Error, [Here], "nesting depth limit exceeded";

  // Classes.
  MissingNameInClassStatement = "E0040", Error, [Here], "missing name of class";
  MissingBodyForClass = "E0041", Error, [Here], "missing body for class";
  UnclosedClassBlock = "E0042", Error, [OpenedHere], "unclosed class; expected '}' by end of file";
  AsyncStaticMethod = "E0043", Error, [Here], "'async static' is not allowed; write 'static async' instead";
  TypeScriptStyleConstField = "E0044", Error, [Here], "const fields within classes are only allowed in TypeScript, not JavaScript";
  MethodsShouldNotUseFunctionKeyword = "E0045", Error, [Here], "methods should not use the 'function' keyword";
  FunctionsOrMethodsShouldNotHaveArrowOperator = "E0046", Error, [Here], "functions/methods should not have '=>'";
  MissingClassMethodName = "E0047", Error, [Here], "missing name for class method";
  UnexpectedCommaAfterClassField = "E0048", Error, [Here], "commas are not allowed between class fields";
  ClassAccessorOnMethod = "E0049", Error, [Here, Modifier], "'accessor' is not allowed on methods";
  ClassAccessorOnGetterOrSetter = "E0050", Error, [Here, Modifier, Keyword], "'accessor' is not allowed on getters or setters";
  /// The first label is the modifier that should have come first.
  ClassModifierMustPrecedeOtherModifier = "E0051", Error, [Here, Modifier], "this modifier must come before the other one";

  // Interfaces.
  NewlineNotAllowedAfterInterfaceKeyword = "E0060", Error, [Here], "newline is not allowed after 'interface'";
  MissingBodyForInterface = "E0061", Error, [Here], "missing body for TypeScript interface";
  UnclosedInterfaceBlock = "E0062", Error, [OpenedHere], "unclosed interface; expected '}' by end of file";
  InterfacePropertiesCannotBePrivate = "E0063", Error, [Here], "interface properties cannot be private";
  InterfacePropertiesCannotBeStatic = "E0064", Error, [Here], "interface properties cannot be 'static'";
  InterfacePropertiesCannotBeExplicitlyPublic = "E0065", Error, [Here], "interface properties are always public and cannot be marked public";
  InterfacePropertiesCannotBeProtected = "E0066", Error, [Here], "interface properties cannot be protected";
  InterfaceMethodsCannotBeAsync = "E0067", Error, [Here], "interface methods cannot be marked 'async'";
  InterfaceMethodsCannotBeGenerators = "E0068", Error, [Here], "interface methods cannot be marked as a generator";
  InterfaceMethodsCannotContainBodies = "E0069", Error, [Here], "interface methods cannot contain a body";
  InterfaceFieldsCannotHaveInitializers = "E0070", Error, [Here], "TypeScript interface fields cannot be initialized";
  AssignmentAssertedFieldsNotAllowedInInterfaces = "E0071", Error, [Here], "assignment-asserted fields are not allowed in interfaces";
  AbstractPropertyNotAllowedInInterface = "E0072", Error, [Here], "'abstract' is not allowed in interfaces";
  InterfacesCannotContainStaticBlocks = "E0073", Error, [Here], "interfaces cannot contain static blocks";
  IndexSignatureNeedsType = "E0074", Error, [Here], "index signatures require a value type";
  IndexSignatureCannotBeMethod = "E0075", Error, [Here], "index signature must be a field, not a method";
  MissingSemicolonAfterField = "E0076", Error, [Here], "missing semicolon after field";
  MissingSemicolonAfterInterfaceMethod = "E0077", Error, [Here], "missing semicolon after interface method";
  MissingSemicolonAfterIndexSignature = "E0078", Error, [Here], "missing semicolon after index signature";

  // TypeScript or JSX syntax in the wrong language mode.
  InterfacesNotAllowedInJavaScript = "E0090", Error, [Here], "TypeScript's 'interface' feature is not allowed in JavaScript code";
  TypeAnnotationsNotAllowedInJavaScript = "E0091", Error, [Here], "TypeScript type annotations cannot be used in JavaScript";
  TypeAliasesNotAllowedInJavaScript = "E0092", Error, [Here], "TypeScript types are not allowed in JavaScript";
  EnumsNotAllowedInJavaScript = "E0093", Error, [Here], "TypeScript's 'enum' feature is not allowed in JavaScript";
  NamespacesNotAllowedInJavaScript = "E0094", Error, [Here], "TypeScript namespaces are not allowed in JavaScript";
  DeclareNotAllowedInJavaScript = "E0095", Error, [Here], "'declare' is only allowed in TypeScript";
  GenericsNotAllowedInJavaScript = "E0096", Error, [Here], "generic parameters and arguments are not allowed in JavaScript";
  AccessModifiersNotAllowedInJavaScript = "E0097", Error, [Here], "access modifiers are only allowed in TypeScript";
  TypeAssertionsNotAllowedInJavaScript = "E0098", Error, [Here], "TypeScript type assertions are not allowed in JavaScript";
  JsxNotAllowedInJavaScript = "E0099", Error, [Here], "JSX syntax is not allowed in this JavaScript mode";
  JsxNotAllowedInTypeScript = "E0100", Error, [Here], "React/JSX is not allowed in vanilla TypeScript code";

  // Scope analysis.
  RedeclarationOfVariable = "E0120", Error, [RedeclaredHere, FirstDeclaredHere], "redeclaration of variable";
  VariableUsedBeforeDeclaration = "E0121", Error, [UsedHere, DeclaredHere], "variable used before declaration";
  UseOfUndeclaredVariable = "E0122", Warning, [Here], "use of undeclared variable";
  AssignmentToUndeclaredVariable = "E0123", Warning, [Here], "assignment to undeclared variable";
  UseOfUndeclaredType = "E0124", Warning, [Here], "use of undeclared type";
  AssignmentToConstVariable = "E0125", Error, [AssignedHere, DeclaredHere], "assignment to const variable";
  AssignmentToImportedVariable = "E0126", Error, [AssignedHere, DeclaredHere], "assignment to imported variable";
  AssignmentToConstGlobalVariable = "E0127", Error, [AssignedHere], "assignment to const global variable";
}
