//! Parse tree of a LESS stylesheet.

use super::{error::Location, value::Value};

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    /// `/* ... */`
    Comment(String),
    /// `@name: value;`
    Variable(Variable),
    /// `name: value;`
    Declaration(Declaration),
    /// `selectors { ... }` or `.mixin(params) { ... }`
    Ruleset(Ruleset),
    /// `.mixin(args);`
    MixinCall(MixinCall),
    /// `@name prelude { ... }` or `@name prelude;`
    AtRule(AtRule),
    /// `@import ...;`
    Import(Import),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Variable {
    pub(crate) name: String,
    pub(crate) value: Value,
    pub(crate) location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Declaration {
    pub(crate) name: String,
    pub(crate) value: Value,
    pub(crate) important: bool,
    pub(crate) location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ruleset {
    pub(crate) selectors: Vec<String>,
    /// Parameters of a mixin definition; `None` for plain rulesets.
    pub(crate) params: Option<Vec<Param>>,
    pub(crate) body: Vec<Node>,
    pub(crate) location: Location,
}

impl Ruleset {
    /// Whether this ruleset can be called as `name`.
    pub(crate) fn is_named(&self, name: &str) -> bool {
        self.selectors.iter().any(|selector| selector == name)
    }
}

/// Parameter of a mixin definition.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Param {
    /// `@name` or `@name: default`
    Named {
        name: String,
        default: Option<Value>,
    },
    /// A literal that the argument must equal.
    Pattern(Value),
    /// `...` or `@name...`
    Rest(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MixinCall {
    /// Namespaces then mixin name, e.g. `["#ns", ".mixin"]`.
    pub(crate) path: Vec<String>,
    pub(crate) args: Vec<Arg>,
    pub(crate) important: bool,
    pub(crate) location: Location,
}

impl MixinCall {
    pub(crate) fn name(&self) -> String {
        self.path.join(" > ")
    }
}

/// Argument of a mixin call, optionally named (`@name: value`).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Arg {
    pub(crate) name: Option<String>,
    pub(crate) value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AtRule {
    /// Keyword including `@`, e.g. `@media`.
    pub(crate) name: String,
    pub(crate) prelude: String,
    pub(crate) body: Option<Vec<Node>>,
    pub(crate) location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Import {
    /// Path as written, without quotes or `url()`.
    pub(crate) path: String,
    /// Import target as written, e.g. `"foo.css"` or `url(foo.css)`.
    pub(crate) target: String,
    pub(crate) options: ImportOptions,
    pub(crate) media: String,
    pub(crate) location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ImportOptions {
    pub(crate) css: bool,
    pub(crate) less: bool,
    pub(crate) multiple: bool,
}

impl Import {
    /// Whether the import is kept as a CSS `@import` rule rather than inlined.
    pub(crate) fn is_css(&self) -> bool {
        if self.options.css {
            return true;
        }
        if self.options.less {
            return false;
        }
        let path = self.path.to_ascii_lowercase();
        path.ends_with(".css")
            || path.starts_with("http://")
            || path.starts_with("https://")
            || path.starts_with("//")
            || !self.media.is_empty()
    }

    /// Render as a CSS `@import` rule, without the final semicolon.
    pub(crate) fn to_css(&self) -> String {
        if self.media.is_empty() {
            format!("@import {}", self.target)
        } else {
            format!("@import {} {}", self.target, self.media)
        }
    }
}
