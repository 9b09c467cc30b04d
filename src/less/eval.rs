//! Evaluate a parse tree into CSS rules.
//!
//! Evaluation resolves variables, operations, functions and mixins, joins
//! nested selectors, and bubbles `@media` blocks out of rulesets.

use std::collections::HashMap;

use super::{
    ast::{AtRule, MixinCall, Node, Param, Ruleset, Variable},
    error::{Error, ErrorKind, Location, Result},
    functions,
    value::{is_name_char, Number, Op, Value},
};

/// Maximum depth of nested mixin calls.
const MAX_MIXIN_DEPTH: usize = 64;

/// At-rules whose body does not inherit the enclosing selectors.
const ISOLATED_AT_RULES: [&str; 4] = ["@font-face", "@page", "@viewport", "@counter-style"];

/// An evaluated CSS statement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CssNode {
    Comment(String),
    Rule {
        selectors: Vec<String>,
        items: Vec<Item>,
    },
    Media {
        query: String,
        children: Vec<CssNode>,
    },
    AtRule {
        name: String,
        prelude: String,
        items: Vec<Item>,
        children: Vec<CssNode>,
    },
    /// At-rule without body, such as `@import` or `@charset`.
    Statement(String),
}

/// Content of a rule.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Item {
    Declaration {
        name: String,
        value: Value,
        important: bool,
    },
    Comment(String),
}

/// Evaluate the statements of a stylesheet.
pub(crate) fn evaluate(nodes: &[Node]) -> Result<Vec<CssNode>> {
    let mut evaluator = Evaluator {
        evaluating: Vec::new(),
    };
    let frame = Frame::new(nodes, None);
    let block = evaluator.eval_block(nodes, &frame, &Context::default())?;
    Ok(hoist(bubble(block.nodes)))
}

/// A variable, either unevaluated or bound to a mixin argument.
enum Binding<'a> {
    Lazy(&'a Variable),
    Ready(Value),
}

/// A lexical scope.
struct Frame<'a, 'p> {
    variables: HashMap<&'a str, Binding<'a>>,
    mixins: Vec<&'a Ruleset>,
    parent: Option<&'p Frame<'a, 'p>>,
    /// Scope of the mixin call, searched after the lexical scopes.
    caller: Option<&'p Frame<'a, 'p>>,
}

impl<'a, 'p> Frame<'a, 'p> {
    fn new(body: &'a [Node], parent: Option<&'p Frame<'a, 'p>>) -> Self {
        let mut variables = HashMap::new();
        let mut mixins = Vec::new();

        // Last definition wins
        for node in body {
            match node {
                Node::Variable(variable) => {
                    variables.insert(variable.name.as_str(), Binding::Lazy(variable));
                },
                Node::Ruleset(ruleset) => mixins.push(ruleset),
                _ => {},
            }
        }

        Self {
            variables,
            mixins,
            parent,
            caller: None,
        }
    }

    fn with_bindings(
        bindings: HashMap<&'a str, Value>,
        parent: Option<&'p Frame<'a, 'p>>,
        caller: Option<&'p Frame<'a, 'p>>,
    ) -> Self {
        Self {
            variables: bindings
                .into_iter()
                .map(|(name, value)| (name, Binding::Ready(value)))
                .collect(),
            mixins: Vec::new(),
            parent,
            caller,
        }
    }

    fn find_variable<'s>(&'s self, name: &str) -> Option<(&'s Binding<'a>, &'s Frame<'a, 's>)> {
        let mut frame: Option<&'s Frame<'a, 's>> = Some(self);
        while let Some(current) = frame {
            if let Some(binding) = current.variables.get(name) {
                return Some((binding, current));
            }
            frame = current.parent;
        }

        let mut frame: Option<&'s Frame<'a, 's>> = Some(self);
        while let Some(current) = frame {
            if let Some(found) = current.caller.and_then(|caller| caller.find_variable(name)) {
                return Some(found);
            }
            frame = current.parent;
        }

        None
    }

    /// Find rulesets callable as `name` in the nearest scope defining any.
    fn find_mixins<'s>(&'s self, name: &str) -> Vec<(&'a Ruleset, &'s Frame<'a, 's>)> {
        let mut frame: Option<&'s Frame<'a, 's>> = Some(self);
        while let Some(current) = frame {
            let found: Vec<_> = current
                .mixins
                .iter()
                .filter(|ruleset| ruleset.is_named(name))
                .map(|ruleset| (*ruleset, current))
                .collect();
            if !found.is_empty() {
                return found;
            }
            frame = current.parent;
        }

        let mut frame: Option<&'s Frame<'a, 's>> = Some(self);
        while let Some(current) = frame {
            if let Some(caller) = current.caller {
                let found = caller.find_mixins(name);
                if !found.is_empty() {
                    return found;
                }
            }
            frame = current.parent;
        }

        Vec::new()
    }
}

/// A mixin found for a call.
struct Candidate<'a, 's> {
    /// Namespaces enclosing the mixin, outermost first.
    namespaces: Vec<&'a Ruleset>,
    mixin: &'a Ruleset,
    /// Scope where the outermost ruleset is defined.
    frame: &'s Frame<'a, 's>,
}

fn find_candidates<'a, 's>(frame: &'s Frame<'a, '_>, path: &[String]) -> Vec<Candidate<'a, 's>> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let mut candidates = Vec::new();

    for (ruleset, frame) in frame.find_mixins(first) {
        if rest.is_empty() {
            candidates.push(Candidate {
                namespaces: Vec::new(),
                mixin: ruleset,
                frame,
            });
            continue;
        }
        let mut found = Vec::new();
        find_nested(ruleset, rest, vec![ruleset], &mut found);
        candidates.extend(found.into_iter().map(|(namespaces, mixin)| Candidate {
            namespaces,
            mixin,
            frame,
        }));
    }

    candidates
}

#[allow(clippy::type_complexity)]
fn find_nested<'a>(
    namespace: &'a Ruleset,
    path: &[String],
    chain: Vec<&'a Ruleset>,
    found: &mut Vec<(Vec<&'a Ruleset>, &'a Ruleset)>,
) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };
    for node in &namespace.body {
        let Node::Ruleset(child) = node else {
            continue;
        };
        if !child.is_named(first) {
            continue;
        }
        if rest.is_empty() {
            found.push((chain.clone(), child));
        } else {
            let mut chain = chain.clone();
            chain.push(child);
            find_nested(child, rest, chain, found);
        }
    }
}

/// Selector and media context of a block.
#[derive(Debug, Clone, Default)]
struct Context {
    selectors: Vec<String>,
    media: Option<String>,
    declarations_allowed: bool,
    mixin_depth: usize,
}

/// Output of a block: declarations of the enclosing rule, and nested rules.
#[derive(Debug, Default)]
struct Block {
    items: Vec<Item>,
    nodes: Vec<CssNode>,
}

struct Evaluator {
    /// Names of variables being evaluated, to detect recursive definitions.
    evaluating: Vec<String>,
}

impl Evaluator {
    fn eval_block<'a>(
        &mut self,
        body: &'a [Node],
        frame: &Frame<'a, '_>,
        context: &Context,
    ) -> Result<Block> {
        let mut block = Block::default();

        for node in body {
            match node {
                Node::Comment(text) => {
                    if context.declarations_allowed {
                        block.items.push(Item::Comment(text.clone()));
                    } else {
                        block.nodes.push(CssNode::Comment(text.clone()));
                    }
                },
                Node::Variable(_) => {},
                Node::Declaration(declaration) => {
                    if !context.declarations_allowed {
                        return Err(Error::new(
                            ErrorKind::Syntax,
                            "properties must be inside selector blocks",
                        )
                        .at(&declaration.location));
                    }
                    let name =
                        self.interpolate(&declaration.name, frame, false, &declaration.location)?;
                    let value = self.eval_value(&declaration.value, frame, &declaration.location)?;
                    block.items.push(Item::Declaration {
                        name,
                        value,
                        important: declaration.important,
                    });
                },
                Node::Ruleset(ruleset) if ruleset.params.is_some() => {},
                Node::Ruleset(ruleset) => self.eval_ruleset(ruleset, frame, context, &mut block)?,
                Node::MixinCall(call) => self.eval_mixin_call(call, frame, context, &mut block)?,
                Node::AtRule(at_rule) => self.eval_at_rule(at_rule, frame, context, &mut block)?,
                Node::Import(import) => block.nodes.push(CssNode::Statement(import.to_css())),
            }
        }

        Ok(block)
    }

    fn eval_ruleset<'a>(
        &mut self,
        ruleset: &'a Ruleset,
        frame: &Frame<'a, '_>,
        context: &Context,
        block: &mut Block,
    ) -> Result<()> {
        let mut selectors = Vec::with_capacity(ruleset.selectors.len());
        for selector in &ruleset.selectors {
            selectors.push(self.interpolate(selector, frame, false, &ruleset.location)?);
        }
        let selectors = join_selectors(&context.selectors, &selectors);

        let frame = Frame::new(&ruleset.body, Some(frame));
        let context = Context {
            selectors: selectors.clone(),
            declarations_allowed: true,
            ..context.clone()
        };
        let inner = self.eval_block(&ruleset.body, &frame, &context)?;

        push_rule(&mut block.nodes, selectors, inner.items);
        block.nodes.extend(inner.nodes);

        Ok(())
    }

    fn eval_at_rule<'a>(
        &mut self,
        at_rule: &'a AtRule,
        frame: &Frame<'a, '_>,
        context: &Context,
        block: &mut Block,
    ) -> Result<()> {
        let prelude = self.interpolate(&at_rule.prelude, frame, true, &at_rule.location)?;

        let Some(body) = at_rule.body.as_ref() else {
            block.nodes.push(CssNode::Statement(if prelude.is_empty() {
                at_rule.name.clone()
            } else {
                format!("{} {prelude}", at_rule.name)
            }));
            return Ok(());
        };

        let keyword = at_rule.name.to_ascii_lowercase();
        let frame = Frame::new(body, Some(frame));

        if keyword == "@media" {
            let query = match context.media.as_ref() {
                Some(outer) => combine_media(outer, &prelude),
                None => prelude,
            };
            let inner_context = Context {
                media: Some(query.clone()),
                declarations_allowed: !context.selectors.is_empty(),
                ..context.clone()
            };
            let inner = self.eval_block(body, &frame, &inner_context)?;

            let mut children = Vec::new();
            push_rule(&mut children, context.selectors.clone(), inner.items);
            children.extend(inner.nodes);

            block.nodes.push(CssNode::Media { query, children });
            return Ok(());
        }

        let keyframes = keyword.ends_with("keyframes");
        let isolated = keyframes || ISOLATED_AT_RULES.contains(&keyword.as_str());

        let inner_context = if isolated {
            Context {
                declarations_allowed: !keyframes,
                mixin_depth: context.mixin_depth,
                ..Context::default()
            }
        } else {
            Context {
                declarations_allowed: !context.selectors.is_empty(),
                ..context.clone()
            }
        };
        let inner = self.eval_block(body, &frame, &inner_context)?;

        let (items, children) = if !isolated && !context.selectors.is_empty() {
            let mut children = Vec::new();
            push_rule(&mut children, context.selectors.clone(), inner.items);
            children.extend(inner.nodes);
            (Vec::new(), children)
        } else {
            (inner.items, inner.nodes)
        };

        block.nodes.push(CssNode::AtRule {
            name: at_rule.name.clone(),
            prelude,
            items,
            children,
        });

        Ok(())
    }

    fn eval_mixin_call<'a>(
        &mut self,
        call: &'a MixinCall,
        frame: &Frame<'a, '_>,
        context: &Context,
        block: &mut Block,
    ) -> Result<()> {
        let location = &call.location;

        if context.mixin_depth >= MAX_MIXIN_DEPTH {
            return Err(Error::new(
                ErrorKind::Argument,
                format!("too much recursion in mixin `{}`", call.name()),
            )
            .at(location));
        }

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push((
                arg.name.as_deref(),
                self.eval_value(&arg.value, frame, location)?,
            ));
        }

        let candidates = find_candidates(frame, &call.path);

        if candidates.is_empty() {
            return Err(Error::new(
                ErrorKind::Name,
                format!("`{}` is undefined", call.name()),
            )
            .at(location));
        }

        let inner_context = Context {
            mixin_depth: context.mixin_depth + 1,
            ..context.clone()
        };
        let mut matched = false;

        for candidate in candidates {
            let Some(bindings) = self.bind_params(candidate.mixin, &args, candidate.frame, location)?
            else {
                continue;
            };
            matched = true;

            let inner = self.apply_mixin(
                &candidate.namespaces,
                candidate.mixin,
                candidate.frame,
                frame,
                bindings,
                &inner_context,
            )?;

            block.items.extend(inner.items.into_iter().map(|item| match item {
                Item::Declaration {
                    name,
                    value,
                    important,
                } => Item::Declaration {
                    name,
                    value,
                    important: important || call.important,
                },
                comment => comment,
            }));
            block.nodes.extend(inner.nodes);
        }

        if !matched {
            let args = args
                .iter()
                .map(|(_, value)| value.to_css(false))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::new(
                ErrorKind::Argument,
                format!("no matching definition was found for `{}({args})`", call.name()),
            )
            .at(location));
        }

        Ok(())
    }

    fn apply_mixin<'a>(
        &mut self,
        namespaces: &[&'a Ruleset],
        mixin: &'a Ruleset,
        definition: &Frame<'a, '_>,
        caller: &Frame<'a, '_>,
        bindings: HashMap<&'a str, Value>,
        context: &Context,
    ) -> Result<Block> {
        if let Some((namespace, rest)) = namespaces.split_first() {
            let frame = Frame::new(&namespace.body, Some(definition));
            return self.apply_mixin(rest, mixin, &frame, caller, bindings, context);
        }

        let arguments = Frame::with_bindings(bindings, Some(definition), Some(caller));
        let frame = Frame::new(&mixin.body, Some(&arguments));
        self.eval_block(&mixin.body, &frame, context)
    }

    /// Bind call arguments to the parameters of a mixin.
    ///
    /// Returns `None` when the mixin does not accept the arguments.
    fn bind_params<'a>(
        &mut self,
        mixin: &'a Ruleset,
        args: &[(Option<&str>, Value)],
        definition: &Frame<'a, '_>,
        location: &Location,
    ) -> Result<Option<HashMap<&'a str, Value>>> {
        let Some(params) = mixin.params.as_ref() else {
            return Ok(args.is_empty().then(HashMap::new));
        };

        let mut bindings: HashMap<&'a str, Value> = HashMap::new();
        let mut positional = Vec::new();

        for (name, value) in args {
            let Some(name) = name else {
                positional.push(value.clone());
                continue;
            };
            let param = params.iter().find_map(|param| match param {
                Param::Named { name: param, .. } if param == name => Some(param.as_str()),
                _ => None,
            });
            let Some(param) = param else {
                return Ok(None);
            };
            bindings.insert(param, value.clone());
        }

        let mut positional = positional.into_iter();
        let mut arguments = Vec::new();

        for param in params {
            match param {
                Param::Named { name, default } => {
                    if let Some(value) = bindings.get(name.as_str()) {
                        arguments.push(value.clone());
                        continue;
                    }
                    let value = match (positional.next(), default) {
                        (Some(value), _) => value,
                        (None, Some(default)) => {
                            let scope = Frame::with_bindings(bindings.clone(), Some(definition), None);
                            self.eval_value(default, &scope, location)?
                        },
                        (None, None) => return Ok(None),
                    };
                    arguments.push(value.clone());
                    bindings.insert(name.as_str(), value);
                },
                Param::Pattern(pattern) => {
                    let Some(value) = positional.next() else {
                        return Ok(None);
                    };
                    let pattern = self.eval_value(pattern, definition, location)?;
                    if pattern.to_css(false) != value.to_css(false) {
                        return Ok(None);
                    }
                    arguments.push(value);
                },
                Param::Rest(name) => {
                    let rest: Vec<Value> = positional.by_ref().collect();
                    arguments.extend(rest.iter().cloned());
                    if let Some(name) = name {
                        bindings.insert(name.as_str(), Value::Expression(rest));
                    }
                },
            }
        }

        if positional.next().is_some() {
            return Ok(None);
        }

        bindings
            .entry("arguments")
            .or_insert(Value::Expression(arguments));

        Ok(Some(bindings))
    }

    fn lookup_variable<'a>(
        &mut self,
        name: &str,
        frame: &Frame<'a, '_>,
        location: &Location,
    ) -> Result<Value> {
        let Some((binding, scope)) = frame.find_variable(name) else {
            return Err(Error::new(
                ErrorKind::Name,
                format!("variable @{name} is undefined"),
            )
            .at(location));
        };

        match binding {
            Binding::Ready(value) => Ok(value.clone()),
            Binding::Lazy(variable) => {
                if self.evaluating.iter().any(|evaluating| evaluating == name) {
                    return Err(Error::new(
                        ErrorKind::Name,
                        format!("recursive variable definition for @{name}"),
                    )
                    .at(&variable.location));
                }
                self.evaluating.push(name.to_owned());
                let result = self.eval_value(&variable.value, scope, &variable.location);
                self.evaluating.pop();
                result
            },
        }
    }

    fn eval_value<'a>(
        &mut self,
        value: &Value,
        frame: &Frame<'a, '_>,
        location: &Location,
    ) -> Result<Value> {
        let result = match value {
            Value::Number(_) | Value::Color(_) | Value::Keyword(_) | Value::Anonymous(_) => {
                value.clone()
            },
            Value::Quoted {
                text,
                quote,
                escaped,
            } => Value::Quoted {
                text: self.interpolate(text, frame, false, location)?,
                quote: *quote,
                escaped: *escaped,
            },
            Value::Url(inner) => {
                let inner = match inner.as_ref() {
                    Value::Anonymous(text) => {
                        Value::Anonymous(self.interpolate(text, frame, false, location)?)
                    },
                    other => self.eval_value(other, frame, location)?,
                };
                Value::Url(Box::new(inner))
            },
            Value::Variable(name) => self.lookup_variable(name, frame, location)?,
            Value::VariableRef(name) => {
                let target = self.lookup_variable(name, frame, location)?.to_unquoted();
                self.lookup_variable(&target, frame, location)?
            },
            Value::Call { name, args } => {
                let args = self.eval_values(args, frame, location)?;
                match functions::call(name, &args) {
                    Some(result) => result.map_err(|error| error.at(location))?,
                    None => Value::Call {
                        name: name.clone(),
                        args,
                    },
                }
            },
            Value::RawCall { name, text } => Value::RawCall {
                name: name.clone(),
                text: self.interpolate(text, frame, true, location)?,
            },
            Value::Operation { op, lhs, rhs } => {
                let lhs = self.eval_value(lhs, frame, location)?;
                let rhs = self.eval_value(rhs, frame, location)?;
                Value::operate(*op, &lhs, &rhs).map_err(|error| error.at(location))?
            },
            Value::Negative(inner) => match self.eval_value(inner, frame, location)? {
                Value::Number(number) => Value::Number(Number::new(-number.value, number.unit)),
                other => Value::operate(Op::Mul, &other, &Value::Number(Number::new(-1.0, "")))
                    .map_err(|error| error.at(location))?,
            },
            Value::Paren(inner) => self.eval_value(inner, frame, location)?,
            Value::Slash(lhs, rhs) => Value::Slash(
                Box::new(self.eval_value(lhs, frame, location)?),
                Box::new(self.eval_value(rhs, frame, location)?),
            ),
            Value::Expression(items) => {
                let mut items = self.eval_values(items, frame, location)?;
                if items.len() == 1 {
                    items.remove(0)
                } else {
                    Value::Expression(items)
                }
            },
            Value::List(items) => Value::List(self.eval_values(items, frame, location)?),
        };

        Ok(result)
    }

    fn eval_values<'a>(
        &mut self,
        values: &[Value],
        frame: &Frame<'a, '_>,
        location: &Location,
    ) -> Result<Vec<Value>> {
        values
            .iter()
            .map(|value| self.eval_value(value, frame, location))
            .collect()
    }

    /// Replace `@{name}` with the value of variables.
    ///
    /// With `bare`, `@name` is replaced as well (as in media queries).
    fn interpolate<'a>(
        &mut self,
        text: &str,
        frame: &Frame<'a, '_>,
        bare: bool,
        location: &Location,
    ) -> Result<String> {
        if !text.contains('@') {
            return Ok(text.to_owned());
        }

        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(at) = rest.find('@') {
            result.push_str(&rest[..at]);
            let after = &rest[at + 1..];

            if let Some(inner) = after.strip_prefix('{') {
                let Some(close) = inner.find('}') else {
                    return Err(Error::new(
                        ErrorKind::Syntax,
                        "missing closing `}` in interpolation",
                    )
                    .at(location));
                };
                let value = self.lookup_variable(&inner[..close], frame, location)?;
                result.push_str(&value.to_unquoted());
                rest = &inner[close + 1..];
                continue;
            }

            let len = after.find(|c| !is_name_char(c)).unwrap_or(after.len());
            if bare && len > 0 {
                let value = self.lookup_variable(&after[..len], frame, location)?;
                result.push_str(&value.to_unquoted());
                rest = &after[len..];
            } else {
                result.push('@');
                rest = after;
            }
        }

        result.push_str(rest);
        Ok(result)
    }
}

/// Append a rule, unless it has no declaration.
fn push_rule(nodes: &mut Vec<CssNode>, selectors: Vec<String>, items: Vec<Item>) {
    let has_declarations = items
        .iter()
        .any(|item| matches!(item, Item::Declaration { .. }));
    if has_declarations && !selectors.is_empty() {
        nodes.push(CssNode::Rule { selectors, items });
    }
}

/// Combine parent and child selectors; `&` refers to the parent.
fn join_selectors(parents: &[String], children: &[String]) -> Vec<String> {
    if parents.is_empty() {
        return children
            .iter()
            .map(|child| child.replace('&', "").trim().to_owned())
            .collect();
    }

    let mut result = Vec::with_capacity(parents.len() * children.len());
    for child in children {
        for parent in parents {
            result.push(if child.contains('&') {
                child.replace('&', parent)
            } else {
                format!("{parent} {child}")
            });
        }
    }
    result
}

/// Join nested media queries with `and`.
fn combine_media(outer: &str, inner: &str) -> String {
    let mut queries = Vec::new();
    for outer in outer.split(',') {
        for inner in inner.split(',') {
            queries.push(format!("{} and {}", outer.trim(), inner.trim()));
        }
    }
    queries.join(", ")
}

/// Move nested `@media` blocks next to their parent.
fn bubble(nodes: Vec<CssNode>) -> Vec<CssNode> {
    let mut result = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            CssNode::Media { query, children } => {
                let (nested, own): (Vec<_>, Vec<_>) = bubble(children)
                    .into_iter()
                    .partition(|child| matches!(child, CssNode::Media { .. }));
                if !own.is_empty() {
                    result.push(CssNode::Media {
                        query,
                        children: own,
                    });
                }
                result.extend(nested);
            },
            CssNode::AtRule {
                name,
                prelude,
                items,
                children,
            } => result.push(CssNode::AtRule {
                name,
                prelude,
                items,
                children: bubble(children),
            }),
            node => result.push(node),
        }
    }

    result
}

/// Move `@charset` then `@import` statements to the top.
fn hoist(nodes: Vec<CssNode>) -> Vec<CssNode> {
    let is_statement = |node: &CssNode, keyword: &str| {
        matches!(node, CssNode::Statement(text) if text.to_ascii_lowercase().starts_with(keyword))
    };

    let (mut result, rest): (Vec<_>, Vec<_>) = nodes
        .into_iter()
        .partition(|node| is_statement(node, "@charset"));
    let (imports, rest): (Vec<_>, Vec<_>) = rest
        .into_iter()
        .partition(|node| is_statement(node, "@import"));

    result.extend(imports);
    result.extend(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::{combine_media, evaluate, join_selectors, CssNode, Item};
    use crate::less::{error::ErrorKind, parser};

    fn eval(input: &str) -> crate::less::error::Result<Vec<CssNode>> {
        evaluate(&parser::parse(input, None)?)
    }

    fn declarations(node: &CssNode) -> Vec<String> {
        let items = match node {
            CssNode::Rule { items, .. } | CssNode::AtRule { items, .. } => items.as_slice(),
            _ => &[],
        };
        items
            .iter()
            .filter_map(|item| match item {
                Item::Declaration { name, value, .. } => {
                    Some(format!("{name}: {}", value.to_css(false)))
                },
                Item::Comment(_) => None,
            })
            .collect()
    }

    #[test]
    fn selectors() {
        let parents = [".a".to_owned(), ".b".to_owned()];
        let children = [".c".to_owned(), "&:hover".to_owned()];

        assert_eq!(
            join_selectors(&parents, &children),
            [".a .c", ".b .c", ".a:hover", ".b:hover"]
        );
    }

    #[test]
    fn media_queries() {
        assert_eq!(
            combine_media("screen, print", "(min-width: 768px)"),
            "screen and (min-width: 768px), print and (min-width: 768px)"
        );
    }

    #[test]
    fn lazy_variables() {
        let nodes = eval(".a { width: @w; @w: @x * 2; }\n@x: 5px;").unwrap();

        assert_eq!(declarations(&nodes[0]), ["width: 10px"]);
    }

    #[test]
    fn scoped_variables() {
        let nodes = eval("@c: red;\n.a { @c: blue; color: @c; }\n.b { color: @c; }").unwrap();

        assert_eq!(declarations(&nodes[0]), ["color: blue"]);
        assert_eq!(declarations(&nodes[1]), ["color: red"]);
    }

    #[test]
    fn parametric_mixins() {
        let nodes = eval(concat!(
            ".border(@width; @style: solid) { border: @width @style #000; }\n",
            ".box(...) { box-shadow: @arguments; }\n",
            ".a { .border(2px); .box(1px, 2px); }\n",
            ".b { .border(@style: dashed; @width: 1px) !important; }\n",
        ))
        .unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(
            declarations(&nodes[0]),
            ["border: 2px solid #000", "box-shadow: 1px 2px"]
        );

        assert!(
            matches!(
                &nodes[1],
                CssNode::Rule { items, .. }
                    if matches!(items[..], [Item::Declaration { important: true, .. }])
            ),
            "{:?}",
            nodes[1]
        );
        assert_eq!(declarations(&nodes[1]), ["border: 1px dashed #000"]);
    }

    #[test]
    fn pattern_matching() {
        let nodes = eval(concat!(
            ".m(dark; @c) { color: darken(@c, 10%); }\n",
            ".m(light; @c) { color: lighten(@c, 10%); }\n",
            ".a { .m(light; #ff0000); }\n",
        ))
        .unwrap();

        assert_eq!(declarations(&nodes[0]), ["color: #ff3333"]);
    }

    #[test]
    fn namespaced_mixins() {
        let nodes = eval(concat!(
            "#ns { @size: 3px; .m() { width: @size; } }\n",
            ".a { #ns > .m; }\n",
        ))
        .unwrap();

        assert_eq!(declarations(&nodes[0]), ["width: 3px"]);
    }

    #[test]
    fn mixin_nested_rules() {
        let nodes = eval(".m() { &:hover { color: red; } }\n.a { .m(); }").unwrap();

        assert!(
            matches!(&nodes[0], CssNode::Rule { selectors, .. } if selectors == &[".a:hover"]),
            "{:?}",
            nodes[0]
        );
    }

    #[test]
    fn media_bubbling() {
        let nodes = eval(concat!(
            "@phone: ~\"(max-width: 480px)\";\n",
            ".a { color: red; @media screen { color: blue; @media @phone { color: green; } } }\n",
        ))
        .unwrap();

        assert_eq!(nodes.len(), 3);
        assert!(matches!(&nodes[1], CssNode::Media { query, .. } if query == "screen"));
        assert!(matches!(
            &nodes[2],
            CssNode::Media { query, .. } if query == "screen and (max-width: 480px)"
        ));
    }

    #[test]
    fn raw_functions() {
        let nodes = eval(concat!(
            "@gutter: 2px;\n",
            "@name: inner;\n",
            ".a {\n",
            "  width: calc(100% - @gutter);\n",
            "  height: -webkit-calc(50% + @{gutter} * 2);\n",
            "  color: var(--@{name}-color);\n",
            "}\n",
        ))
        .unwrap();

        assert_eq!(
            declarations(&nodes[0]),
            [
                "width: calc(100% - 2px)",
                "height: -webkit-calc(50% + 2px * 2)",
                "color: var(--inner-color)",
            ]
        );
    }

    #[test]
    fn page_rules() {
        let nodes = eval("@m: 1in;\n@page :first { margin: @m; }\n@page { size: A4; }").unwrap();

        assert!(
            matches!(
                &nodes[0],
                CssNode::AtRule { name, prelude, .. } if name == "@page" && prelude == ":first"
            ),
            "{:?}",
            nodes[0]
        );
        assert_eq!(declarations(&nodes[0]), ["margin: 1in"]);
        assert!(
            matches!(&nodes[1], CssNode::AtRule { prelude, .. } if prelude.is_empty()),
            "{:?}",
            nodes[1]
        );
    }

    #[test]
    fn imports_are_hoisted() {
        let nodes = eval(".a { color: red; }\n@import \"x.css\";\n@charset \"UTF-8\";").unwrap();

        assert_eq!(nodes[0], CssNode::Statement("@charset \"UTF-8\"".to_owned()));
        assert_eq!(nodes[1], CssNode::Statement("@import \"x.css\"".to_owned()));
    }

    #[test]
    fn errors() {
        const CASES: [(&str, ErrorKind); 11] = [
            (".a { color: @missing; }", ErrorKind::Name),
            (".a { .missing; }", ErrorKind::Name),
            (".m(@a) { }\n.a { .m(1, 2); }", ErrorKind::Argument),
            (".a { width: (1px / 0); }", ErrorKind::Operation),
            ("@a: @b;\n@b: @a;\n.a { width: @a; }", ErrorKind::Name),
            ("color: red;", ErrorKind::Syntax),
            (".a { .a; }", ErrorKind::Argument),
            (".a { width: calc(1px + @missing); }", ErrorKind::Name),
            (".a:extend(.b) { color: red; }", ErrorKind::Syntax),
            (".a { &:extend(.b); }", ErrorKind::Syntax),
            (".a { width: ~`1 + 1`; }", ErrorKind::Syntax),
        ];

        for (input, kind) in CASES {
            let error = eval(input).unwrap_err();
            assert_eq!(
                error.kind(),
                kind,
                "\neval({input:?}) expected {kind:?} but received {error}"
            );
            assert!(error.location().is_some(), "{error}");
        }
    }
}
