//! Print evaluated rules as CSS text.

use std::collections::HashSet;

use super::eval::{CssNode, Item};

const INDENT: &str = "  ";

/// CSS printer.
pub(crate) struct Renderer {
    compress: bool,
    /// Remove duplicate declarations in a rule.
    dedupe: bool,
}

impl Renderer {
    pub(crate) fn new(compress: bool, optimization: u8) -> Self {
        Self {
            compress,
            dedupe: optimization >= 2,
        }
    }

    pub(crate) fn render(&self, nodes: &[CssNode]) -> String {
        let mut output = String::new();
        self.render_nodes(nodes, 0, &mut output);
        output
    }

    fn render_nodes(&self, nodes: &[CssNode], depth: usize, output: &mut String) {
        for node in nodes {
            self.render_node(node, depth, output);
        }
    }

    fn render_node(&self, node: &CssNode, depth: usize, output: &mut String) {
        match node {
            CssNode::Comment(text) => {
                if !self.compress {
                    self.line(depth, text, output);
                }
            },
            CssNode::Rule { selectors, items } => {
                let selectors: Vec<String> = if self.compress {
                    selectors.iter().map(|s| compress_selector(s)).collect()
                } else {
                    selectors.clone()
                };
                let separator = if self.compress {
                    ",".to_owned()
                } else {
                    format!(",\n{}", INDENT.repeat(depth))
                };
                self.open(depth, &selectors.join(&separator), output);
                self.render_items(items, depth + 1, output);
                self.close(depth, output);
            },
            CssNode::Media { query, children } => {
                self.open(depth, &format!("@media {}", self.compress_query(query)), output);
                self.render_nodes(children, depth + 1, output);
                self.close(depth, output);
            },
            CssNode::AtRule {
                name,
                prelude,
                items,
                children,
            } => {
                let head = if prelude.is_empty() {
                    name.clone()
                } else {
                    format!("{name} {}", self.compress_query(prelude))
                };
                self.open(depth, &head, output);
                self.render_items(items, depth + 1, output);
                self.render_nodes(children, depth + 1, output);
                self.close(depth, output);
            },
            CssNode::Statement(text) => self.line(depth, &format!("{text};"), output),
        }
    }

    fn render_items(&self, items: &[Item], depth: usize, output: &mut String) {
        let mut lines: Vec<String> = Vec::with_capacity(items.len());

        for item in items {
            match item {
                Item::Declaration {
                    name,
                    value,
                    important,
                } => {
                    let value = value.to_css(self.compress);
                    lines.push(match (self.compress, important) {
                        (true, true) => format!("{name}:{value}!important"),
                        (true, false) => format!("{name}:{value}"),
                        (false, true) => format!("{name}: {value} !important;"),
                        (false, false) => format!("{name}: {value};"),
                    });
                },
                Item::Comment(text) => {
                    if !self.compress {
                        lines.push(text.clone());
                    }
                },
            }
        }

        if self.dedupe {
            lines = dedupe(lines);
        }

        if self.compress {
            output.push_str(&lines.join(";"));
        } else {
            for line in &lines {
                self.line(depth, line, output);
            }
        }
    }

    fn open(&self, depth: usize, head: &str, output: &mut String) {
        if self.compress {
            output.push_str(head);
            output.push('{');
        } else {
            self.line(depth, &format!("{head} {{"), output);
        }
    }

    fn close(&self, depth: usize, output: &mut String) {
        if self.compress {
            output.push('}');
        } else {
            self.line(depth, "}", output);
        }
    }

    fn line(&self, depth: usize, text: &str, output: &mut String) {
        if !self.compress {
            output.push_str(&INDENT.repeat(depth));
        }
        output.push_str(text);
        if !self.compress {
            output.push('\n');
        }
    }

    fn compress_query(&self, query: &str) -> String {
        if self.compress {
            query.replace(", ", ",").replace(": ", ":")
        } else {
            query.to_owned()
        }
    }
}

/// Keep the last occurrence of each line.
fn dedupe(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result: Vec<String> = lines
        .into_iter()
        .rev()
        .filter(|line| seen.insert(line.clone()))
        .collect();
    result.reverse();
    result
}

/// Remove spaces around combinators outside brackets and parentheses.
fn compress_selector(selector: &str) -> String {
    let mut result = String::with_capacity(selector.len());
    let mut depth = 0usize;

    for c in selector.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {},
        }
        if depth == 0 && matches!(c, '>' | '+' | '~') {
            while result.ends_with(' ') {
                result.pop();
            }
            result.push(c);
            continue;
        }
        if depth == 0 && c == ' ' && result.ends_with(['>', '+', '~']) {
            continue;
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::{compress_selector, Renderer};
    use crate::less::{eval, parser};

    fn render(input: &str, compress: bool, optimization: u8) -> String {
        let nodes = eval::evaluate(&parser::parse(input, None).unwrap()).unwrap();
        Renderer::new(compress, optimization).render(&nodes)
    }

    #[test]
    fn pretty() {
        let result = render(
            "/* header */\n.a, .b { color: red; .c { margin: 0 auto !important; } }",
            false,
            1,
        );

        assert_eq!(
            result,
            concat!(
                "/* header */\n",
                ".a,\n",
                ".b {\n",
                "  color: red;\n",
                "}\n",
                ".a .c,\n",
                ".b .c {\n",
                "  margin: 0 auto !important;\n",
                "}\n",
            )
        );
    }

    #[test]
    fn media() {
        let result = render(".a { @media print { display: none; } }", false, 1);

        assert_eq!(
            result,
            "@media print {\n  .a {\n    display: none;\n  }\n}\n"
        );
    }

    #[test]
    fn compressed() {
        let result = render(
            "/* dropped */\n.a > .b { color: #ffffff; font: 12px/1.5 \"A B\", serif; }",
            true,
            1,
        );

        assert_eq!(result, ".a>.b{color:#fff;font:12px/1.5 \"A B\",serif}");
    }

    #[test]
    fn duplicate_declarations() {
        const INPUT: &str = ".a { color: red; width: 1px; color: red; }";

        assert_eq!(
            render(INPUT, true, 1),
            ".a{color:red;width:1px;color:red}"
        );
        assert_eq!(render(INPUT, true, 2), ".a{width:1px;color:red}");
    }

    #[test]
    fn selectors() {
        assert_eq!(compress_selector("a > b + c ~ d"), "a>b+c~d");
        assert_eq!(compress_selector("li:nth-child(2n + 1) a"), "li:nth-child(2n + 1) a");
    }
}
