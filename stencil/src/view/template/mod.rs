//! The default template language.
//!
//! Templates are text with tags which print values from the data they are rendered with:
//!
//! - `<%= user.name %>` prints the value as-is,
//! - `<%- user.name %>` escapes it for HTML first.
//!
//! Expressions are variable paths, e.g. `title`, `user.address.city` or `items[0]`. Tags
//! can be changed with [`Options`].
pub mod error;
pub mod lexer;

pub use error::Error;
pub use lexer::{Lexer, Token, TokenWithContext};

use crate::safe_html;
use crate::view::Options;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_$][\w$]*)((?:\.[A-Za-z_$][\w$]*|\[\d+\])*)$").unwrap()
});
static KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.([A-Za-z_$][\w$]*)|\[(\d+)\]").unwrap());

#[derive(Debug, Clone, PartialEq)]
enum Key {
    Field(String),
    Index(usize),
}

impl Key {
    fn get<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match self {
            Key::Field(field) => value.get(field.as_str()),
            Key::Index(index) => value.get(*index),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Root {
    /// The data itself, through the `variable` namespace.
    Data,
    /// A top-level key of the data.
    Name(String),
    /// Not the `variable` namespace, so nothing is in scope.
    Unbound(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Value {
        root: Root,
        keys: Vec<Key>,
        escape: bool,
    },
}

/// A compiled template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Compile a template with the given options.
    pub fn compile(source: &str, options: &Options) -> Result<Self, Error> {
        let mut segments = vec![];

        for token in Lexer::new(source, options).tokens()? {
            let (expression, escape) = match token.token() {
                Token::Text(text) => {
                    segments.push(Segment::Text(text.clone()));
                    continue;
                }
                Token::Interpolate(expression) => (expression, false),
                Token::Escape(expression) => (expression, true),
            };

            let (root, keys) = parse_path(expression, options.variable.as_deref())
                .ok_or_else(|| Error::ExpressionSyntax {
                    expression: expression.clone(),
                    line: token.line(),
                    column: token.column(),
                })?;

            segments.push(Segment::Value { root, keys, escape });
        }

        Ok(Template { segments })
    }

    /// Compile a template with the default options.
    pub fn from_str(source: &str) -> Result<Self, Error> {
        Self::compile(source, &Options::default())
    }

    /// Render the template with the given data.
    pub fn render(&self, data: &Value) -> Result<String, Error> {
        let mut result = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => result.push_str(text),
                Segment::Value { root, keys, escape } => {
                    let mut value = match root {
                        Root::Data => data,
                        Root::Name(name) => data
                            .get(name.as_str())
                            .ok_or_else(|| Error::UndefinedVariable(name.clone()))?,
                        Root::Unbound(name) => return Err(Error::UndefinedVariable(name.clone())),
                    };

                    let mut missing = false;
                    for key in keys {
                        match key.get(value) {
                            Some(next) => value = next,
                            None => {
                                missing = true;
                                break;
                            }
                        }
                    }

                    if missing {
                        continue;
                    }

                    let text = display(value);
                    if *escape {
                        result.push_str(&safe_html(&text));
                    } else {
                        result.push_str(&text);
                    }
                }
            }
        }

        Ok(result)
    }
}

/// Split `a.b[0]` into its root name and keys. With a namespace `variable`,
/// the root must be that variable and refers to the data itself.
fn parse_path(expression: &str, variable: Option<&str>) -> Option<(Root, Vec<Key>)> {
    let captures = PATH.captures(expression)?;
    let name = captures.get(1)?.as_str();
    let rest = captures.get(2).map(|m| m.as_str()).unwrap_or("");

    let mut keys = vec![];
    for key in KEY.captures_iter(rest) {
        if let Some(field) = key.get(1) {
            keys.push(Key::Field(field.as_str().to_string()));
        } else if let Some(index) = key.get(2) {
            keys.push(Key::Index(index.as_str().parse().ok()?));
        }
    }

    let root = match variable {
        Some(variable) if variable == name => Root::Data,
        Some(_) => Root::Unbound(name.to_string()),
        None => Root::Name(name.to_string()),
    };

    Some((root, keys))
}

/// Print a value the way a template expects it: `null` is blank and lists
/// are joined with commas.
fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(string) => string.clone(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(","),
        value => value.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpolate() {
        let template = Template::from_str("<h1><%= title %></h1>").unwrap();
        let rendered = template.render(&json!({ "title": "<b>Hi</b>" })).unwrap();

        assert_eq!(rendered, "<h1><b>Hi</b></h1>");
    }

    #[test]
    fn test_escape() {
        let template = Template::from_str("<h1><%- title %></h1>").unwrap();
        let rendered = template.render(&json!({ "title": "<b>Hi</b>" })).unwrap();

        assert_eq!(rendered, "<h1>&lt;b&gt;Hi&lt;/b&gt;</h1>");
    }

    #[test]
    fn test_paths() {
        let template =
            Template::from_str("<%= user.name %> has <%= user.pets[1].name %> and <%= count %>")
                .unwrap();
        let data = json!({
            "user": { "name": "Alice", "pets": [{ "name": "Rex" }, { "name": "Tom" }] },
            "count": 2,
        });

        assert_eq!(template.render(&data).unwrap(), "Alice has Tom and 2");
    }

    #[test]
    fn test_display() {
        let template = Template::from_str("[<%= a %>|<%= b %>|<%= c %>|<%= d %>]").unwrap();
        let data = json!({ "a": null, "b": [1, 2, 3], "c": true, "d": { "x": 1 } });

        assert_eq!(template.render(&data).unwrap(), r#"[|1,2,3|true|{"x":1}]"#);
    }

    #[test]
    fn test_missing_values() {
        let template = Template::from_str("<%= user.email %>").unwrap();
        assert_eq!(template.render(&json!({ "user": {} })).unwrap(), "");

        let err = template.render(&json!({})).unwrap_err();
        assert_eq!(err, Error::UndefinedVariable("user".into()));
        assert_eq!(err.to_string(), "variable \"user\" is not defined or in scope");
    }

    #[test]
    fn test_variable_option() {
        let options = Options::default().variable("data");
        let template = Template::compile("<%= data.title %>", &options).unwrap();

        assert_eq!(template.render(&json!({ "title": "foo" })).unwrap(), "foo");

        let template = Template::compile("<%= title %>", &options).unwrap();
        assert_eq!(
            template.render(&json!({ "title": "foo" })).unwrap_err(),
            Error::UndefinedVariable("title".into())
        );
    }

    #[test]
    fn test_expression_syntax() {
        let err = Template::from_str("line one\n  <%= 1 + 2 %>").unwrap_err();

        assert_eq!(
            err,
            Error::ExpressionSyntax {
                expression: "1 + 2".into(),
                line: 2,
                column: 3,
            }
        );
    }

    #[test]
    fn test_no_tags() {
        let template = Template::from_str("foo").unwrap();
        assert_eq!(template.render(&Value::Null).unwrap(), "foo");
    }
}
