//! Route extraction from Python source using tree-sitter.
//!
//! Recognizes FastAPI-style route decorators of the shape
//! `@<base>.<verb>("/path", ...)` where `<base>` is a known router object
//! name and `<verb>` is an HTTP method. Everything else is ignored.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser as TsParser, Query, QueryCursor};

use crate::error::ParseError;
use crate::model::{Endpoint, HttpMethod, ParamLocation, Parameter};

/// Router object names accepted as decorator bases.
const ROUTER_BASES: &[&str] = &["app", "router"];

/// Capitalized builtin generics that are not request-body models.
const BUILTIN_GENERICS: &[&str] = &["List", "Dict", "Set", "Tuple", "Optional", "Union"];

/// Placeholder when a default expression cannot be rendered as text.
const UNRENDERABLE_DEFAULT: &str = "...";

/// Tree-sitter query matching every function definition, at any nesting
/// depth, in tree order.
const FUNCTION_QUERY: &str = "(function_definition) @func";

lazy_static! {
    /// Matches `{name}` or `{name:typeconstraint}` path placeholders.
    static ref PATH_PARAM: Regex = Regex::new(r"\{([^}:]+)(?::[^}]*)?\}").unwrap();
}

/// Route metadata recovered from a single decorator.
struct RouteDecorator {
    method: HttpMethod,
    path: String,
    response_model: Option<String>,
    is_deprecated: bool,
}

/// Scan Python source for route-decorated handler functions.
///
/// Returns endpoints in declaration order. A syntax error anywhere in the
/// file is a hard `ParseError`; the directory driver decides whether to
/// skip the file. Empty or whitespace-only source yields no endpoints.
pub fn extract_endpoints(source: &str, file_path: &str) -> Result<Vec<Endpoint>, ParseError> {
    if source.trim().is_empty() {
        return Ok(vec![]);
    }

    let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
    let mut parser = TsParser::new();
    parser
        .set_language(&language)
        .map_err(|e| ParseError::new(file_path, e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::new(file_path, "failed to parse source"))?;
    let root = tree.root_node();

    // tree-sitter is error-tolerant; an ERROR node anywhere means the file
    // is not valid Python.
    if root.has_error() {
        return Err(ParseError::new(file_path, "invalid syntax"));
    }

    let src = source.as_bytes();
    let query = Query::new(&language, FUNCTION_QUERY)
        .map_err(|e| ParseError::new(file_path, e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, src);

    let mut endpoints = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            if let Some(endpoint) = endpoint_from_function(capture.node, src, file_path) {
                endpoints.push(endpoint);
            }
        }
    }

    Ok(endpoints)
}

/// Build an endpoint from a function definition, if one of its decorators
/// matches the route-decorator grammar. The first matching decorator wins.
fn endpoint_from_function(func: Node, src: &[u8], file_path: &str) -> Option<Endpoint> {
    let route = first_route_decorator(func, src)?;

    let function_name = func
        .child_by_field_name("name")
        .and_then(|n| node_text(n, src))?;

    let is_async = func.child(0).map(|c| c.kind() == "async").unwrap_or(false);
    let docstring = extract_docstring(func, src);
    let has_docstring = docstring.as_deref().map(|s| !s.is_empty()).unwrap_or(false);
    let parameters = extract_parameters(func, src, &route.path);

    Some(Endpoint {
        method: route.method,
        path: route.path,
        function_name,
        file_path: file_path.to_string(),
        // The function-definition line, never the decorator line.
        line_number: func.start_position().row + 1,
        docstring,
        has_docstring,
        parameters,
        response_model: route.response_model,
        is_deprecated: route.is_deprecated,
        is_async,
        is_documented: false,
    })
}

/// Walk the function's attached decorators in written order and return the
/// first one matching the route-decorator grammar.
fn first_route_decorator(func: Node, src: &[u8]) -> Option<RouteDecorator> {
    let parent = func.parent()?;
    if parent.kind() != "decorated_definition" {
        return None;
    }

    let mut cursor = parent.walk();
    for child in parent.children(&mut cursor) {
        if child.kind() != "decorator" {
            continue;
        }
        if let Some(expr) = child.named_child(0) {
            if let Some(route) = parse_route_decorator(expr, src) {
                return Some(route);
            }
        }
    }
    None
}

/// Structural predicate over a decorator expression.
///
/// Must be a call whose callee is `<base>.<verb>` with a recognized base
/// and verb, and whose first positional argument is a literal string. Any
/// other shape yields no endpoint.
fn parse_route_decorator(expr: Node, src: &[u8]) -> Option<RouteDecorator> {
    if expr.kind() != "call" {
        return None;
    }

    let callee = expr.child_by_field_name("function")?;
    if callee.kind() != "attribute" {
        return None;
    }

    let base = callee.child_by_field_name("object")?;
    if base.kind() != "identifier" {
        return None;
    }
    let base_name = node_text(base, src)?;
    if !ROUTER_BASES.contains(&base_name.as_str()) {
        return None;
    }

    let verb = callee.child_by_field_name("attribute")?;
    let method = HttpMethod::parse(&node_text(verb, src)?)?;

    let args = expr.child_by_field_name("arguments")?;

    // First positional argument must be a literal string.
    let mut path = None;
    let mut response_model = None;
    let mut is_deprecated = false;

    let mut cursor = args.walk();
    for arg in args.named_children(&mut cursor) {
        match arg.kind() {
            "keyword_argument" => {
                let name = arg
                    .child_by_field_name("name")
                    .and_then(|n| node_text(n, src));
                let value = arg.child_by_field_name("value");
                match (name.as_deref(), value) {
                    (Some("response_model"), Some(v)) if v.kind() == "identifier" => {
                        response_model = node_text(v, src);
                    }
                    (Some("deprecated"), Some(v)) => {
                        if let Some(flag) = constant_truthiness(v, src) {
                            is_deprecated = flag;
                        }
                    }
                    _ => {}
                }
            }
            "comment" => {}
            _ if path.is_none() => {
                match literal_path_text(arg, src) {
                    Some(p) => path = Some(p),
                    // Non-literal first argument: not a route decorator.
                    None => return None,
                }
            }
            _ => {}
        }
    }

    Some(RouteDecorator {
        method,
        path: path?,
        response_model,
        is_deprecated,
    })
}

/// Truthiness of a literal constant node, mirroring `bool()` on the value.
/// Non-literal values (names, f-strings, calls) yield `None`.
fn constant_truthiness(node: Node, src: &[u8]) -> Option<bool> {
    match node.kind() {
        "true" => Some(true),
        "false" | "none" => Some(false),
        "integer" => node_text(node, src).map(|t| t != "0"),
        "float" => node_text(node, src)
            .and_then(|t| t.replace('_', "").parse::<f64>().ok())
            .map(|v| v != 0.0),
        "string" => plain_string_text(node, src).map(|s| !s.is_empty()),
        _ => None,
    }
}

/// Literal route-path text of a decorator's first positional argument.
///
/// Accepts a plain string literal or an implicit concatenation of them
/// (`"/v1" "/users"` folds to `"/v1/users"`). F-strings, bytes literals,
/// and any other expression are not literal paths.
fn literal_path_text(node: Node, src: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => plain_string_text(node, src),
        "concatenated_string" => {
            let mut joined = String::new();
            let mut cursor = node.walk();
            for part in node.named_children(&mut cursor) {
                if part.kind() != "string" {
                    continue;
                }
                joined.push_str(&plain_string_text(part, src)?);
            }
            Some(joined)
        }
        _ => None,
    }
}

/// Inner text of a plain string literal.
///
/// tree-sitter gives f-strings the node kind `string` too; those carry the
/// prefix in `string_start` and `interpolation` children, and are rejected
/// here along with bytes literals.
fn plain_string_text(node: Node, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "interpolation" => return None,
            "string_start" => {
                let prefix = node_text(child, src)?;
                if prefix.contains(|c| matches!(c, 'f' | 'F' | 'b' | 'B')) {
                    return None;
                }
            }
            _ => {}
        }
    }
    string_literal_text(node, src)
}

/// The function's leading string-literal statement, trimmed, if present.
fn extract_docstring(func: Node, src: &[u8]) -> Option<String> {
    let body = func.child_by_field_name("body")?;
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }
    string_literal_text(expr, src).map(|s| s.trim().to_string())
}

/// Inner text of a string literal, between the opening and closing quotes.
/// Handles single, triple-quoted, and prefixed strings uniformly.
fn string_literal_text(node: Node, src: &[u8]) -> Option<String> {
    let mut start = None;
    let mut end = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "string_start" => start = Some(child.end_byte()),
            "string_end" => end = Some(child.start_byte()),
            _ => {}
        }
    }
    let (start, end) = (start?, end?);
    if start > end {
        return None;
    }
    std::str::from_utf8(&src[start..end]).ok().map(String::from)
}

/// Parameter names embedded in the route path template.
fn path_param_names(path: &str) -> HashSet<String> {
    PATH_PARAM
        .captures_iter(path)
        .map(|c| c[1].to_string())
        .collect()
}

/// Classify each handler parameter as path, body, or query.
fn extract_parameters(func: Node, src: &[u8], path: &str) -> Vec<Parameter> {
    let path_params = path_param_names(path);
    let mut parameters = Vec::new();

    let params_node = match func.child_by_field_name("parameters") {
        Some(n) => n,
        None => return parameters,
    };

    let mut cursor = params_node.walk();
    for param in params_node.named_children(&mut cursor) {
        let (name, type_hint, default) = match param.kind() {
            "identifier" => (node_text(param, src), None, None),
            "typed_parameter" => {
                let name = param
                    .named_child(0)
                    .filter(|n| n.kind() == "identifier")
                    .and_then(|n| node_text(n, src));
                let hint = param
                    .child_by_field_name("type")
                    .and_then(|n| node_text(n, src));
                (name, hint, None)
            }
            "default_parameter" => {
                let name = param
                    .child_by_field_name("name")
                    .filter(|n| n.kind() == "identifier")
                    .and_then(|n| node_text(n, src));
                let default = param.child_by_field_name("value").map(|n| {
                    node_text(n, src).unwrap_or_else(|| UNRENDERABLE_DEFAULT.to_string())
                });
                (name, None, default)
            }
            "typed_default_parameter" => {
                let name = param
                    .child_by_field_name("name")
                    .filter(|n| n.kind() == "identifier")
                    .and_then(|n| node_text(n, src));
                let hint = param
                    .child_by_field_name("type")
                    .and_then(|n| node_text(n, src));
                let default = param.child_by_field_name("value").map(|n| {
                    node_text(n, src).unwrap_or_else(|| UNRENDERABLE_DEFAULT.to_string())
                });
                (name, hint, default)
            }
            // *args, **kwargs, separators: not request parameters.
            _ => continue,
        };

        let name = match name {
            Some(n) => n,
            None => continue,
        };
        if name == "self" || name == "cls" {
            continue;
        }

        let location = classify_parameter(&name, type_hint.as_deref(), &path_params);
        let required = default.is_none();

        parameters.push(Parameter {
            name,
            type_hint,
            location,
            required,
            default_value: default,
        });
    }

    parameters
}

/// Heuristic location classification.
///
/// Path parameters are matched by name against the route template. A
/// capitalized type head that is not a builtin generic marks a body
/// parameter (typically a model type); everything else is a query
/// parameter. The `Optional` prefix is checked both literally and via the
/// head-word set.
fn classify_parameter(
    name: &str,
    type_hint: Option<&str>,
    path_params: &HashSet<String>,
) -> ParamLocation {
    if path_params.contains(name) {
        return ParamLocation::Path;
    }

    if let Some(hint) = type_hint {
        let capitalized = hint.chars().next().map(|c| c.is_uppercase()).unwrap_or(false);
        if capitalized && !hint.starts_with("Optional") {
            let head = hint.split('[').next().unwrap_or(hint);
            if !BUILTIN_GENERICS.contains(&head) {
                return ParamLocation::Body;
            }
        }
    }

    ParamLocation::Query
}

fn node_text(node: Node, src: &[u8]) -> Option<String> {
    node.utf8_text(src).ok().map(String::from)
}
