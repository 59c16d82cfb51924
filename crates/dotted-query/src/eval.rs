use serde_json::Value;
use std::cmp::Ordering;

use dotted_path::resolve;

use crate::filter::{Clause, Expect, Filter, Match, Operator};

/// Tests a document against a filter.
///
/// Clauses are evaluated in construction order and the first failing
/// clause ends the walk. The terminal operators (`$size`, `$elemMatch`)
/// return their own result immediately, skipping any sibling clauses.
pub fn query(value: &Value, filter: &Filter) -> bool {
    eval_filter(Some(value), filter)
}

pub(crate) fn eval_filter(value: Option<&Value>, filter: &Filter) -> bool {
    match filter {
        Filter::Where(predicate) => predicate.test(value),
        Filter::Clauses(clauses) => {
            for clause in clauses {
                match eval_clause(value, clause) {
                    Verdict::Pass => {}
                    Verdict::Fail => return false,
                    Verdict::Terminal(result) => return result,
                }
            }
            true
        }
    }
}

enum Verdict {
    Pass,
    Fail,
    Terminal(bool),
}

impl Verdict {
    fn from_bool(ok: bool) -> Self {
        if ok { Verdict::Pass } else { Verdict::Fail }
    }
}

fn eval_clause(value: Option<&Value>, clause: &Clause) -> Verdict {
    match clause {
        Clause::Operator(op) => eval_operator(value, op),
        Clause::Path { path, expect } => {
            let resolved = value.and_then(|v| resolve(v, path));
            let ok = match expect {
                Expect::Literal(operand) => equals(resolved, operand),
                Expect::Array(items) => match resolved {
                    Some(Value::Array(found)) => {
                        found.len() == items.len()
                            && found.iter().zip(items).all(|(a, b)| value_eq(a, b))
                    }
                    _ => false,
                },
                Expect::Nested(sub) => eval_filter(resolved, sub),
            };
            Verdict::from_bool(ok)
        }
    }
}

fn eval_operator(value: Option<&Value>, op: &Operator) -> Verdict {
    let ok = match op {
        Operator::Eq(operand) => value.map(|v| value_eq(v, operand)).unwrap_or(false),
        Operator::Ne(operand) => !value.map(|v| value_eq(v, operand)).unwrap_or(false),
        Operator::Like(operand) => equals(value, operand),
        Operator::Regexp(Some(regex)) => value
            .and_then(Value::as_str)
            .map(|s| regex.is_match(s))
            .unwrap_or(false),
        Operator::Regexp(None) => false,
        Operator::Gt(operand) => ordered(value, operand, &[Ordering::Greater]),
        Operator::Gte(operand) => ordered(value, operand, &[Ordering::Greater, Ordering::Equal]),
        Operator::Lt(operand) => ordered(value, operand, &[Ordering::Less]),
        Operator::Lte(operand) => ordered(value, operand, &[Ordering::Less, Ordering::Equal]),
        Operator::In(items) => value
            .map(|v| items.iter().any(|item| value_eq(v, item)))
            .unwrap_or(false),
        Operator::Nin(items) => !value
            .map(|v| items.iter().any(|item| value_eq(v, item)))
            .unwrap_or(false),
        Operator::And(filters) => filters.iter().all(|f| eval_filter(value, f)),
        Operator::Or(filters) => filters.iter().any(|f| eval_filter(value, f)),
        Operator::Nor(filters) => !filters.iter().any(|f| eval_filter(value, f)),
        Operator::Not(sub) => !eval_filter(value, sub),
        Operator::Type(name) => type_matches(value, name),
        Operator::Exists => value.is_some(),
        Operator::Size(expected) => {
            return Verdict::Terminal(size_matches(value, *expected));
        }
        Operator::ElemMatch(sub) => {
            let hit = match value {
                Some(Value::Array(items)) => items.iter().any(|item| eval_filter(Some(item), sub)),
                _ => false,
            };
            return Verdict::Terminal(hit);
        }
        Operator::All(sub) => match value {
            Some(Value::Array(items)) => items.iter().all(|item| eval_filter(Some(item), sub)),
            _ => false,
        },
        Operator::Mod(divisor) => value
            .and_then(Value::as_f64)
            .map(|n| n % (*divisor as f64) == 0.0)
            .unwrap_or(false),
        Operator::Where(predicate) => predicate.test(value),
        Operator::Never => false,
    };

    Verdict::from_bool(ok)
}

/// Equality with regex support: a regex operand tests string values,
/// anything else compares for (numerically normalized) equality.
fn equals(value: Option<&Value>, operand: &Match) -> bool {
    match (value, operand) {
        (Some(Value::String(s)), Match::Regex(regex)) => regex.is_match(s),
        (_, Match::Regex(_)) => false,
        (Some(v), Match::Value(expected)) => value_eq(v, expected),
        (None, Match::Value(_)) => false,
    }
}

/// Deep equality where integer and float spellings of the same number
/// are equal.
pub(crate) fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| value_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).map(|y| value_eq(x, y)).unwrap_or(false))
        }
        _ => a == b,
    }
}

/// Numbers order numerically, strings lexicographically; any other
/// pairing does not order at all.
fn ordered(value: Option<&Value>, operand: &Value, accept: &[Ordering]) -> bool {
    let Some(value) = value else {
        return false;
    };
    let ordering = match (value, operand) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        },
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    };
    ordering.map(|o| accept.contains(&o)).unwrap_or(false)
}

fn type_matches(value: Option<&Value>, name: &str) -> bool {
    match name {
        "undefined" => value.is_none(),
        "string" => matches!(value, Some(Value::String(_))),
        "number" => matches!(value, Some(Value::Number(_))),
        "boolean" => matches!(value, Some(Value::Bool(_))),
        // The source type vocabulary lumps null, arrays and objects
        // together under "object".
        "object" => matches!(
            value,
            Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_))
        ),
        _ => false,
    }
}

fn size_matches(value: Option<&Value>, expected: usize) -> bool {
    match value {
        Some(Value::Array(items)) => items.len() == expected,
        Some(Value::Object(map)) => map.len() == expected,
        _ => false,
    }
}
