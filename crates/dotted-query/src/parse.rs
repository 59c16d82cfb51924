use lru::LruCache;
use regex::Regex;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::{Mutex, OnceLock};

use crate::filter::{Clause, Expect, Filter, Match, Operator};

static REGEX_CACHE: OnceLock<Mutex<LruCache<String, Regex>>> = OnceLock::new();

const REGEX_CACHE_SIZE: usize = 100;

/// Compiles a pattern through a bounded, process-wide cache. Invalid
/// patterns yield `None`; a poisoned cache falls back to direct
/// compilation.
fn cached_regex(pattern: &str) -> Option<Regex> {
    let cache = REGEX_CACHE.get_or_init(|| {
        let capacity = NonZeroUsize::new(REGEX_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Mutex::new(LruCache::new(capacity))
    });

    match cache.lock() {
        Ok(mut cache) => {
            if let Some(regex) = cache.get(pattern) {
                return Some(regex.clone());
            }
            let regex = Regex::new(pattern).ok()?;
            cache.put(pattern.to_string(), regex.clone());
            Some(regex)
        }
        Err(_) => Regex::new(pattern).ok(),
    }
}

impl Filter {
    /// Builds a filter from a JSON-shaped tree.
    ///
    /// Object keys beginning with `$` are operators; other keys are
    /// path clauses whose operand is a literal (scalar), a literal
    /// array (deep equality), or a nested filter (object). A
    /// `$regexp`/`$regex` operand is a pattern string.
    ///
    /// Parsing is total. A structurally malformed operand (`$in`
    /// without an array, an unusable pattern) becomes a clause that
    /// never matches; an operator name nothing here recognizes is
    /// skipped, and a non-object filter value yields the empty filter.
    pub fn parse(filter: &Value) -> Filter {
        let Value::Object(map) = filter else {
            return Filter::empty();
        };

        let mut clauses = Vec::with_capacity(map.len());
        for (key, operand) in map {
            if key.starts_with('$') {
                if let Some(op) = parse_operator(key, operand) {
                    clauses.push(Clause::Operator(op));
                }
            } else {
                clauses.push(Clause::Path {
                    path: key.clone(),
                    expect: parse_expect(operand),
                });
            }
        }

        Filter::Clauses(clauses)
    }
}

fn parse_expect(operand: &Value) -> Expect {
    match operand {
        Value::Array(items) => Expect::Array(items.clone()),
        Value::Object(_) => Expect::Nested(Box::new(Filter::parse(operand))),
        other => Expect::Literal(Match::Value(other.clone())),
    }
}

fn parse_operator(name: &str, operand: &Value) -> Option<Operator> {
    let op = match name {
        "$eq" => Operator::Eq(operand.clone()),
        "$ne" => Operator::Ne(operand.clone()),
        "$like" => Operator::Like(Match::Value(operand.clone())),
        "$regexp" | "$regex" => Operator::Regexp(
            operand.as_str().and_then(cached_regex),
        ),
        "$gt" => Operator::Gt(operand.clone()),
        "$gte" => Operator::Gte(operand.clone()),
        "$lt" => Operator::Lt(operand.clone()),
        "$lte" => Operator::Lte(operand.clone()),
        "$in" => match operand.as_array() {
            Some(items) => Operator::In(items.clone()),
            None => Operator::Never,
        },
        "$nin" => match operand.as_array() {
            Some(items) => Operator::Nin(items.clone()),
            None => Operator::Never,
        },
        "$and" => sub_filters(operand).map(Operator::And).unwrap_or(Operator::Never),
        "$or" => sub_filters(operand).map(Operator::Or).unwrap_or(Operator::Never),
        "$nor" => sub_filters(operand).map(Operator::Nor).unwrap_or(Operator::Never),
        "$not" => Operator::Not(Box::new(Filter::parse(operand))),
        "$type" => match operand.as_str() {
            Some(name) => Operator::Type(name.to_string()),
            None => Operator::Never,
        },
        "$exists" => Operator::Exists,
        "$size" => match operand.as_u64() {
            Some(n) => Operator::Size(n as usize),
            None => Operator::Never,
        },
        "$elemMatch" => Operator::ElemMatch(Box::new(Filter::parse(operand))),
        "$all" => Operator::All(Box::new(Filter::parse(operand))),
        "$mod" => match operand.as_i64() {
            Some(divisor) if divisor != 0 => Operator::Mod(divisor),
            _ => Operator::Never,
        },
        // Functions cannot ride in a JSON tree; $where filters are
        // built with Filter::from_fn or Operator::Where directly.
        "$where" => Operator::Never,
        _ => return None,
    };

    Some(op)
}

fn sub_filters(operand: &Value) -> Option<Vec<Filter>> {
    let items = operand.as_array()?;
    Some(items.iter().map(Filter::parse).collect())
}
