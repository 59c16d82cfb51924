use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::eval;

/// A caller-supplied test over a resolved document location. The
/// location is `None` when the path the predicate was applied to does
/// not resolve.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>);

impl Predicate {
    pub fn new(test: impl Fn(Option<&Value>) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(test))
    }

    pub fn test(&self, value: Option<&Value>) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// An equality operand: a literal value, or a regular expression that
/// string values are tested against.
#[derive(Debug, Clone)]
pub enum Match {
    Value(Value),
    Regex(Regex),
}

/// A filter: either a bare predicate function, or an ordered clause
/// list that must hold in full.
#[derive(Debug, Clone)]
pub enum Filter {
    Where(Predicate),
    Clauses(Vec<Clause>),
}

/// One clause of a filter.
#[derive(Debug, Clone)]
pub enum Clause {
    /// A `$`-operator applied to the value under test.
    Operator(Operator),
    /// A plain (possibly dotted) path key with an expectation on the
    /// resolved value.
    Path { path: String, expect: Expect },
}

/// What a path clause expects of the resolved value.
#[derive(Debug, Clone)]
pub enum Expect {
    /// Scalar equality; a regex operand tests string values.
    Literal(Match),
    /// Deep equality against a literal array.
    Array(Vec<Value>),
    /// A nested sub-filter applied to the resolved value.
    Nested(Box<Filter>),
}

/// The operator table. Each variant carries its operand; dispatch is a
/// single match in the evaluator.
///
/// `Size` and `ElemMatch` are terminal: their result is returned
/// immediately and sibling clauses at the same level are skipped. That
/// is a preserved quirk of the semantics this engine implements, not an
/// optimization.
#[derive(Debug, Clone)]
pub enum Operator {
    Eq(Value),
    Ne(Value),
    /// Equality with regex support, like a path clause's literal test.
    Like(Match),
    /// Regex test over string values. `None` records an operand that
    /// was not a usable pattern; it never matches.
    Regexp(Option<Regex>),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Nor(Vec<Filter>),
    Not(Box<Filter>),
    /// Type-name check: `"string"`, `"number"`, `"boolean"`,
    /// `"object"` (null, arrays and objects alike), `"undefined"`.
    Type(String),
    /// The value resolves at all. The operand, if any, is irrelevant.
    Exists,
    /// Terminal: array length or object key count equals the operand.
    Size(usize),
    /// Terminal: some element of an array value matches the sub-filter.
    ElemMatch(Box<Filter>),
    /// Every element of an array value matches the sub-filter.
    All(Box<Filter>),
    /// The value is a number divisible by the operand.
    Mod(i64),
    /// Caller-supplied predicate over the value.
    Where(Predicate),
    /// A structurally malformed operand. Never matches.
    Never,
}

impl Filter {
    /// A filter with no clauses; matches every value.
    pub fn empty() -> Self {
        Filter::Clauses(Vec::new())
    }

    /// Wraps a bare predicate function as a filter.
    pub fn from_fn(test: impl Fn(Option<&Value>) -> bool + Send + Sync + 'static) -> Self {
        Filter::Where(Predicate::new(test))
    }

    /// Tests a document against this filter. Equivalent to
    /// [`query`](crate::query)`(value, self)`.
    pub fn matches(&self, value: &Value) -> bool {
        eval::query(value, self)
    }

    /// Appends a clause, keeping construction order.
    pub fn with(mut self, clause: Clause) -> Self {
        match &mut self {
            Filter::Clauses(clauses) => clauses.push(clause),
            Filter::Where(_) => {}
        }
        self
    }
}

impl Clause {
    pub fn operator(op: Operator) -> Self {
        Clause::Operator(op)
    }

    pub fn path(path: impl Into<String>, expect: Expect) -> Self {
        Clause::Path {
            path: path.into(),
            expect,
        }
    }
}
