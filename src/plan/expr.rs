//! Expression types for query plans

use super::query::SelectQuery;

/// A column reference
///
/// Queries read a single source, so columns are never qualified.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Scalar expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference
    Column(Column),
    /// Literal value
    Literal(Literal),
    /// Binary comparison (e.g., a = b, a > 5)
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// IN expression (column IN (values)); never empty, see [`Expr::in_list`]
    In {
        expr: Box<Expr>,
        values: Vec<Expr>,
    },
    /// Inclusive range check
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// AND of multiple expressions
    And(Vec<Expr>),
    /// OR of multiple expressions
    Or(Vec<Expr>),
    /// IS NULL check
    IsNull(Box<Expr>),
    /// IS NOT NULL check
    IsNotNull(Box<Expr>),
    /// Division: a / b, both sides cast to DOUBLE
    Divide(Box<Expr>, Box<Expr>),
    /// CAST(expr AS type)
    Cast(Box<Expr>, SqlType),
    /// Aggregate function call
    Aggregate(AggregateExpr),
    /// Single-value subquery
    Subquery(Box<SelectQuery>),
}

impl Expr {
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(Column::new(name))
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Expr::Literal(Literal::Float(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Literal::Bool(value))
    }

    /// The always-false condition
    pub fn never() -> Self {
        Expr::bool(false)
    }

    fn binary(self, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    pub fn eq(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Eq, right)
    }

    pub fn not_eq(self, right: Expr) -> Self {
        self.binary(BinaryOperator::NotEq, right)
    }

    pub fn lt(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Lt, right)
    }

    pub fn lt_eq(self, right: Expr) -> Self {
        self.binary(BinaryOperator::LtEq, right)
    }

    pub fn gt(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Gt, right)
    }

    pub fn gt_eq(self, right: Expr) -> Self {
        self.binary(BinaryOperator::GtEq, right)
    }

    pub fn between(self, low: Expr, high: Expr) -> Self {
        Expr::Between {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
        }
    }

    pub fn is_null(self) -> Self {
        Expr::IsNull(Box::new(self))
    }

    pub fn is_not_null(self) -> Self {
        Expr::IsNotNull(Box::new(self))
    }

    pub fn cast(self, to: SqlType) -> Self {
        Expr::Cast(Box::new(self), to)
    }

    /// `self IN (values)`, or FALSE when there is nothing to match
    pub fn in_list(self, values: Vec<Expr>) -> Self {
        if values.is_empty() {
            return Expr::never();
        }
        Expr::In {
            expr: Box::new(self),
            values,
        }
    }

    /// Disjunction of two expressions
    pub fn or(self, other: Expr) -> Self {
        Expr::Or(vec![self, other])
    }

    /// Conjunction of two expressions
    pub fn and(self, other: Expr) -> Self {
        Expr::And(vec![self, other])
    }

    pub fn count_all() -> Self {
        Expr::Aggregate(AggregateExpr {
            func: Aggregation::Count,
            arg: None,
        })
    }

    pub fn sum(arg: Expr) -> Self {
        Expr::Aggregate(AggregateExpr {
            func: Aggregation::Sum,
            arg: Some(Box::new(arg)),
        })
    }

    pub fn avg(arg: Expr) -> Self {
        Expr::Aggregate(AggregateExpr {
            func: Aggregation::Avg,
            arg: Some(Box::new(arg)),
        })
    }

    pub fn divide(self, denominator: Expr) -> Self {
        Expr::Divide(Box::new(self), Box::new(denominator))
    }

    pub fn subquery(query: SelectQuery) -> Self {
        Expr::Subquery(Box::new(query))
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
        }
    }
}

/// Target types for CAST
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlType {
    Double,
    BigInt,
    Varchar,
}

impl SqlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlType::Double => "DOUBLE",
            SqlType::BigInt => "BIGINT",
            SqlType::Varchar => "VARCHAR",
        }
    }
}

/// Aggregate functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    Count,
    Sum,
    Avg,
}

/// An aggregate call; `arg: None` means `*`
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateExpr {
    pub func: Aggregation,
    pub arg: Option<Box<Expr>>,
}
