//! SQL emitter
//!
//! Transforms a SelectQuery into an ANSI SQL string. Emission is pure and
//! deterministic: the same query always renders to the same text, which is
//! what query fingerprints rely on.

use crate::plan::{
    AggregateExpr, Aggregation, Column, Expr, Literal, SelectItem, SelectQuery, SortDirection,
};

/// Emit a pretty-printed SQL string from a SelectQuery.
///
/// Each SELECT item and each WHERE condition gets its own line; conditions
/// are AND-joined.
pub fn emit_sql(query: &SelectQuery) -> String {
    let mut lines: Vec<String> = Vec::new();

    if query.projection.is_empty() {
        lines.push("SELECT *".to_string());
    } else {
        lines.push("SELECT".to_string());
        let last = query.projection.len() - 1;
        for (i, item) in query.projection.iter().enumerate() {
            let sep = if i < last { "," } else { "" };
            lines.push(format!("{}{}{}", pad(1), emit_select_item(item), sep));
        }
    }

    lines.push(format!("FROM {}", query.source.name()));

    if !query.predicates.is_empty() {
        lines.push("WHERE".to_string());
        for (i, predicate) in query.predicates.iter().enumerate() {
            let keyword = if i == 0 { "" } else { "AND " };
            lines.push(format!("{}{}{}", pad(1), keyword, emit_expr(predicate)));
        }
    }

    lines.extend(emit_tail(query));
    lines.join("\n")
}

/// Emit a query on a single line (used for subqueries)
pub fn emit_inline(query: &SelectQuery) -> String {
    let mut parts: Vec<String> = Vec::new();

    if query.projection.is_empty() {
        parts.push("SELECT *".to_string());
    } else {
        let items: Vec<String> = query.projection.iter().map(emit_select_item).collect();
        parts.push(format!("SELECT {}", items.join(", ")));
    }

    parts.push(format!("FROM {}", query.source.name()));

    if !query.predicates.is_empty() {
        let conds: Vec<String> = query.predicates.iter().map(emit_expr).collect();
        parts.push(format!("WHERE {}", conds.join(" AND ")));
    }

    parts.extend(emit_tail(query));
    parts.join(" ")
}

/// Emit an expression as a standalone condition, without outer parentheses
pub fn emit_predicate(expr: &Expr) -> String {
    match expr {
        Expr::And(exprs) if !exprs.is_empty() => join_exprs(exprs, " AND "),
        Expr::Or(exprs) if !exprs.is_empty() => join_exprs(exprs, " OR "),
        other => emit_expr(other),
    }
}

/// True for names that can be written into SQL unquoted
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn pad(indent: usize) -> String {
    "  ".repeat(indent)
}

fn emit_tail(query: &SelectQuery) -> Vec<String> {
    let mut parts = Vec::new();

    if !query.group_by.is_empty() {
        let cols: Vec<String> = query.group_by.iter().map(emit_column).collect();
        parts.push(format!("GROUP BY {}", cols.join(", ")));
    }

    if !query.order_by.is_empty() {
        let keys: Vec<String> = query
            .order_by
            .iter()
            .map(|k| {
                let dir = match k.direction {
                    SortDirection::Ascending => "ASC",
                    SortDirection::Descending => "DESC",
                };
                format!("{} {}", quote_identifier(&k.column), dir)
            })
            .collect();
        parts.push(format!("ORDER BY {}", keys.join(", ")));
    }

    if let Some(limit) = query.limit {
        parts.push(format!("LIMIT {}", limit));
    }

    parts
}

fn emit_select_item(item: &SelectItem) -> String {
    let expr = emit_expr(&item.expr);
    match &item.alias {
        Some(alias) => format!("{} AS {}", expr, quote_alias(alias)),
        None => expr,
    }
}

fn quote_alias(alias: &str) -> String {
    format!("\"{}\"", alias.replace('"', "\"\""))
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// Emit an expression; AND/OR groups are parenthesized
pub fn emit_expr(expr: &Expr) -> String {
    match expr {
        Expr::Column(col) => emit_column(col),
        Expr::Literal(lit) => emit_literal(lit),
        Expr::BinaryOp { left, op, right } => {
            format!("{} {} {}", emit_expr(left), op.as_str(), emit_expr(right))
        }
        Expr::In { expr, values } => {
            let vals: Vec<String> = values.iter().map(emit_expr).collect();
            format!("{} IN ({})", emit_expr(expr), vals.join(", "))
        }
        Expr::Between { expr, low, high } => format!(
            "{} BETWEEN {} AND {}",
            emit_expr(expr),
            emit_expr(low),
            emit_expr(high)
        ),
        Expr::And(exprs) => {
            if exprs.is_empty() {
                return "TRUE".to_string();
            }
            format!("({})", join_exprs(exprs, " AND "))
        }
        Expr::Or(exprs) => {
            if exprs.is_empty() {
                return "FALSE".to_string();
            }
            format!("({})", join_exprs(exprs, " OR "))
        }
        Expr::IsNull(inner) => format!("{} IS NULL", emit_expr(inner)),
        Expr::IsNotNull(inner) => format!("{} IS NOT NULL", emit_expr(inner)),
        Expr::Divide(a, b) => format!(
            "(CAST({} AS DOUBLE) / CAST({} AS DOUBLE))",
            emit_expr(a),
            emit_expr(b),
        ),
        Expr::Cast(inner, to) => format!("CAST({} AS {})", emit_expr(inner), to.as_str()),
        Expr::Aggregate(agg) => emit_aggregate_expr(agg),
        Expr::Subquery(query) => format!("({})", emit_inline(query)),
    }
}

fn join_exprs(exprs: &[Expr], sep: &str) -> String {
    let parts: Vec<String> = exprs.iter().map(emit_expr).collect();
    parts.join(sep)
}

fn emit_column(col: &Column) -> String {
    quote_identifier(&col.name)
}

/// Write a column name so the engine resolves it exactly as spelled
///
/// Unquoted identifiers are folded to lowercase, so any name that is not a
/// lowercase plain identifier is double-quoted (`PWGTP` becomes `"PWGTP"`).
pub fn quote_identifier(name: &str) -> String {
    if is_plain_identifier(name) && !name.chars().any(|c| c.is_ascii_uppercase()) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

fn emit_literal(lit: &Literal) -> String {
    match lit {
        Literal::Null => "NULL".to_string(),
        Literal::Bool(b) => if *b { "TRUE".to_string() } else { "FALSE".to_string() },
        Literal::Int(i) => i.to_string(),
        // Debug keeps the fractional part: 63.0 stays "63.0"
        Literal::Float(f) => format!("{:?}", f),
        Literal::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

fn emit_aggregate_expr(agg: &AggregateExpr) -> String {
    let inner = match &agg.arg {
        Some(arg) => emit_expr(arg),
        None => "*".to_string(),
    };
    match agg.func {
        Aggregation::Count => format!("COUNT({})", inner),
        Aggregation::Sum => format!("SUM({})", inner),
        Aggregation::Avg => format!("AVG({})", inner),
    }
}
