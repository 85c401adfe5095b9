use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Gte,
    Lt,
    Lte,
}

impl Op {
    fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: Op,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

/// A filtered, ordered read (or the row selection of an update/delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    filters: Vec<Filter>,
    order: Vec<OrderBy>,
    limit: Option<usize>,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn eq(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, Op::Eq, value)
    }

    pub fn gte(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, Op::Gte, value)
    }

    pub fn lt(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, Op::Lt, value)
    }

    pub fn lte(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, Op::Lte, value)
    }

    pub fn filter(mut self, column: &str, op: Op, value: impl fmt::Display) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op,
            value: value.to_string(),
        });
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order.push(OrderBy {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn ordering(&self) -> &[OrderBy] {
        &self.order
    }

    pub fn max_rows(&self) -> Option<usize> {
        self.limit
    }

    /// Whether `row` satisfies every filter. A missing or null column never matches.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| {
            row.get(&f.column)
                .and_then(|cell| compare_to_literal(cell, &f.value))
                .is_some_and(|ordering| f.op.accepts(ordering))
        })
    }

    /// Sort `rows` by the query's order clauses. Nulls sort last.
    pub fn sort(&self, rows: &mut [Value]) {
        if self.order.is_empty() {
            return;
        }
        rows.sort_by(|a, b| {
            for clause in &self.order {
                let left = a.get(&clause.column).unwrap_or(&Value::Null);
                let right = b.get(&clause.column).unwrap_or(&Value::Null);
                let ordering = match (left.is_null(), right.is_null()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => return Ordering::Greater,
                    (false, true) => return Ordering::Less,
                    (false, false) => compare_cells(left, right),
                };
                let ordering = if clause.ascending {
                    ordering
                } else {
                    ordering.reverse()
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
    }

    /// Query-string pairs in PostgREST syntax, e.g. `("empresa_id", "eq.<id>")`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        for f in &self.filters {
            pairs.push((f.column.clone(), format!("{}.{}", f.op.as_str(), f.value)));
        }
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("order".to_string(), order));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

fn compare_to_literal(cell: &Value, literal: &str) -> Option<Ordering> {
    match cell {
        Value::Null => None,
        Value::Bool(b) => literal.parse::<bool>().ok().map(|l| b.cmp(&l)),
        Value::Number(n) => {
            let l = literal.parse::<f64>().ok()?;
            n.as_f64()?.partial_cmp(&l)
        }
        Value::String(s) => Some(compare_text(s, literal)),
        Value::Array(_) | Value::Object(_) => Some(cell.to_string().as_str().cmp(literal)),
    }
}

fn compare_cells(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l
            .as_f64()
            .zip(r.as_f64())
            .and_then(|(l, r)| l.partial_cmp(&r))
            .unwrap_or(Ordering::Equal),
        (Value::String(l), Value::String(r)) => compare_text(l, r),
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        _ => left.to_string().cmp(&right.to_string()),
    }
}

/// Timestamps compare as instants so differing offsets order correctly.
fn compare_text(left: &str, right: &str) -> Ordering {
    if let (Ok(l), Ok(r)) = (left.parse::<jiff::Timestamp>(), right.parse::<jiff::Timestamp>()) {
        return l.cmp(&r);
    }
    left.cmp(right)
}
