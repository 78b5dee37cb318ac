use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func},
};

/// Case-insensitive substring match of `keyword` against any of `columns`.
///
/// Renders as `LOWER(table.col) LIKE '%keyword%' OR ...`, which behaves the
/// same on PostgreSQL, MySQL and SQLite regardless of collation.
pub fn contains_ignore_case<C, I>(columns: I, keyword: &str) -> Condition
where
    C: ColumnTrait,
    I: IntoIterator<Item = C>,
{
    let pattern = format!("%{}%", keyword.to_lowercase());
    columns.into_iter().fold(Condition::any(), |cond, column| {
        cond.add(Expr::expr(Func::lower(Expr::col(column.as_column_ref()))).like(pattern.clone()))
    })
}
