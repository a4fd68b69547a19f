use crate::http::*;
use crate::{tui, Result, SpiderError};
use serde::de::DeserializeOwned;
use sqlx::query_builder::Separated;
use sqlx::{QueryBuilder, Sqlite};
use std::path::Path;
use tracing::{debug, error, info, trace};

/// Rows per `INSERT` statement.
pub const BATCH_SIZE: usize = 100;

/// A CSV row type that maps onto one database table.
pub trait Table: DeserializeOwned {
    /// Target table.
    const NAME: &'static str;

    /// Inserted columns, in the order [`Table::bind`] pushes values.
    const COLUMNS: &'static [&'static str];

    /// Push this row's values, one per column.
    fn bind<'args>(self, row: Separated<'_, 'args, Sqlite, &'static str>);
}

/// Outcome of loading one CSV file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub table: &'static str,
    pub rows: usize,

    /// Size of every batch, in submission order.
    pub batches: Vec<usize>,
}

/// Stream rows of `T` from the CSV at `path` into `T::NAME`, [`BATCH_SIZE`] rows per insert.
///
/// Each batch is awaited before the next row is read, so a rejected batch always surfaces as
/// [`SpiderError::Insert`] and stops the load. Batches already inserted are kept.
pub async fn load_csv<T: Table>(conn: &mut DbConn, path: &Path, tui: bool) -> Result<LoadReport> {
    let time = std::time::Instant::now();
    debug!("loading {} into {}", path.display(), T::NAME);

    let csv_err = |source: csv::Error| {
        error!("failed to parse {}, error({source})", path.display());
        SpiderError::Csv {
            path: path.to_path_buf(),
            source,
        }
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;

    let pb = tui::count_spinner(format!("loading {} ...", T::NAME), "rows", tui)?;
    let mut report = LoadReport {
        table: T::NAME,
        rows: 0,
        batches: vec![],
    };
    let mut batch: Vec<T> = Vec::with_capacity(BATCH_SIZE);

    for record in reader.deserialize::<T>() {
        batch.push(record.map_err(csv_err)?);
        if batch.len() == BATCH_SIZE {
            insert_batch(conn, &mut batch, &mut report).await?;
            pb.set_position(report.rows as u64);
        }
    }

    // the remainder
    if !batch.is_empty() {
        insert_batch(conn, &mut batch, &mut report).await?;
        pb.set_position(report.rows as u64);
    }

    pb.finish_and_clear();
    info!(
        "{} rows loaded into {} in {} batches, {}",
        report.rows,
        T::NAME,
        report.batches.len(),
        crate::time_elapsed(time)
    );

    if tui {
        println!("loading {} ... done", T::NAME);
    }

    Ok(report)
}

// Insert (and drain) `batch` as one multi-row INSERT.
async fn insert_batch<T: Table>(
    conn: &mut DbConn,
    batch: &mut Vec<T>,
    report: &mut LoadReport,
) -> Result<()> {
    let index = report.batches.len();
    let size = batch.len();

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        T::NAME,
        T::COLUMNS.join(", ")
    ));
    query.push_values(batch.drain(..), |row, record| record.bind(row));

    query.build().execute(&mut *conn).await.map_err(|source| {
        error!("batch {index} ({size} rows) into {} rejected, error({source})", T::NAME);
        SpiderError::Insert {
            table: T::NAME,
            batch: index,
            source,
        }
    })?;

    trace!("batch {index} ({size} rows) inserted into {}", T::NAME);
    report.rows += size;
    report.batches.push(size);
    Ok(())
}
