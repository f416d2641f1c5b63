//! In-memory [`Sink`] for tests and dry runs.
//!
//! Tables are declared up front with their column names. Rows written to
//! them are stored in destination column order, with `Null` in columns that
//! no source column maps to. The sink also counts connections and can be
//! told to fail at a given step.

use crate::sink::{BulkWrite, Sink, SinkError, SinkErrorKind, SinkResult};
use crate::table::Row;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Step of a transfer at which an injected error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    Open,
    Columns,
    Write,
    Close,
}

#[derive(Debug, Clone, Default)]
struct MemoryTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, MemoryTable>,
    faults: HashMap<Fault, SinkError>,
    write_latency: Duration,
    open: usize,
    opened: usize,
    writes: usize,
    next_id: u64,
}

/// Handle returned by [`MemorySink::open`].
#[derive(Debug)]
pub struct MemoryConnection {
    id: u64,
    closed: bool,
}

impl MemoryConnection {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Shared, cloneable in-memory store. Clones see the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<State>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Declare (or replace) a destination table.
    pub fn create_table<I, S>(&self, name: &str, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state().tables.insert(
            name.to_string(),
            MemoryTable {
                columns: columns.into_iter().map(Into::into).collect(),
                rows: Vec::new(),
            },
        );
    }

    /// Rows stored in `name`, in destination column order.
    #[must_use]
    pub fn rows(&self, name: &str) -> Option<Vec<Row>> {
        self.state().tables.get(name).map(|t| t.rows.clone())
    }

    #[must_use]
    pub fn row_count(&self, name: &str) -> Option<usize> {
        self.state().tables.get(name).map(|t| t.rows.len())
    }

    /// Make every later call at `fault` fail with `error`.
    pub fn inject(&self, fault: Fault, error: SinkError) {
        self.state().faults.insert(fault, error);
    }

    pub fn clear_faults(&self) {
        self.state().faults.clear();
    }

    /// Simulated duration of every bulk write. A write whose latency exceeds
    /// the request's timeout fails with [`SinkErrorKind::Timeout`] and stores
    /// nothing.
    pub fn set_write_latency(&self, latency: Duration) {
        self.state().write_latency = latency;
    }

    /// Connections currently open.
    #[must_use]
    pub fn open_connections(&self) -> usize {
        self.state().open
    }

    /// Connections opened since creation.
    #[must_use]
    pub fn connections_opened(&self) -> usize {
        self.state().opened
    }

    /// Bulk writes that stored rows.
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.state().writes
    }
}

fn check_open(conn: &MemoryConnection) -> SinkResult<()> {
    if conn.closed {
        return Err(SinkError::new(
            SinkErrorKind::Connection,
            format!("connection {} is closed", conn.id),
        ));
    }
    Ok(())
}

impl Sink for MemorySink {
    type Connection = MemoryConnection;

    fn open(&self) -> SinkResult<MemoryConnection> {
        let mut state = self.state();
        if let Some(err) = state.faults.get(&Fault::Open) {
            return Err(err.clone());
        }
        state.open += 1;
        state.opened += 1;
        state.next_id += 1;
        Ok(MemoryConnection {
            id: state.next_id,
            closed: false,
        })
    }

    fn destination_columns(
        &self,
        conn: &mut MemoryConnection,
        table_name: &str,
    ) -> SinkResult<Option<Vec<String>>> {
        check_open(conn)?;
        let state = self.state();
        if let Some(err) = state.faults.get(&Fault::Columns) {
            return Err(err.clone());
        }
        Ok(state.tables.get(table_name).map(|t| t.columns.clone()))
    }

    fn bulk_write(&self, conn: &mut MemoryConnection, request: &BulkWrite<'_>) -> SinkResult<u64> {
        check_open(conn)?;
        let mut state = self.state();
        if let Some(err) = state.faults.get(&Fault::Write) {
            return Err(err.clone());
        }
        if state.write_latency > request.timeout {
            return Err(SinkError::new(
                SinkErrorKind::Timeout,
                format!(
                    "write to {} did not finish within {:?}",
                    request.destination, request.timeout
                ),
            ));
        }

        let target = state.tables.get_mut(request.table_name).ok_or_else(|| {
            SinkError::new(
                SinkErrorKind::NotFound,
                format!("invalid object name {}", request.destination),
            )
        })?;

        let mut slots = Vec::with_capacity(request.mappings.len());
        for mapping in request.mappings {
            let slot = target
                .columns
                .iter()
                .position(|c| *c == mapping.destination)
                .ok_or_else(|| {
                    SinkError::new(
                        SinkErrorKind::Rejected,
                        format!("{} has no column {}", request.destination, mapping.destination),
                    )
                })?;
            slots.push((mapping.source_index, slot));
        }

        let width = target.columns.len();
        let mut staged = Vec::with_capacity(request.table.len());
        for row in request.table.rows() {
            let mut out = vec![Value::Null; width];
            for &(source, slot) in &slots {
                let cell = row.get(source).ok_or_else(|| {
                    SinkError::new(
                        SinkErrorKind::Rejected,
                        format!("source row has no column #{source}"),
                    )
                })?;
                out[slot] = cell.clone();
            }
            staged.push(out);
        }

        let written = staged.len() as u64;
        target.rows.extend(staged);
        state.writes += 1;
        Ok(written)
    }

    fn close(&self, conn: &mut MemoryConnection) -> SinkResult<()> {
        check_open(conn)?;
        conn.closed = true;
        let mut state = self.state();
        state.open = state.open.saturating_sub(1);
        match state.faults.get(&Fault::Close) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
