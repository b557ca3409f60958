pub mod derive;
pub mod error;
pub mod memo;
pub mod models;
pub mod persistence;
pub mod store;
pub mod validation;

use std::io::{Read, Write};

use serde::Deserialize;
use tracing::warn;

use error::Result;
use models::{Transaction, TransactionType};
use persistence::PersistenceBackend;
use store::TransactionStore;
use validation::TransactionForm;

/// One row of an imported CSV file
#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    amount: String,
    category: String,
    date: String,
    #[serde(rename = "type")]
    tx_type: TransactionType,
}

impl From<CsvRow> for TransactionForm {
    fn from(row: CsvRow) -> Self {
        Self {
            title: row.title,
            amount: row.amount,
            category: row.category,
            date: row.date,
            tx_type: row.tx_type,
        }
    }
}

/// Add transactions read from CSV to the store
///
/// Expects a `title,amount,category,date,type` header. Rows that cannot be
/// parsed or fail validation are skipped with a warning. Returns the number
/// of transactions added.
pub fn import_transactions<R: Read, P: PersistenceBackend>(
    reader: R,
    store: &mut TransactionStore<P>,
) -> Result<usize> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.headers()?;

    let mut imported = 0;
    for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1
        let line = index + 2;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping malformed CSV row on line {}: {}", line, e);
                continue;
            }
        };

        match TransactionForm::from(row).validate() {
            Ok(form_data) => {
                store.add(form_data);
                imported += 1;
            }
            Err(e) => warn!("Skipping CSV row on line {}: {}", line, e),
        }
    }

    Ok(imported)
}

/// Write transactions as CSV with an `id,title,amount,category,date,type` header
pub fn export_transactions<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for tx in transactions {
        csv_writer.serialize(tx)?;
    }

    csv_writer.flush()?;
    Ok(())
}
