use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::{Transaction, TransactionFormData, TransactionId};
use crate::persistence::PersistenceBackend;

/// A mutation of the transaction collection
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(TransactionFormData),
    Edit(Transaction),
    Delete(TransactionId),
}

/// What a dispatched [`Action`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(TransactionId),
    Edited,
    Deleted,
    /// Edit or delete named an id that is not in the collection; nothing changed
    NotFound,
}

/// Single authoritative collection of transactions
///
/// Every applied mutation writes the whole collection to the persistence
/// backend afterwards. Write failures are logged and otherwise ignored: the
/// in-memory collection stays the source of truth for the session.
///
/// The store trusts its inputs. Validation happens before data gets here,
/// see [`crate::validation`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use finance_tracker::models::{TransactionFormData, TransactionType};
/// use finance_tracker::persistence::MemoryPersistence;
/// use finance_tracker::store::TransactionStore;
/// use rust_decimal_macros::dec;
///
/// let mut store = TransactionStore::open(MemoryPersistence::new());
///
/// let id = store.add(TransactionFormData {
///     title: "Salary".to_string(),
///     amount: dec!(1000),
///     category: "Salary".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
///     tx_type: TransactionType::Income,
/// });
///
/// assert_eq!(store.len(), 1);
/// assert!(store.delete(&id));
/// assert!(store.is_empty());
/// ```
pub struct TransactionStore<P: PersistenceBackend> {
    /// Canonical collection, in insertion order
    transactions: Vec<Transaction>,
    /// Durable mirror of `transactions`
    persistence: P,
    /// Bumped after every applied mutation
    revision: u64,
    /// Broadcasts `revision` to subscribers
    notifier: watch::Sender<u64>,
}

impl<P: PersistenceBackend> TransactionStore<P> {
    /// Open a store with whatever the persistence backend currently holds
    ///
    /// Stored data that cannot be read is treated as if nothing was stored.
    pub fn open(persistence: P) -> Self {
        let transactions = match persistence.load() {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!("Ignoring unreadable stored transactions: {}", e);
                Vec::new()
            }
        };

        debug!("Loaded {} transactions", transactions.len());

        let (notifier, _) = watch::channel(0);

        Self {
            transactions,
            persistence,
            revision: 0,
            notifier,
        }
    }

    /// Apply a mutation
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::Add(form_data) => Outcome::Added(self.add(form_data)),
            Action::Edit(tx) => {
                if self.edit(tx) {
                    Outcome::Edited
                } else {
                    Outcome::NotFound
                }
            }
            Action::Delete(id) => {
                if self.delete(&id) {
                    Outcome::Deleted
                } else {
                    Outcome::NotFound
                }
            }
        }
    }

    /// Append a new transaction with a freshly generated id
    pub fn add(&mut self, form_data: TransactionFormData) -> TransactionId {
        let id = TransactionId::generate();
        self.transactions.push(form_data.with_id(id.clone()));
        debug!("Added transaction {}", id);

        self.commit();
        id
    }

    /// Replace the transaction with the same id, keeping its position
    ///
    /// Returns false, and changes nothing, when no transaction has that id.
    pub fn edit(&mut self, tx: Transaction) -> bool {
        let existing = match self.transactions.iter_mut().find(|t| t.id == tx.id) {
            Some(existing) => existing,
            None => {
                debug!("Ignoring edit of unknown transaction {}", tx.id);
                return false;
            }
        };

        debug!("Edited transaction {}", tx.id);
        *existing = tx;

        self.commit();
        true
    }

    /// Remove the transaction with `id`
    ///
    /// Returns false, and changes nothing, when no transaction has that id.
    pub fn delete(&mut self, id: &TransactionId) -> bool {
        let position = match self.transactions.iter().position(|t| &t.id == id) {
            Some(position) => position,
            None => {
                debug!("Ignoring delete of unknown transaction {}", id);
                return false;
            }
        };

        self.transactions.remove(position);
        debug!("Deleted transaction {}", id);

        self.commit();
        true
    }

    /// Current collection in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Look up a transaction by id
    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of mutations applied since the store was opened
    ///
    /// Suitable as a cache key for derived values.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receive the new revision after every applied mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    /// Get a reference to the persistence backend
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Persist the collection and notify subscribers
    fn commit(&mut self) {
        if let Err(e) = self.persistence.save(&self.transactions) {
            warn!(
                "Failed to persist {} transactions, keeping in-memory state: {}",
                self.transactions.len(),
                e
            );
        }

        self.revision += 1;
        self.notifier.send_replace(self.revision);
    }
}
