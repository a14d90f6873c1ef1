//! Cell evaluation on loaded tables.

use super::{Table, TableStore};
use csvcalc_engine::engine::{CellAddress, EvalCache};
use csvcalc_engine::Result as EvalResult;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

impl Table {
    /// Evaluate the cell at `address`, memoizing it and everything it references.
    pub fn evaluate(&mut self, address: &str) -> EvalResult<String> {
        self.cache.evaluate(&*self.store, address)
    }

    /// Evaluate every cell in load order. A failing cell does not stop the others.
    pub fn evaluate_all(&mut self) -> Vec<(CellAddress, EvalResult<String>)> {
        let addresses: Vec<CellAddress> = self.store.addresses().collect();
        addresses
            .into_iter()
            .map(|addr| {
                let result = self.evaluate(addr.as_str());
                (addr, result)
            })
            .collect()
    }

    /// Convert into a handle that can be evaluated from several threads.
    pub fn into_shared(self) -> SharedTable {
        SharedTable {
            store: self.store,
            cache: Arc::new(Mutex::new(self.cache)),
        }
    }
}

/// Thread-safe table handle.
///
/// Raw cells are read without locking. The evaluation cache sits behind one
/// mutex that is held for a whole evaluation, so two threads can never both
/// get past the in-progress check for the same cell.
#[derive(Clone, Debug)]
pub struct SharedTable {
    store: Arc<TableStore>,
    cache: Arc<Mutex<EvalCache>>,
}

impl SharedTable {
    pub fn new(store: TableStore) -> Self {
        Table::new(store).into_shared()
    }

    pub fn columns(&self) -> &[String] {
        self.store.columns()
    }

    pub fn rows(&self) -> &[String] {
        self.store.rows()
    }

    pub fn raw_at(&self, address: &str) -> EvalResult<&str> {
        self.store.raw_at(address)
    }

    pub fn evaluate(&self, address: &str) -> EvalResult<String> {
        let mut cache = self.lock_cache();
        cache.evaluate(&*self.store, address)
    }

    fn lock_cache(&self) -> MutexGuard<'_, EvalCache> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // A panic mid-evaluation may have left an in-progress sentinel behind.
                warn!("evaluation cache lock poisoned, clearing cache");
                let mut guard = poisoned.into_inner();
                guard.clear();
                self.cache.clear_poison();
                guard
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::LoadOptions;
    use crate::{EvalError, Table};

    fn table(text: &str) -> Table {
        Table::parse(text, &LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut t = table(",A,B\n1,3,=A1*2+1\n");
        let first = t.evaluate("B1");
        let second = t.evaluate("B1");
        assert_eq!(first, Ok("7".to_string()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_evaluate_all_isolates_failures() {
        let mut t = table(",A,B,C\n1,=B1,=A1,=1+1\n2,=A9,x,4\n");
        let results = t.evaluate_all();
        let failed: Vec<&str> = results
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(addr, _)| addr.as_str())
            .collect();
        assert_eq!(failed, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(results[2].1, Ok("2".to_string()));
        assert_eq!(results[5].1, Ok("4".to_string()));
    }

    #[test]
    fn test_shared_table_matches_sequential_evaluation() {
        let text = ",A,B,C\n1,1,=A1+1,=B1*2\n2,=C1+A1,=A2*A2,=B2/4\n3,=C2-1,=A3+B1,=B3*C3\n";
        let mut sequential = table(text);
        let expected: Vec<_> = sequential.evaluate_all();

        let shared = table(text).into_shared();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let shared = shared.clone();
                let expected = &expected;
                scope.spawn(move || {
                    for (addr, want) in expected.iter().rev() {
                        assert_eq!(&shared.evaluate(addr.as_str()), want);
                    }
                });
            }
        });
    }

    #[test]
    fn test_shared_table_reports_cycles() {
        let shared = table(",A,B\n1,=B1,=A1\n").into_shared();
        let err = shared.evaluate("A1").unwrap_err();
        assert_eq!(err.root(), &EvalError::CircularReference("A1".to_string()));
        assert_eq!(shared.raw_at("B1"), Ok("=A1"));
    }
}
