//! Name-join index shared by the id passes

use super::PassStats;
use crate::error::{Error, Result};
use crate::model::{Id, Record};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Join key -> candidate ids, candidates in collection order
#[derive(Debug)]
pub(crate) struct JoinIndex<K> {
    map: HashMap<K, Vec<Id>>,
}

impl<K: Eq + Hash + Debug> JoinIndex<K> {
    /// Index `items` by `key`; items whose key is `None` are left out
    pub fn build<'a, T: Record + 'a>(
        items: impl IntoIterator<Item = &'a T>,
        key: impl Fn(&T) -> Option<K>,
    ) -> Self {
        let mut map: HashMap<K, Vec<Id>> = HashMap::new();
        for item in items {
            if let Some(k) = key(item) {
                map.entry(k).or_default().push(item.id());
            }
        }
        Self { map }
    }

    /// Like `build`, for keys whose construction can fail
    pub fn try_build<'a, T: Record + 'a>(
        items: impl IntoIterator<Item = &'a T>,
        key: impl Fn(&T) -> Result<Option<K>>,
    ) -> Result<Self> {
        let mut map: HashMap<K, Vec<Id>> = HashMap::new();
        for item in items {
            if let Some(k) = key(item)? {
                map.entry(k).or_default().push(item.id());
            }
        }
        Ok(Self { map })
    }

    pub fn candidates(&self, key: &K) -> &[Id] {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First candidate for `key`
    ///
    /// In strict mode more than one candidate is an `AmbiguousJoin` error.
    pub fn lookup(&self, key: &K, strict: bool, pass: &'static str, record: &str) -> Result<Option<Id>> {
        match self.candidates(key) {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            [first, ..] if !strict => {
                tracing::debug!(pass, record, key = ?key, "ambiguous join, taking first candidate");
                Ok(Some(*first))
            }
            many => Err(Error::AmbiguousJoin {
                pass,
                record: record.to_string(),
                key: format!("{:?}", key),
                count: many.len(),
            }),
        }
    }

    /// Resolve a link on every record of `items`
    ///
    /// `key` returns `None` for records with nothing to join (blank names);
    /// those are neither touched nor unresolved. A failed lookup leaves the
    /// link as it is and is logged.
    pub fn resolve_into<T: Record>(
        &self,
        items: &mut [T],
        pass: &'static str,
        strict: bool,
        stats: &mut PassStats,
        key: impl Fn(&T) -> Result<Option<K>>,
        mut set: impl FnMut(&mut T, Id),
    ) -> Result<()> {
        for item in items.iter_mut() {
            let Some(k) = key(item)? else {
                continue;
            };
            match self.lookup(&k, strict, pass, item.description())? {
                Some(id) => {
                    set(item, id);
                    stats.touched += 1;
                    tracing::debug!(pass, record = item.description(), id, "wired up link");
                }
                None => {
                    stats.unresolved += 1;
                    tracing::warn!(pass, record = item.description(), key = ?k, "failed to wire up link");
                }
            }
        }
        Ok(())
    }
}

/// `Some(text)` unless the text is blank
pub(crate) fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    fn status(id: Id, name: &str) -> Status {
        Status {
            id,
            description: name.to_string(),
            common_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_first_candidate_when_lenient() {
        let statuses = vec![status(1, "Haste"), status(2, "Haste"), status(3, "Protect")];
        let index = JoinIndex::build(&statuses, |s| Some(s.common_name.clone()));

        assert_eq!(index.candidates(&"Haste".to_string()), &[1, 2]);
        assert_eq!(index.lookup(&"Haste".to_string(), false, "test", "r").unwrap(), Some(1));
        assert_eq!(index.lookup(&"Shell".to_string(), false, "test", "r").unwrap(), None);
    }

    #[test]
    fn test_lookup_ambiguous_when_strict() {
        let statuses = vec![status(1, "Haste"), status(2, "Haste")];
        let index = JoinIndex::build(&statuses, |s| Some(s.common_name.clone()));

        let err = index.lookup(&"Haste".to_string(), true, "test", "Braver").unwrap_err();
        assert!(matches!(err, Error::AmbiguousJoin { count: 2, ref record, .. } if record == "Braver"));
        assert!(err.to_string().contains("'test'"));
    }

    #[test]
    fn test_resolve_into_counts() {
        let targets = vec![status(1, "Haste")];
        let index = JoinIndex::build(&targets, |s| Some(s.common_name.clone()));
        let mut records = vec![status(10, "Haste"), status(11, "Shell"), status(12, "  ")];
        let mut stats = PassStats::new("test");

        index
            .resolve_into(
                &mut records,
                "test",
                false,
                &mut stats,
                |s| Ok(non_blank(&s.common_name)),
                |s, id| s.default_duration = id as i64,
            )
            .unwrap();

        assert_eq!(stats.touched, 1);
        assert_eq!(stats.unresolved, 1);
        assert_eq!(records[0].default_duration, 1);
        assert_eq!(records[1].default_duration, 0);
    }
}
