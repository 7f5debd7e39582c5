use serde::{Deserialize, Serialize};

/// One accepted command. Ids start at 1 and increase by one per append.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event<K> {
    pub id: u64,
    pub kind: K,
    pub description: String,
}

/// Append-only in-memory record of mutations applied to a view-state
/// container. State is never read back from here except by replay.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventLog<K> {
    events: Vec<Event<K>>,
}

impl<K> Default for EventLog<K> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<K: Clone> EventLog<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, kind: K, description: impl Into<String>) -> u64 {
        let id = self.latest_event_id().unwrap_or(0) + 1;
        self.events.push(Event {
            id,
            kind,
            description: description.into(),
        });
        id
    }

    pub fn events(&self) -> &[Event<K>] {
        &self.events
    }

    pub fn latest_event_id(&self) -> Option<u64> {
        self.events.last().map(|e| e.id)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &K> + '_ {
        self.events.iter().map(|e| &e.kind)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Kind {
        Opened,
        Closed,
    }

    #[test]
    fn append_assigns_dense_ids() {
        let mut log = EventLog::new();
        let a = log.append(Kind::Opened, "opened");
        let b = log.append(Kind::Closed, "closed");

        assert_eq!((a, b), (1, 2));
        assert_eq!(log.latest_event_id(), Some(2));
        assert_eq!(log.events()[1].description, "closed");
    }

    #[test]
    fn kinds_iterate_in_append_order() {
        let mut log = EventLog::new();
        log.append(Kind::Closed, "b");
        log.append(Kind::Opened, "a");

        let kinds: Vec<_> = log.kinds().cloned().collect();
        assert_eq!(kinds, vec![Kind::Closed, Kind::Opened]);
    }

    #[test]
    fn empty_log_has_no_latest_id() {
        let log: EventLog<Kind> = EventLog::new();
        assert!(log.is_empty());
        assert_eq!(log.latest_event_id(), None);
        assert_eq!(log.kinds().count(), 0);
    }
}
