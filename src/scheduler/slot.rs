use std::collections::{HashMap, VecDeque};

use super::admission::Admission;

/// Ticket identifying one accepted submission.
pub(super) type Ticket = u64;

/// Result of [`SlotTable::admit`].
pub(super) struct Admitted<T> {
    /// Ticket of the accepted submission (`None` if it was dropped).
    pub ticket: Option<Ticket>,
    /// Pending entries evicted by `Admission::Replace`, or the rejected
    /// submission under `Admission::DropIfPending`.
    pub evicted: Vec<T>,
}

/// Pending submissions grouped by slot, FIFO within a slot.
///
/// Tickets increase monotonically across all slots.
pub(super) struct SlotTable<T> {
    slots: HashMap<String, VecDeque<(Ticket, T)>>,
    next: Ticket,
}

impl<T> SlotTable<T> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next: 0,
        }
    }

    /// Applies `policy` to a new submission under `slot`.
    pub fn admit(&mut self, slot: &str, policy: Admission, value: T) -> Admitted<T> {
        let queue = self.slots.entry(slot.to_string()).or_default();

        let evicted = match policy {
            Admission::DropIfPending if !queue.is_empty() => {
                return Admitted {
                    ticket: None,
                    evicted: vec![value],
                };
            }
            Admission::Replace => queue.drain(..).map(|(_, v)| v).collect(),
            Admission::Queue | Admission::DropIfPending => Vec::new(),
        };

        self.next += 1;
        let ticket = self.next;
        queue.push_back((ticket, value));

        Admitted {
            ticket: Some(ticket),
            evicted,
        }
    }

    /// Removes the entry with `ticket`; `None` if it was cancelled or replaced.
    pub fn take(&mut self, slot: &str, ticket: Ticket) -> Option<T> {
        let queue = self.slots.get_mut(slot)?;
        let pos = queue.iter().position(|(t, _)| *t == ticket)?;
        queue.remove(pos).map(|(_, v)| v)
    }

    /// Removes every pending entry of `slot`.
    pub fn cancel(&mut self, slot: &str) -> Vec<T> {
        self.slots
            .remove(slot)
            .map(|q| q.into_iter().map(|(_, v)| v).collect())
            .unwrap_or_default()
    }

    /// Drops the slot entry once nothing is pending.
    pub fn release(&mut self, slot: &str) {
        if self.slots.get(slot).is_some_and(VecDeque::is_empty) {
            self.slots.remove(slot);
        }
    }

    /// Removes and returns every entry matching `pred`, ordered by ticket.
    pub fn drain_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<(String, Ticket, T)> {
        let mut out = Vec::new();
        for (slot, queue) in self.slots.iter_mut() {
            let mut kept = VecDeque::with_capacity(queue.len());
            for (ticket, value) in queue.drain(..) {
                if pred(&value) {
                    out.push((slot.clone(), ticket, value));
                } else {
                    kept.push_back((ticket, value));
                }
            }
            *queue = kept;
        }
        out.sort_by_key(|(_, ticket, _)| *ticket);
        out
    }

    /// Number of pending entries under `slot`.
    pub fn pending(&self, slot: &str) -> usize {
        self.slots.get(slot).map_or(0, VecDeque::len)
    }

    /// Number of pending entries across all slots.
    pub fn len(&self) -> usize {
        self.slots.values().map(VecDeque::len).sum()
    }

    #[cfg(test)]
    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    /// Number of slot entries, empty ones included.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_evicts_pending() {
        let mut t = SlotTable::new();
        let first = t.admit("s", Admission::Replace, "a");
        assert!(first.evicted.is_empty());

        let second = t.admit("s", Admission::Replace, "b");
        assert_eq!(second.evicted, vec!["a"]);
        assert_eq!(t.pending("s"), 1);

        assert_eq!(first.ticket.and_then(|tk| t.take("s", tk)), None);
        assert_eq!(second.ticket.and_then(|tk| t.take("s", tk)), Some("b"));
    }

    #[test]
    fn test_queue_keeps_all() {
        let mut t = SlotTable::new();
        t.admit("s", Admission::Queue, 1);
        t.admit("s", Admission::Queue, 2);
        assert_eq!(t.pending("s"), 2);
    }

    #[test]
    fn test_drop_if_pending() {
        let mut t = SlotTable::new();
        assert!(t.admit("s", Admission::DropIfPending, 1).ticket.is_some());
        let rejected = t.admit("s", Admission::DropIfPending, 2);
        assert!(rejected.ticket.is_none());
        assert_eq!(rejected.evicted, vec![2]);
        assert!(t.admit("other", Admission::DropIfPending, 3).ticket.is_some());
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_release_only_when_empty() {
        let mut t = SlotTable::new();
        let tk = t.admit("s", Admission::Queue, 1).ticket;
        t.admit("s", Admission::Queue, 2);

        assert_eq!(tk.and_then(|tk| t.take("s", tk)), Some(1));
        t.release("s");
        assert!(t.contains("s"));

        assert_eq!(t.cancel("s"), vec![2]);
        assert!(!t.contains("s"));
    }

    #[test]
    fn test_drain_where_is_ticket_ordered() {
        let mut t = SlotTable::new();
        t.admit("b", Admission::Queue, 1);
        t.admit("a", Admission::Queue, 2);
        t.admit("b", Admission::Queue, 3);

        let drained: Vec<i32> = t.drain_where(|v| *v != 2).into_iter().map(|(_, _, v)| v).collect();
        assert_eq!(drained, vec![1, 3]);
        assert_eq!(t.len(), 1);
    }
}
