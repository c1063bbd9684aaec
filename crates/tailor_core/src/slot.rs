/// Single-slot in-flight marker: at most one operation of a kind may hold it.
///
/// Operations are identified by a monotonically increasing id so that late
/// completions for an id that no longer holds the slot can be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InFlightSlot {
    holder: Option<u64>,
    last_issued: u64,
}

impl InFlightSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.holder.is_some()
    }

    pub fn holder(&self) -> Option<u64> {
        self.holder
    }

    /// Issues a fresh id and occupies the slot, or returns `None` if the slot
    /// is already taken.
    pub fn try_acquire(&mut self) -> Option<u64> {
        if self.holder.is_some() {
            return None;
        }
        self.last_issued += 1;
        self.holder = Some(self.last_issued);
        Some(self.last_issued)
    }

    /// Frees the slot if `id` currently holds it.
    pub fn release(&mut self, id: u64) -> bool {
        if self.holder == Some(id) {
            self.holder = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InFlightSlot;

    #[test]
    fn second_acquire_fails_until_release() {
        let mut slot = InFlightSlot::new();
        let first = slot.try_acquire().unwrap();
        assert!(slot.is_busy());
        assert_eq!(slot.try_acquire(), None);
        assert!(!slot.release(first + 1));
        assert!(slot.release(first));
        assert!(!slot.is_busy());
        let second = slot.try_acquire().unwrap();
        assert!(second > first);
    }
}
