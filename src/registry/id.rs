/// Monotonic identity source, injected at construction so fixtures get
/// deterministic ids.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Starts counting at 1; 0 is reserved for not-yet-assigned identities.
    pub fn new() -> Self { Self { next: 0 } }

    /// Returns the next identity, never repeating within one generator.
    pub fn next_id(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}
