/// Run-scoped allocator for aggregate names.
///
/// One pool lives for the duration of a generation run and hands out names
/// from a single monotonically increasing counter, so every struct, table and
/// union minted within the run gets a distinct name even across unrelated
/// subtrees. There is no reset; start a new pool for a new run.
#[derive(Debug, Default)]
pub struct NamePool {
    next: u64,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn table(&mut self) -> String {
        format!("Table{}", self.fresh())
    }

    pub fn strukt(&mut self) -> String {
        format!("Struct{}", self.fresh())
    }

    pub fn union(&mut self) -> String {
        format!("Union{}", self.fresh())
    }
}
