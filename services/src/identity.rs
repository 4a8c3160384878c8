/// An administrator whose credentials were checked at the HTTP boundary.
///
/// Services that mutate shared content take one of these explicitly instead of reading
/// ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminIdentity {
    id: i64,
}

impl AdminIdentity {
    pub fn verified(id: i64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}
