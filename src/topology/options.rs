//! Construction-time configuration for [`Connectivity`](super::Connectivity).

/// What `declare_cell` registers besides the cell itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubEntityPolicy {
    /// Register only the cell; sub-entities appear on the first query that needs them.
    #[default]
    Lazy,
    /// Register every sub-entity of dimension `0 < d < D` as each new cell arrives.
    Eager,
}

/// Optional behaviour toggles for the connectivity engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectivityOptions {
    pub sub_entity_policy: SubEntityPolicy,
}

impl ConnectivityOptions {
    /// Register sub-entities eagerly.
    pub fn eager() -> Self {
        Self {
            sub_entity_policy: SubEntityPolicy::Eager,
        }
    }
}
