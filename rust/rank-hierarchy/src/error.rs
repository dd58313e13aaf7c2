use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug)]
pub enum RankHierarchyError {
    /// A hierarchy was built from a description with no groups in it
    #[error("Hierarchy description is empty")]
    EmptyDescription,

    /// An extension operation was called without anything to register
    #[error("Nothing to register in '{operation}'")]
    EmptyPayload {
        /// The extension operation that was called
        operation: &'static str,
    },

    /// A plugin bundle with no members was installed
    #[error("Plugin '{plugin}' has no capabilities")]
    EmptyPlugin {
        /// Name of the empty bundle
        plugin: String,
    },

    /// A hierarchy-scoped extension operation named a group that does not
    /// exist in the hierarchy
    #[error("Unknown group '{group}'")]
    UnknownGroup {
        /// The requested group name
        group: String,
    },

    /// A capability was performed by a group that does not hold it
    #[error("Group '{group}' cannot '{capability}'")]
    NotCapable {
        /// The acting group
        group: String,
        /// The capability that was requested
        capability: String,
    },

    /// The operation exists in the interface but is not implemented
    #[error("'{operation}' is not implemented")]
    Unimplemented {
        /// The operation that was called
        operation: &'static str,
    },

    /// A hierarchy description could not be parsed
    #[error("Invalid hierarchy configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias for results produced by this crate
pub type Result<T> = std::result::Result<T, RankHierarchyError>;
