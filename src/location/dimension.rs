//! Dimension identifiers
//!
//! The wire protocol conveys a coarse signed dimension id in login and
//! respawn frames. Only the three classic dimensions are recognized; any
//! other id maps to "unknown" rather than an error, since servers are free
//! to invent ids this subsystem has never heard of.

/// A recognized world dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Nether,
    Overworld,
    End,
}

impl Dimension {
    /// Map a wire dimension id to a dimension
    ///
    /// Unknown ids return `None`.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            -1 => Some(Dimension::Nether),
            0 => Some(Dimension::Overworld),
            1 => Some(Dimension::End),
            _ => None,
        }
    }

    /// The wire id of this dimension
    pub fn id(self) -> i32 {
        match self {
            Dimension::Nether => -1,
            Dimension::Overworld => 0,
            Dimension::End => 1,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Nether => write!(f, "nether"),
            Dimension::Overworld => write!(f, "overworld"),
            Dimension::End => write!(f, "end"),
        }
    }
}
