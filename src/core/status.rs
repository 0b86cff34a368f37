/// Project lifecycle state as stored by the escrow contract.
///
/// The contract stores the state as a small integer. Codes outside the
/// known range are kept in `Unrecognized` so a newer contract never breaks
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Open,
    InProgress,
    InDispute,
    Completed,
    Unrecognized(u64),
}

impl ProjectStatus {
    pub fn from_code(code: u64) -> Self {
        match code {
            0 => ProjectStatus::Open,
            1 => ProjectStatus::InProgress,
            2 => ProjectStatus::InDispute,
            3 => ProjectStatus::Completed,
            other => ProjectStatus::Unrecognized(other),
        }
    }

    /// Label shown inside the badge
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "Open",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::InDispute => "In Dispute",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Unrecognized(_) => "Unknown",
        }
    }

    /// CSS classes of the badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "status open",
            ProjectStatus::InProgress => "status in-progress",
            ProjectStatus::InDispute => "status dispute",
            ProjectStatus::Completed => "status completed",
            ProjectStatus::Unrecognized(_) => "status unknown",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ProjectStatus::Open)
    }
}
