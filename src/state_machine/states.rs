crate::labeled_enum! {
    /// Grant application status.
    ///
    /// The first eight variants form the main review pipeline; the rest are
    /// escape or terminal states reachable from specific points of it.
    pub enum ApplicationStatus {
        /// Initial state when an application is entered
        PendingSubmission => "Pending Submission",
        UnderReview => "Under Review",
        RevisionRequested => "Revision Requested",
        AdditionalInfoRequired => "Additional Info Required",
        Approved => "Approved",
        Rejected => "Rejected",
        ContractNegotiation => "Contract Negotiation",
        /// Award is running
        Active => "Active",
        /// Universal escape, reachable from every state
        Cancelled => "Cancelled",
        Completed => "Completed",
        Suspended => "Suspended",
        Terminated => "Terminated",
        /// Applicant turned the award down
        Declined => "Declined",
        Reapplied => "Reapplied",
        Appealed => "Appealed",
        Closed => "Closed",
    }
}

impl ApplicationStatus {
    /// Check if this is a terminal state (only the universal escape leads out)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Completed | Self::Terminated | Self::Declined | Self::Closed
        )
    }

    /// Check if the application is still waiting on a funder decision
    pub fn is_in_review(&self) -> bool {
        matches!(
            self,
            Self::UnderReview | Self::RevisionRequested | Self::AdditionalInfoRequired
        )
    }

    /// Check if money has been awarded (or is being paid out)
    pub fn is_funded(&self) -> bool {
        matches!(
            self,
            Self::Approved | Self::ContractNegotiation | Self::Active | Self::Suspended
        )
    }
}

/// Default state for new applications
impl Default for ApplicationStatus {
    fn default() -> Self {
        Self::PendingSubmission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiaisonError;

    #[test]
    fn test_status_terminal_check() {
        assert!(ApplicationStatus::Cancelled.is_terminal());
        assert!(ApplicationStatus::Closed.is_terminal());
        assert!(ApplicationStatus::Declined.is_terminal());
        assert!(!ApplicationStatus::Approved.is_terminal());
        assert!(!ApplicationStatus::Suspended.is_terminal());
    }

    #[test]
    fn test_status_groups() {
        assert!(ApplicationStatus::RevisionRequested.is_in_review());
        assert!(!ApplicationStatus::Approved.is_in_review());
        assert!(ApplicationStatus::Suspended.is_funded());
        assert!(!ApplicationStatus::Rejected.is_funded());
        assert!(!ApplicationStatus::Completed.is_funded());
    }

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(
            ApplicationStatus::AdditionalInfoRequired.to_string(),
            "Additional Info Required"
        );
        assert_eq!(
            "under review".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::UnderReview
        );
        assert!(matches!(
            "".parse::<ApplicationStatus>(),
            Err(LiaisonError::Validation(_))
        ));
        assert!("Pending".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&ApplicationStatus::ContractNegotiation).unwrap();
        assert_eq!(json, "\"Contract Negotiation\"");

        let parsed: ApplicationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ApplicationStatus::ContractNegotiation);

        assert!(serde_json::from_str::<ApplicationStatus>("\"Archived\"").is_err());
    }

    #[test]
    fn test_default_status() {
        assert_eq!(
            ApplicationStatus::default(),
            ApplicationStatus::PendingSubmission
        );
    }
}
