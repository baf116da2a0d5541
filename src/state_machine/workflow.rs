//! # Workflow Definition
//!
//! Static transition table for grant applications: which statuses are
//! reachable from each status, the milestone vocabulary that may be attached
//! when leaving it, and advisory next actions. `Cancelled` is reachable from
//! every status and is not repeated in the per-status `next` lists.
//!
//! The table is read-only configuration compiled into the binary.

use super::states::ApplicationStatus;
use serde::Serialize;

use ApplicationStatus::*;

/// Rules attached to a single status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowRule {
    pub next: &'static [ApplicationStatus],
    pub milestones: &'static [&'static str],
    pub suggested_actions: &'static [&'static str],
}

const PENDING_SUBMISSION: WorkflowRule = WorkflowRule {
    next: &[UnderReview],
    milestones: &[
        "Application Submitted",
        "Documents Uploaded",
        "Budget Finalized",
    ],
    suggested_actions: &[
        "Confirm submission deadline with the program officer",
        "Collect letters of support",
        "Finalize the budget justification",
    ],
};

const UNDER_REVIEW: WorkflowRule = WorkflowRule {
    next: &[RevisionRequested, AdditionalInfoRequired, Approved, Rejected],
    milestones: &[
        "Initial Screening Passed",
        "Panel Review Scheduled",
        "Panel Review Completed",
    ],
    suggested_actions: &[
        "Check review timeline with the funder",
        "Prepare for reviewer questions",
    ],
};

const REVISION_REQUESTED: WorkflowRule = WorkflowRule {
    next: &[UnderReview, Declined],
    milestones: &["Revisions Submitted", "Revision Deadline Extended"],
    suggested_actions: &[
        "Schedule a call to clarify requested revisions",
        "Assign revision owners and a deadline",
    ],
};

const ADDITIONAL_INFO_REQUIRED: WorkflowRule = WorkflowRule {
    next: &[UnderReview, Declined],
    milestones: &["Information Provided", "Clarification Call Held"],
    suggested_actions: &[
        "Gather the requested documents",
        "Confirm the response format with the funder",
    ],
};

const APPROVED: WorkflowRule = WorkflowRule {
    next: &[ContractNegotiation, Active, Declined],
    milestones: &["Award Letter Received", "Terms Accepted"],
    suggested_actions: &[
        "Send a thank-you note to the funder",
        "Review award terms with the grants office",
        "Set up the project account",
    ],
};

const REJECTED: WorkflowRule = WorkflowRule {
    next: &[Reapplied, Appealed, Closed],
    milestones: &["Feedback Received", "Debrief Held"],
    suggested_actions: &[
        "Request reviewer feedback",
        "Evaluate eligibility for the next funding cycle",
    ],
};

const CONTRACT_NEGOTIATION: WorkflowRule = WorkflowRule {
    next: &[Active, Declined],
    milestones: &["Contract Drafted", "Contract Signed"],
    suggested_actions: &[
        "Route the contract through legal review",
        "Negotiate indirect cost rate",
    ],
};

const ACTIVE: WorkflowRule = WorkflowRule {
    next: &[Completed, Suspended, Terminated],
    milestones: &[
        "Progress Report Submitted",
        "Funds Disbursed",
        "Final Report Submitted",
    ],
    suggested_actions: &[
        "Track reporting deadlines",
        "Schedule periodic check-ins with the program officer",
    ],
};

const SUSPENDED: WorkflowRule = WorkflowRule {
    next: &[Active, Terminated],
    milestones: &["Compliance Issue Resolved"],
    suggested_actions: &["Document the corrective action plan"],
};

const APPEALED: WorkflowRule = WorkflowRule {
    next: &[UnderReview, Closed],
    milestones: &["Appeal Filed", "Appeal Decision Received"],
    suggested_actions: &["Follow up on the appeal timeline"],
};

const REAPPLIED: WorkflowRule = WorkflowRule {
    next: &[UnderReview],
    milestones: &["Resubmission Filed"],
    suggested_actions: &["Highlight changes since the previous submission"],
};

const TERMINAL: WorkflowRule = WorkflowRule {
    next: &[],
    milestones: &[],
    suggested_actions: &[],
};

/// Read-only view over the transition table
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowDefinition;

impl WorkflowDefinition {
    /// Rules for leaving `status`
    pub fn rule(status: ApplicationStatus) -> &'static WorkflowRule {
        match status {
            PendingSubmission => &PENDING_SUBMISSION,
            UnderReview => &UNDER_REVIEW,
            RevisionRequested => &REVISION_REQUESTED,
            AdditionalInfoRequired => &ADDITIONAL_INFO_REQUIRED,
            Approved => &APPROVED,
            Rejected => &REJECTED,
            ContractNegotiation => &CONTRACT_NEGOTIATION,
            Active => &ACTIVE,
            Suspended => &SUSPENDED,
            Appealed => &APPEALED,
            Reapplied => &REAPPLIED,
            Cancelled | Completed | Terminated | Declined | Closed => &TERMINAL,
        }
    }

    /// Check if `to` may follow `from`
    pub fn allows(from: ApplicationStatus, to: ApplicationStatus) -> bool {
        to == Cancelled || Self::rule(from).next.contains(&to)
    }

    /// Every status reachable from `from`, the universal escape last
    pub fn allowed_targets(from: ApplicationStatus) -> Vec<ApplicationStatus> {
        let mut targets = Self::rule(from).next.to_vec();
        if !targets.contains(&Cancelled) {
            targets.push(Cancelled);
        }
        targets
    }

    /// Resolve a caller-supplied milestone against the vocabulary of `from`
    ///
    /// Returns the canonical label, or `None` when the label is not part of it.
    pub fn canonical_milestone(from: ApplicationStatus, milestone: &str) -> Option<&'static str> {
        let wanted = milestone.trim();
        Self::rule(from)
            .milestones
            .iter()
            .copied()
            .find(|label| label.eq_ignore_ascii_case(wanted))
    }

    pub fn suggested_actions(status: ApplicationStatus) -> &'static [&'static str] {
        Self::rule(status).suggested_actions
    }
}
