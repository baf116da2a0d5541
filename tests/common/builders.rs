//! Builders that drive applications into a given state through the public API

#![allow(dead_code)]

use grant_liaison::models::{FunderType, GrantApplication, NewGrantApplication, Priority};
use grant_liaison::state_machine::{ApplicationStatus, StatusUpdate};
use grant_liaison::LiaisonService;
use rust_decimal::Decimal;

/// Builder for test applications
pub struct ApplicationBuilder {
    title: String,
    funder: String,
    funder_type: FunderType,
    amount: Decimal,
    priority: Option<Priority>,
    path: Vec<ApplicationStatus>,
}

impl ApplicationBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            funder: "Northern Research Council".to_string(),
            funder_type: FunderType::Federal,
            amount: Decimal::new(75_000, 0),
            priority: None,
            path: Vec::new(),
        }
    }

    pub fn with_funder(mut self, funder: &str, funder_type: FunderType) -> Self {
        self.funder = funder.to_string();
        self.funder_type = funder_type;
        self
    }

    pub fn with_amount(mut self, amount: &str) -> Self {
        self.amount = amount.parse().expect("valid decimal amount");
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Walk the workflow through `path`, one update per status
    pub fn through(mut self, path: &[ApplicationStatus]) -> Self {
        self.path = path.to_vec();
        self
    }

    pub fn build(self, service: &LiaisonService) -> GrantApplication {
        let mut fields = NewGrantApplication::new(self.title, self.funder, self.funder_type, self.amount)
            .with_contact("J. Lindqvist", "j.lindqvist@nrc.example", "+46 8 555 0199");
        if let Some(priority) = self.priority {
            fields = fields.with_priority(priority);
        }

        let mut application = service
            .create_application(fields)
            .expect("Failed to create test application");

        for status in self.path {
            application = service
                .update_status(
                    &application.id,
                    StatusUpdate::new(status, format!("moving to {status}"), "test-builder"),
                )
                .expect("Failed to walk test application")
                .application;
        }
        application
    }
}

/// Application sitting in `Under Review`
pub fn application_under_review(service: &LiaisonService, title: &str) -> GrantApplication {
    ApplicationBuilder::new(title)
        .through(&[ApplicationStatus::UnderReview])
        .build(service)
}
