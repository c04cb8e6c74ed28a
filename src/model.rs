//! CRM records shown in the console's tables, and the status changes the
//! console applies to them locally.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::TableRow;

macro_rules! status_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum!(
    /// Where a lead is in the sales funnel.
    LeadStatus {
        New => "new",
        Contacted => "contacted",
        Interested => "interested",
        NotInterested => "not_interested",
        Converted => "converted",
    }
);

status_enum!(
    InterestLevel {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

status_enum!(
    /// Lifecycle of a site visit: requested by the customer, assigned to an
    /// advisor, confirmed by that advisor, then completed (or cancelled).
    VisitStatus {
        Requested => "requested",
        Assigned => "assigned",
        Confirmed => "confirmed",
        Completed => "completed",
        Cancelled => "cancelled",
    }
);

status_enum!(
    ProjectStatus {
        Active => "active",
        Inactive => "inactive",
        Upcoming => "upcoming",
        SoldOut => "sold_out",
    }
);

status_enum!(
    AdvisorStatus {
        Active => "active",
        Inactive => "inactive",
    }
);

/// A real-estate project listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub units: u32,
    pub available: u32,
    pub status: ProjectStatus,
    pub price: String,
}

impl Project {
    pub fn deactivate(&mut self) -> Result<()> {
        if self.status == ProjectStatus::Inactive {
            return Err(Error::InvalidTransition {
                action: "deactivate project",
                state: self.status.to_string(),
            });
        }
        self.status = ProjectStatus::Inactive;
        Ok(())
    }
}

impl TableRow for Project {
    fn field(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "location" => Some(self.location.clone()),
            "type" => Some(self.kind.clone()),
            "units" => Some(self.units.to_string()),
            "available" => Some(self.available.to_string()),
            "status" => Some(self.status.to_string()),
            "price" => Some(self.price.clone()),
            _ => None,
        }
    }
}

/// A prospective customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project: String,
    pub interest: InterestLevel,
    pub status: LeadStatus,
    #[serde(default)]
    pub advisor: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_contact: Option<String>,
}

impl Lead {
    /// Hands the lead to an advisor. A `new` lead becomes `contacted`.
    pub fn assign_to(&mut self, advisor: impl Into<String>) {
        self.advisor = Some(advisor.into());
        if self.status == LeadStatus::New {
            self.status = LeadStatus::Contacted;
        }
    }
}

impl TableRow for Lead {
    fn field(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "phone" => Some(self.phone.clone()),
            "project" => Some(self.project.clone()),
            "interest" => Some(self.interest.to_string()),
            "status" => Some(self.status.to_string()),
            "advisor" => self.advisor.clone(),
            "createdAt" => self.created_at.clone(),
            "lastContact" => self.last_contact.clone(),
            _ => None,
        }
    }
}

/// A scheduled property viewing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteVisit {
    pub id: u64,
    pub customer: String,
    pub phone: String,
    pub project: String,
    pub date: String,
    pub time: String,
    pub status: VisitStatus,
    #[serde(default)]
    pub advisor: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl SiteVisit {
    /// Admin assigns (or reassigns) an advisor to a visit not yet confirmed.
    pub fn assign(&mut self, advisor: impl Into<String>) -> Result<()> {
        self.expect(&[VisitStatus::Requested, VisitStatus::Assigned], "assign visit")?;
        self.advisor = Some(advisor.into());
        self.status = VisitStatus::Assigned;
        Ok(())
    }

    /// Advisor accepts an assigned visit.
    pub fn confirm(&mut self) -> Result<()> {
        self.expect(&[VisitStatus::Assigned], "confirm visit")?;
        self.status = VisitStatus::Confirmed;
        Ok(())
    }

    /// Advisor marks a confirmed visit done.
    pub fn complete(&mut self, remarks: Option<String>) -> Result<()> {
        self.expect(&[VisitStatus::Confirmed], "complete visit")?;
        self.status = VisitStatus::Completed;
        self.remarks = remarks.filter(|r| !r.trim().is_empty());
        Ok(())
    }

    fn expect(&self, allowed: &[VisitStatus], action: &'static str) -> Result<()> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                action,
                state: self.status.to_string(),
            })
        }
    }
}

impl TableRow for SiteVisit {
    fn field(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "customer" => Some(self.customer.clone()),
            "phone" => Some(self.phone.clone()),
            "project" => Some(self.project.clone()),
            "date" => Some(self.date.clone()),
            "time" => Some(self.time.clone()),
            "status" => Some(self.status.to_string()),
            "advisor" => self.advisor.clone(),
            "remarks" => self.remarks.clone(),
            _ => None,
        }
    }
}

/// A sales agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisor {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub assigned_leads: u32,
    #[serde(default)]
    pub completed_visits: u32,
    #[serde(default)]
    pub conversion: Option<String>,
    pub status: AdvisorStatus,
}

impl Advisor {
    /// Flips active/inactive and returns the new status.
    pub fn toggle_active(&mut self) -> AdvisorStatus {
        self.status = match self.status {
            AdvisorStatus::Active => AdvisorStatus::Inactive,
            AdvisorStatus::Inactive => AdvisorStatus::Active,
        };
        self.status
    }

    /// Initials for the avatar bubble, e.g. "VK" for "Vijay Kumar".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

impl TableRow for Advisor {
    fn field(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "phone" => Some(self.phone.clone()),
            "assignedLeads" => Some(self.assigned_leads.to_string()),
            "completedVisits" => Some(self.completed_visits.to_string()),
            "conversion" => self.conversion.clone(),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
}

/// A note attached to a lead. Only admin listings carry the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remark {
    pub id: u64,
    pub text: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(status: VisitStatus) -> SiteVisit {
        SiteVisit {
            id: 1,
            customer: "Vikram Singh".into(),
            phone: "+91 98765 43210".into(),
            project: "Green Valley Heights".into(),
            date: "2024-01-25".into(),
            time: "10:00 AM".into(),
            status,
            advisor: None,
            remarks: None,
        }
    }

    #[test]
    fn visit_lifecycle() {
        let mut v = visit(VisitStatus::Requested);
        assert!(v.confirm().is_err());
        v.assign("Neha Singh").unwrap();
        assert_eq!(v.status, VisitStatus::Assigned);
        v.confirm().unwrap();
        v.complete(Some("Customer liked the 3BHK".into())).unwrap();
        assert_eq!(v.status, VisitStatus::Completed);
        assert_eq!(v.field("remarks").as_deref(), Some("Customer liked the 3BHK"));

        let err = v.assign("Vijay Kumar").unwrap_err();
        assert_eq!(err.to_string(), "cannot assign visit while completed");
    }

    #[test]
    fn assigning_new_lead_marks_contacted() {
        let mut lead: Lead = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Rahul Sharma", "email": "rahul@email.com",
            "phone": "+91 98765 43210", "project": "Green Valley Heights",
            "interest": "high", "status": "new", "advisor": null, "createdAt": "2024-01-20"
        }))
        .unwrap();
        assert_eq!(lead.field("advisor"), None);
        lead.assign_to("Vijay Kumar");
        assert_eq!(lead.status, LeadStatus::Contacted);

        lead.status = LeadStatus::Interested;
        lead.assign_to("Neha Singh");
        assert_eq!(lead.status, LeadStatus::Interested);
        assert_eq!(lead.field("createdAt").as_deref(), Some("2024-01-20"));
    }

    #[test]
    fn advisor_toggle_and_initials() {
        let mut advisor = Advisor {
            id: 1,
            name: "Vijay Kumar".into(),
            email: "vijay@squarefeet.com".into(),
            phone: "+91 99999 88888".into(),
            assigned_leads: 25,
            completed_visits: 18,
            conversion: Some("32%".into()),
            status: AdvisorStatus::Active,
        };
        assert_eq!(advisor.toggle_active(), AdvisorStatus::Inactive);
        assert_eq!(advisor.toggle_active(), AdvisorStatus::Active);
        assert_eq!(advisor.initials(), "VK");
    }

    #[test]
    fn project_type_field_and_deactivate() {
        let mut project: Project = serde_json::from_str(
            r#"{"id":5,"name":"Heritage Homes","location":"HSR Layout","type":"2BHK, 3BHK",
                "units":100,"available":0,"status":"sold_out","price":"₹75L - ₹1.1Cr"}"#,
        )
        .unwrap();
        assert_eq!(project.field("type").as_deref(), Some("2BHK, 3BHK"));
        project.deactivate().unwrap();
        assert!(project.deactivate().is_err());
    }
}
