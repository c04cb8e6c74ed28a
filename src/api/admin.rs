//! Admin endpoints under `/admin`.

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use super::{call, to_body, ResourceClient};
use crate::error::Result;
use crate::model::{Advisor, Lead, LeadStatus, Project, SiteVisit};

/// Entry point to the admin endpoint groups.
#[derive(Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a dyn ResourceClient,
}

impl<'a> AdminApi<'a> {
    pub fn new(client: &'a dyn ResourceClient) -> Self {
        Self { client }
    }

    pub fn projects(&self) -> Projects<'a> {
        Projects {
            client: self.client,
        }
    }

    pub fn leads(&self) -> Leads<'a> {
        Leads {
            client: self.client,
        }
    }

    pub fn site_visits(&self) -> SiteVisits<'a> {
        SiteVisits {
            client: self.client,
        }
    }

    pub fn advisors(&self) -> Advisors<'a> {
        Advisors {
            client: self.client,
        }
    }

    pub fn dashboard(&self) -> Dashboard<'a> {
        Dashboard {
            client: self.client,
        }
    }
}

pub struct Projects<'a> {
    client: &'a dyn ResourceClient,
}

impl Projects<'_> {
    pub async fn list(&self) -> Result<Vec<Project>> {
        call(self.client, Method::GET, "/admin/projects", None).await
    }

    pub async fn get(&self, id: u64) -> Result<Project> {
        call(self.client, Method::GET, &format!("/admin/projects/{id}"), None).await
    }

    pub async fn create<T: Serialize + Sync>(&self, data: &T) -> Result<Project> {
        call(self.client, Method::POST, "/admin/projects", Some(to_body(data)?)).await
    }

    pub async fn update<T: Serialize + Sync>(&self, id: u64, data: &T) -> Result<Project> {
        let path = format!("/admin/projects/{id}");
        call(self.client, Method::PUT, &path, Some(to_body(data)?)).await
    }

    pub async fn deactivate(&self, id: u64) -> Result<Value> {
        let path = format!("/admin/projects/{id}/deactivate");
        self.client.request(Method::PUT, &path, None).await
    }
}

pub struct Leads<'a> {
    client: &'a dyn ResourceClient,
}

impl Leads<'_> {
    pub async fn list(&self) -> Result<Vec<Lead>> {
        call(self.client, Method::GET, "/admin/leads", None).await
    }

    pub async fn get(&self, id: u64) -> Result<Lead> {
        call(self.client, Method::GET, &format!("/admin/leads/{id}"), None).await
    }

    pub async fn assign(&self, id: u64, advisor_id: u64) -> Result<Value> {
        let path = format!("/admin/leads/{id}/assign");
        let body = json!({ "advisorId": advisor_id });
        self.client.request(Method::PUT, &path, Some(body)).await
    }

    pub async fn update_status(&self, id: u64, status: LeadStatus) -> Result<Value> {
        let path = format!("/admin/leads/{id}/status");
        let body = json!({ "status": status });
        self.client.request(Method::PUT, &path, Some(body)).await
    }
}

pub struct SiteVisits<'a> {
    client: &'a dyn ResourceClient,
}

impl SiteVisits<'_> {
    pub async fn list(&self) -> Result<Vec<SiteVisit>> {
        call(self.client, Method::GET, "/admin/site-visits", None).await
    }

    pub async fn get(&self, id: u64) -> Result<SiteVisit> {
        call(self.client, Method::GET, &format!("/admin/site-visits/{id}"), None).await
    }

    pub async fn assign_advisor(&self, id: u64, advisor_id: u64) -> Result<Value> {
        let path = format!("/admin/site-visits/{id}/assign");
        let body = json!({ "advisorId": advisor_id });
        self.client.request(Method::PUT, &path, Some(body)).await
    }
}

pub struct Advisors<'a> {
    client: &'a dyn ResourceClient,
}

impl Advisors<'_> {
    pub async fn list(&self) -> Result<Vec<Advisor>> {
        call(self.client, Method::GET, "/admin/advisors", None).await
    }

    pub async fn get(&self, id: u64) -> Result<Advisor> {
        call(self.client, Method::GET, &format!("/admin/advisors/{id}"), None).await
    }

    pub async fn create<T: Serialize + Sync>(&self, data: &T) -> Result<Advisor> {
        call(self.client, Method::POST, "/admin/advisors", Some(to_body(data)?)).await
    }

    pub async fn update<T: Serialize + Sync>(&self, id: u64, data: &T) -> Result<Advisor> {
        let path = format!("/admin/advisors/{id}");
        call(self.client, Method::PUT, &path, Some(to_body(data)?)).await
    }

    pub async fn deactivate(&self, id: u64) -> Result<Value> {
        let path = format!("/admin/advisors/{id}/deactivate");
        self.client.request(Method::PUT, &path, None).await
    }

    pub async fn performance(&self, id: u64) -> Result<Value> {
        let path = format!("/admin/advisors/{id}/performance");
        self.client.request(Method::GET, &path, None).await
    }
}

pub struct Dashboard<'a> {
    client: &'a dyn ResourceClient,
}

impl Dashboard<'_> {
    pub async fn stats(&self) -> Result<Value> {
        self.client
            .request(Method::GET, "/admin/dashboard/stats", None)
            .await
    }

    pub async fn recent_activity(&self) -> Result<Value> {
        self.client
            .request(Method::GET, "/admin/dashboard/activity", None)
            .await
    }
}
