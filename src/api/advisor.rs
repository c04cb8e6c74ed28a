//! Advisor endpoints under `/advisor`. Everything here is scoped server-side
//! to the signed-in advisor.

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use super::{call, to_body, ResourceClient};
use crate::error::Result;
use crate::model::{Lead, Remark, SiteVisit};

#[derive(Clone, Copy)]
pub struct AdvisorApi<'a> {
    client: &'a dyn ResourceClient,
}

impl<'a> AdvisorApi<'a> {
    pub fn new(client: &'a dyn ResourceClient) -> Self {
        Self { client }
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

    pub fn profile(&self) -> Profile<'a> {
        Profile {
            client: self.client,
        }
    }

    pub fn dashboard(&self) -> Dashboard<'a> {
        Dashboard {
            client: self.client,
        }
    }
}

pub struct Leads<'a> {
    client: &'a dyn ResourceClient,
}

impl Leads<'_> {
    pub async fn assigned(&self) -> Result<Vec<Lead>> {
        call(self.client, Method::GET, "/advisor/leads", None).await
    }

    pub async fn get(&self, id: u64) -> Result<Lead> {
        call(self.client, Method::GET, &format!("/advisor/leads/{id}"), None).await
    }

    pub async fn add_remark(&self, id: u64, remark: &str) -> Result<Value> {
        let path = format!("/advisor/leads/{id}/remarks");
        self.client
            .request(Method::POST, &path, Some(json!({ "remark": remark })))
            .await
    }

    pub async fn remarks(&self, id: u64) -> Result<Vec<Remark>> {
        call(self.client, Method::GET, &format!("/advisor/leads/{id}/remarks"), None).await
    }
}

pub struct SiteVisits<'a> {
    client: &'a dyn ResourceClient,
}

impl SiteVisits<'_> {
    pub async fn assigned(&self) -> Result<Vec<SiteVisit>> {
        call(self.client, Method::GET, "/advisor/site-visits", None).await
    }

    pub async fn get(&self, id: u64) -> Result<SiteVisit> {
        call(self.client, Method::GET, &format!("/advisor/site-visits/{id}"), None).await
    }

    pub async fn confirm(&self, id: u64) -> Result<Value> {
        let path = format!("/advisor/site-visits/{id}/confirm");
        self.client.request(Method::PUT, &path, None).await
    }

    pub async fn complete(&self, id: u64, remarks: &str) -> Result<Value> {
        let path = format!("/advisor/site-visits/{id}/complete");
        self.client
            .request(Method::PUT, &path, Some(json!({ "remarks": remarks })))
            .await
    }
}

pub struct Profile<'a> {
    client: &'a dyn ResourceClient,
}

impl Profile<'_> {
    pub async fn get(&self) -> Result<Value> {
        self.client.request(Method::GET, "/advisor/profile", None).await
    }

    pub async fn update<T: Serialize + Sync>(&self, data: &T) -> Result<Value> {
        self.client
            .request(Method::PUT, "/advisor/profile", Some(to_body(data)?))
            .await
    }

    pub async fn performance(&self) -> Result<Value> {
        self.client
            .request(Method::GET, "/advisor/profile/performance", None)
            .await
    }
}

pub struct Dashboard<'a> {
    client: &'a dyn ResourceClient,
}

impl Dashboard<'_> {
    pub async fn stats(&self) -> Result<Value> {
        self.client
            .request(Method::GET, "/advisor/dashboard/stats", None)
            .await
    }

    pub async fn today_tasks(&self) -> Result<Value> {
        self.client
            .request(Method::GET, "/advisor/dashboard/tasks", None)
            .await
    }
}
