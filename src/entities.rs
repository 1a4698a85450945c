use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: Option<String>,
    pub name: String,
    pub owner_email: Option<String>,
    pub stack: Option<String>,
    pub git_url: Option<String>,
    pub web_url: Option<String>,
    #[serde(default)]
    pub dynos: u32,
    #[serde(default)]
    pub workers: u32,
    pub repo_size: Option<u64>,
    pub slug_size: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub process: String,
    pub state: String,
    #[serde(default)]
    pub elapsed: u64,
    pub command: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub type ConfigVars = BTreeMap<String, String>;
