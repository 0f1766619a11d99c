//! Network URL constants and provider plans.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Public (keyless or demo-key) REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Paid-plan REST API base URL.
pub const PRO_API_URL: &str = "https://pro-api.coingecko.com/api/v3";

/// Provider subscription plan. Selects the base URL and the API key header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiPlan {
    /// No key at all.
    #[default]
    Public,
    Demo,
    Pro,
}

impl ApiPlan {
    pub fn base_url(&self) -> &'static str {
        match self {
            ApiPlan::Public | ApiPlan::Demo => DEFAULT_API_URL,
            ApiPlan::Pro => PRO_API_URL,
        }
    }

    /// Header name carrying the key.
    pub fn key_header(&self) -> Option<&'static str> {
        match self {
            ApiPlan::Public => None,
            ApiPlan::Demo => Some("x-cg-demo-api-key"),
            ApiPlan::Pro => Some("x-cg-pro-api-key"),
        }
    }

    /// Query parameter name carrying the key.
    pub fn key_param(&self) -> Option<&'static str> {
        match self {
            ApiPlan::Public => None,
            ApiPlan::Demo => Some("x_cg_demo_api_key"),
            ApiPlan::Pro => Some("x_cg_pro_api_key"),
        }
    }
}

impl FromStr for ApiPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" | "" => Ok(ApiPlan::Public),
            "demo" => Ok(ApiPlan::Demo),
            "pro" => Ok(ApiPlan::Pro),
            other => Err(format!("Unknown API plan: {}", other)),
        }
    }
}

/// Where the API key travels on each request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPlacement {
    #[default]
    Header,
    Query,
}
