//! Configuration validation

use super::models::*;
use crate::core::store::MAX_RECORDS_PER_WRITE;
use std::collections::HashSet;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for EnrichConfig {
    fn validate(&self) -> Result<(), String> {
        self.summary_api
            .validate()
            .map_err(|e| format!("summary_api: {}", e))?;
        self.table.validate().map_err(|e| format!("table: {}", e))?;
        self.throttle
            .validate()
            .map_err(|e| format!("throttle: {}", e))?;
        self.logging
            .validate()
            .map_err(|e| format!("logging: {}", e))?;
        Ok(())
    }
}

impl Validate for SummaryApiConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| format!("invalid endpoint '{}': {}", self.endpoint, e))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "endpoint must use http:// or https:// scheme, got: {}",
                    scheme
                ));
            }
        }
        if url.cannot_be_a_base() {
            return Err(format!("endpoint '{}' cannot carry a path", self.endpoint));
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}

impl Validate for TableConfig {
    fn validate(&self) -> Result<(), String> {
        let named = [
            ("name", &self.name),
            ("key_field", &self.key_field),
            ("extract_field", &self.extract_field),
            ("image_field", &self.image_field),
        ];
        for (label, value) in named {
            if value.trim().is_empty() {
                return Err(format!("{} cannot be empty", label));
            }
        }

        let fields: HashSet<&str> = [
            self.key_field.as_str(),
            self.extract_field.as_str(),
            self.image_field.as_str(),
        ]
        .into_iter()
        .collect();
        if fields.len() != 3 {
            return Err(format!(
                "key_field, extract_field and image_field must be distinct (got '{}', '{}', '{}')",
                self.key_field, self.extract_field, self.image_field
            ));
        }
        Ok(())
    }
}

impl Validate for ThrottleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_records_per_update == 0 || self.max_records_per_update > MAX_RECORDS_PER_WRITE
        {
            return Err(format!(
                "max_records_per_update must be between 1 and {}, got {}",
                MAX_RECORDS_PER_WRITE, self.max_records_per_update
            ));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        match self.format.to_ascii_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(format!("format must be 'pretty' or 'json', got '{}'", other)),
        }
    }
}
