// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! LLM Provider trait and related types
//!
//! Defines the abstraction layer over the text-generation service. Every
//! request is constrained to answer with JSON matching a declared schema.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::Result;

/// Main trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Run a structured generation and return the raw JSON text the model produced
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}

/// Request for a structured generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Prompt text sent as the single user turn
    pub prompt: String,

    /// Shape the answer must conform to
    pub schema: ResponseSchema,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling cutoff
    pub top_p: Option<f32>,
}

impl GenerateRequest {
    /// Create a new request
    pub fn new(prompt: impl Into<String>, schema: ResponseSchema) -> Self {
        Self {
            prompt: prompt.into(),
            schema,
            temperature: 0.7,
            top_p: None,
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set top-p
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }
}

/// JSON shapes the service can be constrained to
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSchema {
    /// An array of strings
    StringArray { description: String },

    /// An object whose properties are all strings
    Object { properties: Vec<SchemaProperty> },
}

/// A string-valued property of an object schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaProperty {
    pub name: String,
    pub description: String,
}

impl ResponseSchema {
    /// Array of strings, each described by `description`
    pub fn string_array(description: impl Into<String>) -> Self {
        ResponseSchema::StringArray {
            description: description.into(),
        }
    }

    /// Object with a single string property
    pub fn single_string(name: impl Into<String>, description: impl Into<String>) -> Self {
        ResponseSchema::Object {
            properties: vec![SchemaProperty {
                name: name.into(),
                description: description.into(),
            }],
        }
    }

    /// Render in the service's OpenAPI-subset schema dialect
    pub fn to_json(&self) -> Value {
        match self {
            ResponseSchema::StringArray { description } => json!({
                "type": "ARRAY",
                "items": {
                    "type": "STRING",
                    "description": description,
                },
            }),
            ResponseSchema::Object { properties } => {
                let props: serde_json::Map<String, Value> = properties
                    .iter()
                    .map(|p| {
                        (
                            p.name.clone(),
                            json!({ "type": "STRING", "description": p.description }),
                        )
                    })
                    .collect();
                let required: Vec<&str> = properties.iter().map(|p| p.name.as_str()).collect();
                json!({
                    "type": "OBJECT",
                    "properties": props,
                    "required": required,
                })
            }
        }
    }
}
