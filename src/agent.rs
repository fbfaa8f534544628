//! Agent wiring for conversational front-ends.
//!
//! Describes the find_doctors tool in the JSON-schema shape that
//! function-calling APIs consume, together with the fixed prompt that
//! maps user intent onto the tool's arguments. The front-end does the
//! natural-language extraction; this crate only publishes the contract.

use crate::tool::DEFAULT_RADIUS_KM;
use serde::Serialize;
use serde_json::{json, Value};

pub const AGENT_NAME: &str = "DoctorFinder";
pub const AGENT_MODEL: &str = "gemini-2.5-flash";
pub const AGENT_DESCRIPTION: &str = "Finds nearby doctors using Google Maps";

/// Fixed prompt handed to the front-end model.
pub const AGENT_INSTRUCTION: &str = "\
You extract structured data and call the tool.

User intent mapping:
- \"cardiologist near me\" -> specialty=\"cardiologist\"
- \"dentist in Bangalore\" -> specialty=\"dentist\", city=\"Bangalore\"
- \"doctors within 5 km\" -> radius_km=5

Rules:
- Always extract specialty, city, and radius before calling.
- Never call with empty arguments.
- If city is missing, allow auto IP detection.
- Return results exactly as provided by the tool.";

/// JSON declaration of the find_doctors tool for function-calling APIs.
pub fn tool_declaration() -> Value {
    json!({
        "name": "find_doctors",
        "description": "Find doctors and clinics near a location, with distance and rating.",
        "input_schema": {
            "type": "object",
            "properties": {
                "specialty": {
                    "type": "string",
                    "description": "Medical specialty to search for, e.g. \"dentist\". Defaults to a general doctor search."
                },
                "city": {
                    "type": "string",
                    "description": "City to search in. Geocoded when no coordinates are given."
                },
                "lat": {
                    "type": "number",
                    "description": "Latitude of the search origin."
                },
                "lng": {
                    "type": "number",
                    "description": "Longitude of the search origin."
                },
                "radius_km": {
                    "type": "integer",
                    "description": "Search radius in kilometers.",
                    "default": DEFAULT_RADIUS_KM
                }
            },
            "required": []
        }
    })
}

/// The complete agent description, serializable for a front-end.
#[derive(Debug, Clone, Serialize)]
pub struct AgentManifest {
    pub name: &'static str,
    pub model: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
    pub tools: Vec<Value>,
}

pub fn manifest() -> AgentManifest {
    AgentManifest {
        name: AGENT_NAME,
        model: AGENT_MODEL,
        description: AGENT_DESCRIPTION,
        instruction: AGENT_INSTRUCTION,
        tools: vec![tool_declaration()],
    }
}
