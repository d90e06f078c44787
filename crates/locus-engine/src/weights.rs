//! Per-dialect candidate scores.
//!
//! The two dialects rank semantically similar candidates differently (id
//! scores 99 in fluent but 100 in classic, and so on). That divergence is
//! kept as data: each dialect carries its own table, and the config file can
//! override any single field while the rest keep their defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluentWeights {
    pub test_id: i32,
    pub id: i32,
    pub label: i32,
    pub placeholder: i32,
    pub alt_text: i32,
    pub role_text: i32,
    pub text: i32,
    pub href: i32,
    pub type_name: i32,
    pub selector: i32,
    pub nth: i32,
    pub fallback: i32,
}

impl Default for FluentWeights {
    fn default() -> Self {
        Self {
            test_id: 100,
            id: 99,
            label: 98,
            placeholder: 95,
            alt_text: 94,
            role_text: 93,
            text: 90,
            href: 89,
            type_name: 88,
            selector: 80,
            nth: 60,
            fallback: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassicWeights {
    pub id: i32,
    pub test_id: i32,
    pub label_input: i32,
    pub name: i32,
    pub placeholder: i32,
    pub type_name: i32,
    pub title: i32,
    pub link_text: i32,
    pub strong_path: i32,
    pub href: i32,
    pub selector: i32,
    pub indexed_path: i32,
}

impl Default for ClassicWeights {
    fn default() -> Self {
        Self {
            id: 100,
            test_id: 98,
            label_input: 95,
            name: 92,
            placeholder: 90,
            type_name: 88,
            title: 88,
            link_text: 85,
            strong_path: 85,
            href: 84,
            selector: 80,
            indexed_path: 30,
        }
    }
}

/// Both dialect tables together, as they appear in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub fluent: FluentWeights,
    pub classic: ClassicWeights,
}
