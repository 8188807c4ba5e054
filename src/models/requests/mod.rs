use std::collections::HashMap;

pub mod auth;
pub mod invoice;

/// Submitted form values keyed by field name.
pub type FormFields = HashMap<String, String>;
