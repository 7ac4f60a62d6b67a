// schema/mod.rs - the one shared description of a profile record
//
// Both the form validator and the server-side store check payloads against
// `profile_schema()`, so the rules live in exactly one place.

pub mod check;
pub mod error;
#[cfg(test)]
pub(crate) mod fixtures;

pub use check::{check, Mode};
pub use error::{summarize, FieldIssue, SchemaError};

use once_cell::sync::Lazy;
use std::str::FromStr;

/// Constraint on a single leaf field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Non-empty string
    Text,
    /// String holding a well-formed email address
    Email,
    /// String or null; never required
    OptionalText,
    /// Boolean
    Flag,
    /// Boolean that falls back to `false`; never required
    FlagWithDefault,
}

impl FieldRule {
    /// Whether a complete record must carry this field
    pub fn is_required(self) -> bool {
        matches!(self, FieldRule::Text | FieldRule::Email | FieldRule::Flag)
    }

    /// Type name used in error messages
    pub fn expected(self) -> &'static str {
        match self {
            FieldRule::Text | FieldRule::Email | FieldRule::OptionalText => "string",
            FieldRule::Flag | FieldRule::FlagWithDefault => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Field(FieldRule),
    Section(ObjectSchema),
}

/// Ordered set of named nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    fields: Vec<(&'static str, SchemaNode)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rule: FieldRule) -> Self {
        self.fields.push((name, SchemaNode::Field(rule)));
        self
    }

    pub fn section(mut self, name: &'static str, schema: ObjectSchema) -> Self {
        self.fields.push((name, SchemaNode::Section(schema)));
        self
    }

    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, node)| node)
    }

    /// Resolve `key` to a nested section schema.
    pub fn lookup_section(&self, key: &str) -> Result<&ObjectSchema, SchemaError> {
        match self.get(key) {
            Some(SchemaNode::Section(schema)) => Ok(schema),
            Some(SchemaNode::Field(_)) => Err(SchemaError::NotASection(key.to_string())),
            None => Err(SchemaError::UnknownSection(key.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SchemaNode)> {
        self.fields.iter().map(|(name, node)| (*name, node))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Independently addressable sections of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    BankDetail,
    Tax,
    Insurance,
}

impl SectionKey {
    pub const ALL: [SectionKey; 3] = [SectionKey::BankDetail, SectionKey::Tax, SectionKey::Insurance];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::BankDetail => "bankDetail",
            SectionKey::Tax => "tax",
            SectionKey::Insurance => "insurance",
        }
    }
}

impl FromStr for SectionKey {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownSection(s.to_string()))
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

static PROFILE_SCHEMA: Lazy<ObjectSchema> = Lazy::new(build_profile_schema);

/// The full-record schema
pub fn profile_schema() -> &'static ObjectSchema {
    &PROFILE_SCHEMA
}

fn build_profile_schema() -> ObjectSchema {
    use FieldRule::*;

    let bank_detail = ObjectSchema::new()
        .field("bankName", Text)
        .field("bankBic", Text)
        .field("iban", Text)
        .field("id", Text)
        .field("bankId", Text)
        .field("payee", Text)
        .field("paymentMethod", Text);

    let tax = ObjectSchema::new()
        .field("taxId", Text)
        .field("noTaxId", FlagWithDefault)
        .field("extraJob", Text)
        .field("disability", Text)
        .field("information", Text)
        .field("employmentStatus", Text)
        .field("secondSalary", Text);

    let insurance = ObjectSchema::new()
        .field("ssn", Text)
        .field("noSsn", Flag)
        .field("birthCountry", Text)
        .field("birthName", Text)
        .field("haveChildren", Text)
        .field("healthInsuranceType", Text)
        .field("healthInsurance", Text)
        .field("desiredHealthInsuranceCompany", Text)
        .field("privateHealthInsuranceName", Text)
        .field("privateHealthInsuranceContribution", Text)
        .field("privateNursingInsuranceContribution", Text)
        .field("lastPrivateHealthInsurance", Text)
        .field("requestFromPensionInsurance", Flag);

    ObjectSchema::new()
        .field("firstName", Text)
        .field("lastName", Text)
        .field("gender", Text)
        .field("academicTitle", Text)
        .field("email", Email)
        .field("phone", Text)
        .field("address", Text)
        .field("city", Text)
        .field("state", Text)
        .field("zip", Text)
        .field("country", Text)
        .field("position", Text)
        .field("department", OptionalText)
        .section(SectionKey::BankDetail.as_str(), bank_detail)
        .section(SectionKey::Tax.as_str(), tax)
        .section(SectionKey::Insurance.as_str(), insurance)
}
